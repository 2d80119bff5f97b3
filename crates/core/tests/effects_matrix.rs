use cardrun_core::{
    classify, score_hand, Card, Condition, Edition, Enhancement, EnhancementKind, HandKind,
    HandLevels, JokerDef, JokerEffect, JokerInstance, Parity, Rank, ScoreTables, Seal, Suit,
    TarotEffect,
};

fn pair_of_aces() -> Vec<Card> {
    vec![
        Card::standard(Suit::Spades, Rank::Ace).with_id(1),
        Card::standard(Suit::Hearts, Rank::Ace).with_id(2),
    ]
}

fn joker(effect: JokerEffect) -> Option<JokerInstance> {
    let def = JokerDef {
        id: "j_case".to_string(),
        name: "Case".to_string(),
        description: String::new(),
        cost: 4,
        effect,
    };
    Some(JokerInstance::from_def(1, &def))
}

fn score_with(effect: JokerEffect) -> (i64, i64) {
    let tables = ScoreTables::default();
    let mut played = pair_of_aces();
    let classification = classify(&played, &tables, &HandLevels::new());
    assert_eq!(classification.kind, HandKind::Pair);
    let mut jokers = vec![joker(effect)];
    let breakdown = score_hand(&mut played, &classification, &mut jokers, &tables, None);
    (breakdown.score, breakdown.money_delta)
}

// Pair of aces without jokers: (10 + 22) * 2 = 64.
macro_rules! joker_case {
    ($name:ident, $effect:expr, $expected:expr) => {
        #[test]
        fn $name() {
            assert_eq!(score_with($effect).0, $expected);
        }
    };
}

joker_case!(flat_chips, JokerEffect::FlatChips { value: 20 }, 104);
joker_case!(flat_mult, JokerEffect::FlatMult { value: 4.0 }, 192);
joker_case!(
    conditional_mult_hand_type_hit,
    JokerEffect::ConditionalMult {
        condition: Condition::HandType {
            hand: HandKind::Pair
        },
        value: 8.0
    },
    320
);
joker_case!(
    conditional_mult_hand_type_miss,
    JokerEffect::ConditionalMult {
        condition: Condition::HandType {
            hand: HandKind::Flush
        },
        value: 8.0
    },
    64
);
joker_case!(
    conditional_chips_suit_hit,
    JokerEffect::ConditionalChips {
        condition: Condition::HasSuit { suit: Suit::Hearts },
        value: 30
    },
    124
);
joker_case!(
    conditional_chips_suit_miss,
    JokerEffect::ConditionalChips {
        condition: Condition::HasSuit { suit: Suit::Clubs },
        value: 30
    },
    64
);
joker_case!(
    conditional_xmult_count_hit,
    JokerEffect::ConditionalXMult {
        condition: Condition::CardCount { count: 2 },
        value: 3.0
    },
    192
);
joker_case!(
    conditional_xmult_count_miss,
    JokerEffect::ConditionalXMult {
        condition: Condition::CardCount { count: 5 },
        value: 3.0
    },
    64
);
joker_case!(
    parity_odd_aces,
    JokerEffect::ConditionalMult {
        condition: Condition::RankParity {
            parity: Parity::Odd
        },
        value: 5.0
    },
    224
);
joker_case!(
    parity_even_misses_aces,
    JokerEffect::ConditionalMult {
        condition: Condition::RankParity {
            parity: Parity::Even
        },
        value: 5.0
    },
    64
);
joker_case!(
    scaling_without_trigger_adds_nothing,
    JokerEffect::ScalingMult {
        trigger: cardrun_core::ScalingTrigger::ScoreSuit {
            suit: Suit::Clubs
        },
        value: 1.0
    },
    64
);
joker_case!(money_per_hand_leaves_score, JokerEffect::MoneyPerHand { value: 2 }, 64);

#[test]
fn money_per_hand_reports_delta() {
    assert_eq!(score_with(JokerEffect::MoneyPerHand { value: 2 }).1, 2);
    assert_eq!(score_with(JokerEffect::FlatMult { value: 4.0 }).1, 0);
}

#[test]
fn face_cards_count_as_even() {
    let played = [
        Card::standard(Suit::Hearts, Rank::Ten),
        Card::standard(Suit::Hearts, Rank::Queen),
        Card::standard(Suit::Clubs, Rank::King),
    ];
    let even = Condition::RankParity {
        parity: Parity::Even,
    };
    assert!(even.matches(&played, HandKind::HighCard));
    let with_jack = [
        Card::standard(Suit::Hearts, Rank::Ten),
        Card::standard(Suit::Hearts, Rank::Jack),
    ];
    assert!(!even.matches(&with_jack, HandKind::HighCard));
}

macro_rules! tarot_case {
    ($name:ident, $effect:expr, |$first:ident, $second:ident| $check:expr) => {
        #[test]
        fn $name() {
            let mut targets = [
                Card::standard(Suit::Hearts, Rank::Five).with_id(1),
                Card::standard(Suit::Clubs, Rank::Nine).with_id(2),
            ];
            targets[0].edition = Some(Edition::Foil);
            targets[0].seal = Some(Seal::Gold);
            $effect.apply_to_targets(&mut targets);
            let [$first, $second] = targets;
            assert!($check);
        }
    };
}

tarot_case!(
    enhance_stamps_every_target,
    TarotEffect::EnhanceCard {
        enhancement: EnhancementKind::BonusChips,
        value: 30,
        targets: 2
    },
    |a, b| a.bonus_chips() == 30
        && b.enhancement
            == Some(Enhancement {
                kind: EnhancementKind::BonusChips,
                value: 30
            })
);
tarot_case!(
    convert_suit_takes_second_suit,
    TarotEffect::ConvertSuit,
    |a, b| a.suit == Suit::Clubs && b.suit == Suit::Clubs && a.rank == Rank::Five
);
tarot_case!(
    edition_overwrites,
    TarotEffect::ApplyEdition {
        edition: Edition::Polychrome,
        targets: 1
    },
    |a, _b| a.edition == Some(Edition::Polychrome)
);
tarot_case!(
    seal_overwrites,
    TarotEffect::ApplySeal {
        seal: Seal::Red,
        targets: 1
    },
    |a, _b| a.seal == Some(Seal::Red) && a.edition == Some(Edition::Foil)
);

#[test]
fn effects_parse_from_tagged_json() {
    let effect: JokerEffect = serde_json::from_str(
        r#"{"type":"conditional_mult","trigger":"hand_type","hand":"Pair","value":8}"#,
    )
    .unwrap();
    assert_eq!(
        effect,
        JokerEffect::ConditionalMult {
            condition: Condition::HandType {
                hand: HandKind::Pair
            },
            value: 8.0
        }
    );
    let xmult: JokerEffect = serde_json::from_str(
        r#"{"type":"conditional_xmult","trigger":"card_count","count":5,"value":2.0}"#,
    )
    .unwrap();
    assert!(matches!(xmult, JokerEffect::ConditionalXMult { .. }));
    let tarot: TarotEffect = serde_json::from_str(r#"{"type":"convert_suit"}"#).unwrap();
    assert_eq!(tarot.targets(), 2);
}
