use cardrun_core::{
    classify, evaluate_hand, score_hand, Card, Condition, Edition, Enhancement, EnhancementKind,
    HandKind, HandLevels, JokerDef, JokerEffect, JokerInstance, Rank, ScalingTrigger,
    ScoreBreakdown, ScoreTables, Seal, Suit,
};

fn cards(notation: &str) -> Vec<Card> {
    notation.split_whitespace()
        .enumerate()
        .map(|(idx, token)| {
            let mut chars = token.chars();
            let rank = match chars.next() {
                Some('2') => Rank::Two,
                Some('3') => Rank::Three,
                Some('4') => Rank::Four,
                Some('5') => Rank::Five,
                Some('6') => Rank::Six,
                Some('7') => Rank::Seven,
                Some('8') => Rank::Eight,
                Some('9') => Rank::Nine,
                Some('T') => Rank::Ten,
                Some('J') => Rank::Jack,
                Some('Q') => Rank::Queen,
                Some('K') => Rank::King,
                Some('A') => Rank::Ace,
                other => panic!("bad rank {other:?}"),
            };
            let suit = match chars.next() {
                Some('H') => Suit::Hearts,
                Some('D') => Suit::Diamonds,
                Some('C') => Suit::Clubs,
                Some('S') => Suit::Spades,
                other => panic!("bad suit {other:?}"),
            };
            Card::standard(suit, rank).with_id(idx as u32 + 1)
        })
        .collect()
}

fn joker(id: &str, effect: JokerEffect) -> Option<JokerInstance> {
    let def = JokerDef {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        cost: 4,
        effect,
    };
    Some(JokerInstance::from_def(1, &def))
}

fn run(
    played: &mut [Card],
    jokers: &mut [Option<JokerInstance>],
    levels: &HandLevels,
    debuffed: Option<Suit>,
) -> ScoreBreakdown {
    let tables = ScoreTables::default();
    let classification = classify(played, &tables, levels);
    score_hand(played, &classification, jokers, &tables, debuffed)
}

fn plain(notation: &str) -> ScoreBreakdown {
    run(&mut cards(notation), &mut [], &HandLevels::new(), None)
}

#[test]
fn ten_of_spades_high_card() {
    let breakdown = plain("TS");
    assert_eq!(breakdown.hand, HandKind::HighCard);
    assert_eq!(breakdown.score, 15);
}

#[test]
fn pair_of_aces() {
    let breakdown = plain("AS AH");
    assert_eq!(breakdown.hand, HandKind::Pair);
    assert_eq!(breakdown.total.chips, 32);
    assert_eq!(breakdown.score, 64);
}

#[test]
fn pair_joker_adds_mult() {
    let mut jokers = vec![joker(
        "j_jolly",
        JokerEffect::ConditionalMult {
            condition: Condition::HandType {
                hand: HandKind::Pair,
            },
            value: 8.0,
        },
    )];
    let breakdown = run(
        &mut cards("AS AH"),
        &mut jokers,
        &HandLevels::new(),
        None,
    );
    assert_eq!(breakdown.total.mult, 10.0);
    assert_eq!(breakdown.score, 320);
    let last = breakdown.trace.last().unwrap();
    assert_eq!(last.source, "j_jolly");
    assert!(!last.is_miss());
}

#[test]
fn failed_condition_is_logged_as_miss() {
    let mut jokers = vec![joker(
        "j_hearts",
        JokerEffect::ConditionalMult {
            condition: Condition::HasSuit { suit: Suit::Hearts },
            value: 4.0,
        },
    )];
    let breakdown = run(&mut cards("AS AC"), &mut jokers, &HandLevels::new(), None);
    assert_eq!(breakdown.score, 64);
    let last = breakdown.trace.last().unwrap();
    assert!(last.is_miss());
    assert_eq!(last.before, last.after);
}

#[test]
fn empty_joker_slots_are_skipped() {
    let mut jokers = vec![None, joker("j_flat", JokerEffect::FlatMult { value: 2.0 }), None];
    let breakdown = run(&mut cards("AS AH"), &mut jokers, &HandLevels::new(), None);
    assert_eq!(breakdown.score, 128);
}

#[test]
fn level_bonus_applies_before_cards() {
    let mut levels = HandLevels::new();
    levels.level_up(HandKind::Pair);
    let breakdown = run(&mut cards("AS AH"), &mut [], &levels, None);
    assert_eq!(breakdown.level, 2);
    // (10 + 10 + 22) * (2 + 2)
    assert_eq!(breakdown.score, 168);
    assert_eq!(breakdown.trace[0].source, "level 2");
}

#[test]
fn canonical_hands_score_in_category_order() {
    let ladder = [
        ("AS AH AD AC AS", HandKind::FiveOfAKind, 2100),
        ("9H TH JH QH KH", HandKind::StraightFlush, 1192),
        ("KS KH KD KC", HandKind::FourOfAKind, 700),
        ("KS KH KD QC QH", HandKind::FullHouse, 360),
        ("2H 4H 6H 8H TH", HandKind::Flush, 260),
        ("2S 3H 4D 5C 6S", HandKind::Straight, 200),
        ("KS KH KD", HandKind::ThreeOfAKind, 180),
        ("KS KH QD QC", HandKind::TwoPair, 120),
        ("KS KH", HandKind::Pair, 60),
        ("KS", HandKind::HighCard, 15),
    ];
    let mut previous: Option<(HandKind, i64)> = None;
    for (notation, kind, score) in ladder {
        let breakdown = plain(notation);
        assert_eq!(breakdown.hand, kind, "{notation}");
        assert_eq!(breakdown.score, score, "{notation}");
        if let Some((stronger, stronger_score)) = previous {
            assert!(stronger > kind);
            assert!(stronger_score > score);
        }
        previous = Some((kind, score));
    }
}

#[test]
fn ace_low_straight() {
    assert_eq!(evaluate_hand(&cards("AS 2H 3D 4C 5S")), HandKind::Straight);
    assert_eq!(evaluate_hand(&cards("QS KH AD 2C 3S")), HandKind::HighCard);
}

#[test]
fn debuffed_suit_scores_no_base_chips() {
    let breakdown = run(
        &mut cards("AS AH"),
        &mut [],
        &HandLevels::new(),
        Some(Suit::Spades),
    );
    // (10 + 0 + 11) * 2
    assert_eq!(breakdown.score, 42);
}

#[test]
fn debuff_also_zeroes_bonus_chips_but_keeps_edition() {
    let mut played = cards("KS");
    played[0].enhancement = Some(Enhancement {
        kind: EnhancementKind::BonusChips,
        value: 30,
    });
    played[0].edition = Some(Edition::Foil);
    let breakdown = run(&mut played, &mut [], &HandLevels::new(), Some(Suit::Spades));
    assert_eq!(breakdown.score, 55);
}

#[test]
fn bonus_chips_enhancement_adds_to_rank() {
    let mut played = cards("KS");
    played[0].enhancement = Some(Enhancement {
        kind: EnhancementKind::BonusChips,
        value: 30,
    });
    assert_eq!(
        run(&mut played, &mut [], &HandLevels::new(), None).score,
        45
    );
}

macro_rules! edition_case {
    ($name:ident, $edition:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let mut played = cards("KS");
            played[0].edition = Some($edition);
            let breakdown = run(&mut played, &mut [], &HandLevels::new(), None);
            assert_eq!(breakdown.score, $expected);
        }
    };
}

edition_case!(foil_adds_chips, Edition::Foil, 65);
edition_case!(holographic_adds_mult, Edition::Holographic, 165);
edition_case!(polychrome_floors_once, Edition::Polychrome, 22);

#[test]
fn red_seal_retriggers_edition_once() {
    let mut played = cards("KS");
    played[0].edition = Some(Edition::Holographic);
    played[0].seal = Some(Seal::Red);
    let first = run(&mut played, &mut [], &HandLevels::new(), None);
    // 15 * (1 + 10 + 10)
    assert_eq!(first.score, 315);
    assert_eq!(played[0].seal, None);
    assert_eq!(played[0].edition, Some(Edition::Holographic));

    let second = run(&mut played, &mut [], &HandLevels::new(), None);
    assert_eq!(second.score, 165);
}

#[test]
fn red_seal_without_edition_is_still_consumed() {
    let mut played = cards("KS");
    played[0].seal = Some(Seal::Red);
    let breakdown = run(&mut played, &mut [], &HandLevels::new(), None);
    assert_eq!(breakdown.score, 15);
    assert_eq!(played[0].seal, None);
}

#[test]
fn scaling_updates_before_it_is_read() {
    let mut jokers = vec![joker(
        "j_scale_hearts",
        JokerEffect::ScalingMult {
            trigger: ScalingTrigger::ScoreSuit { suit: Suit::Hearts },
            value: 1.0,
        },
    )];
    let first = run(&mut cards("KH"), &mut jokers, &HandLevels::new(), None);
    assert_eq!(first.score, 30);
    let second = run(&mut cards("KH"), &mut jokers, &HandLevels::new(), None);
    assert_eq!(second.score, 45);
    assert_eq!(jokers[0].as_ref().unwrap().current_value, 2.0);

    let debuffed = run(
        &mut cards("KH"),
        &mut jokers,
        &HandLevels::new(),
        Some(Suit::Hearts),
    );
    assert_eq!(jokers[0].as_ref().unwrap().current_value, 2.0);
    // 5 base chips, 1 + 2 mult
    assert_eq!(debuffed.score, 15);
}

#[test]
fn scoring_is_deterministic() {
    let build = || {
        let mut played = cards("9H TH JH QH KH");
        played[1].edition = Some(Edition::Polychrome);
        played[3].edition = Some(Edition::Foil);
        played
    };
    let jokers = || {
        vec![
            joker("j_flat", JokerEffect::FlatChips { value: 15 }),
            joker(
                "j_xmult",
                JokerEffect::ConditionalXMult {
                    condition: Condition::HasSuit { suit: Suit::Hearts },
                    value: 1.5,
                },
            ),
        ]
    };
    let first = run(&mut build(), &mut jokers(), &HandLevels::new(), None);
    let second = run(&mut build(), &mut jokers(), &HandLevels::new(), None);
    assert_eq!(first.score, second.score);
    assert_eq!(first.trace, second.trace);
}

#[test]
fn multiplicative_and_additive_mult_are_separate() {
    let mut jokers = vec![
        joker(
            "j_xmult",
            JokerEffect::ConditionalXMult {
                condition: Condition::CardCount { count: 1 },
                value: 2.0,
            },
        ),
        joker("j_mult", JokerEffect::FlatMult { value: 4.0 }),
    ];
    let breakdown = run(&mut cards("KS"), &mut jokers, &HandLevels::new(), None);
    // 15 * (1 + 4) * 2
    assert_eq!(breakdown.score, 150);
}
