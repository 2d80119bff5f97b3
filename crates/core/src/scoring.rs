use crate::{
    default_hand_base, evaluate_hand, Card, Edition, GameConfig, HandKind, HandLevels,
    JokerEffect, JokerInstance, Rank, RuleEffect, Score, ScoreTraceStep, Seal, Suit,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ScoreTables {
    hand_rules: HashMap<HandKind, (i64, f64)>,
    hand_level_rules: HashMap<HandKind, (i64, f64)>,
    rank_chips: HashMap<Rank, i64>,
}

impl ScoreTables {
    pub fn from_config(config: &GameConfig) -> Self {
        let mut hand_rules = HashMap::new();
        let mut hand_level_rules = HashMap::new();
        for hand in &config.hands {
            hand_rules.insert(hand.kind, (hand.base_chips, hand.base_mult));
            hand_level_rules.insert(hand.kind, (hand.level_chips, hand.level_mult));
        }
        let mut rank_chips = HashMap::new();
        for rank in &config.ranks {
            rank_chips.insert(rank.rank, rank.chips);
        }
        Self {
            hand_rules,
            hand_level_rules,
            rank_chips,
        }
    }

    pub fn hand_base(&self, kind: HandKind) -> (i64, f64) {
        self.hand_rules
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_hand_base(kind))
    }

    /// Bonus added on top of the base for every level above 1.
    pub fn level_bonus(&self, kind: HandKind, level: u32) -> (i64, f64) {
        if level <= 1 {
            return (0, 0.0);
        }
        let (level_chips, level_mult) = self
            .hand_level_rules
            .get(&kind)
            .copied()
            .unwrap_or((10, 2.0));
        let extra = (level - 1) as i64;
        (level_chips.saturating_mul(extra), level_mult * extra as f64)
    }

    pub fn hand_base_for_level(&self, kind: HandKind, level: u32) -> (i64, f64) {
        let (base_chips, base_mult) = self.hand_base(kind);
        let (bonus_chips, bonus_mult) = self.level_bonus(kind, level);
        (base_chips.saturating_add(bonus_chips), base_mult + bonus_mult)
    }

    pub fn rank_chips(&self, rank: Rank) -> i64 {
        self.rank_chips
            .get(&rank)
            .copied()
            .unwrap_or_else(|| rank.base_chips())
    }
}

impl Default for ScoreTables {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Hand category together with its current level and level-1 base values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub kind: HandKind,
    pub level: u32,
    pub base_chips: i64,
    pub base_mult: f64,
}

pub fn classify(cards: &[Card], tables: &ScoreTables, levels: &HandLevels) -> Classification {
    let kind = evaluate_hand(cards);
    let (base_chips, base_mult) = tables.hand_base(kind);
    Classification {
        kind,
        level: levels.level(kind),
        base_chips,
        base_mult,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub hand: HandKind,
    pub level: u32,
    pub base: Score,
    pub total: Score,
    pub score: i64,
    pub money_delta: i64,
    pub trace: Vec<ScoreTraceStep>,
}

/// Rank chips plus any bonus-chip enhancement, or 0 for a debuffed suit.
pub fn card_chip_value(card: &Card, tables: &ScoreTables, debuffed_suit: Option<Suit>) -> i64 {
    if debuffed_suit == Some(card.suit) {
        return 0;
    }
    tables.rank_chips(card.rank) + card.bonus_chips()
}

pub fn edition_effect(edition: Edition) -> RuleEffect {
    match edition {
        Edition::Foil => RuleEffect::AddChips(50),
        Edition::Holographic => RuleEffect::AddMult(10.0),
        Edition::Polychrome => RuleEffect::MultiplyMult(1.5),
    }
}

enum JokerBonus {
    Apply(RuleEffect),
    Miss,
    Inactive,
}

fn joker_bonus(joker: &JokerInstance, played: &[Card], hand: HandKind) -> JokerBonus {
    match &joker.effect {
        JokerEffect::FlatChips { value } => JokerBonus::Apply(RuleEffect::AddChips(*value)),
        JokerEffect::FlatMult { value } => JokerBonus::Apply(RuleEffect::AddMult(*value)),
        JokerEffect::ScalingMult { .. } => {
            if joker.current_value > 0.0 {
                JokerBonus::Apply(RuleEffect::AddMult(joker.current_value))
            } else {
                JokerBonus::Inactive
            }
        }
        JokerEffect::ConditionalMult { condition, value } => {
            if condition.matches(played, hand) {
                JokerBonus::Apply(RuleEffect::AddMult(*value))
            } else {
                JokerBonus::Miss
            }
        }
        JokerEffect::ConditionalChips { condition, value } => {
            if condition.matches(played, hand) {
                JokerBonus::Apply(RuleEffect::AddChips(*value))
            } else {
                JokerBonus::Miss
            }
        }
        JokerEffect::ConditionalXMult { condition, value } => {
            if condition.matches(played, hand) {
                JokerBonus::Apply(RuleEffect::MultiplyMult(*value))
            } else {
                JokerBonus::Miss
            }
        }
        JokerEffect::MoneyPerHand { .. } => JokerBonus::Inactive,
    }
}

#[derive(Debug, Default)]
struct Tally {
    score: Score,
    trace: Vec<ScoreTraceStep>,
}

impl Tally {
    fn apply(&mut self, source: String, effect: RuleEffect) {
        let before = self.score;
        self.score.apply(&effect);
        self.trace.push(ScoreTraceStep {
            source,
            effect: Some(effect),
            before,
            after: self.score,
        });
    }

    fn miss(&mut self, source: String) {
        self.trace.push(ScoreTraceStep {
            source,
            effect: None,
            before: self.score,
            after: self.score,
        });
    }
}

/// Runs the full scoring pipeline over `played`, given in hand order.
///
/// Red seals on `played` are consumed and scaling jokers in `jokers` are
/// updated in place. Empty joker slots are skipped. The money earned by
/// money-per-hand jokers is returned in `money_delta`; applying it is left to
/// the caller.
pub fn score_hand(
    played: &mut [Card],
    classification: &Classification,
    jokers: &mut [Option<JokerInstance>],
    tables: &ScoreTables,
    debuffed_suit: Option<Suit>,
) -> ScoreBreakdown {
    let hand = classification.kind;
    let base = Score::new(classification.base_chips, classification.base_mult);
    let mut tally = Tally {
        score: base,
        trace: Vec::new(),
    };

    let (level_chips, level_mult) = tables.level_bonus(hand, classification.level);
    if level_chips != 0 {
        tally.apply(
            format!("level {}", classification.level),
            RuleEffect::AddChips(level_chips),
        );
    }
    if level_mult != 0.0 {
        tally.apply(
            format!("level {}", classification.level),
            RuleEffect::AddMult(level_mult),
        );
    }

    for card in played.iter() {
        let value = card_chip_value(card, tables, debuffed_suit);
        if value > 0 {
            tally.apply(card.to_string(), RuleEffect::AddChips(value));
        }
        if let Some(edition) = card.edition {
            tally.apply(format!("{card} {edition:?}"), edition_effect(edition));
        }
    }

    for card in played.iter_mut() {
        if card.seal != Some(Seal::Red) {
            continue;
        }
        if let Some(edition) = card.edition {
            tally.apply(
                format!("{card} red seal {edition:?}"),
                edition_effect(edition),
            );
        }
        card.seal = None;
    }

    for joker in jokers.iter_mut().flatten() {
        if let JokerEffect::ScalingMult { trigger, value } = &joker.effect {
            if trigger.fires(played, debuffed_suit) {
                joker.current_value += *value;
                debug!("{} scaled to {}", joker.id, joker.current_value);
            }
        }
    }

    let mut money_delta = 0;
    for joker in jokers.iter().flatten() {
        match joker_bonus(joker, played, hand) {
            JokerBonus::Apply(effect) => tally.apply(joker.name.clone(), effect),
            JokerBonus::Miss => tally.miss(joker.name.clone()),
            JokerBonus::Inactive => {}
        }
        if let JokerEffect::MoneyPerHand { value } = joker.effect {
            money_delta += value;
        }
    }

    let total = tally.score;
    ScoreBreakdown {
        hand,
        level: classification.level,
        base,
        total,
        score: total.total(),
        money_delta,
        trace: tally.trace,
    }
}
