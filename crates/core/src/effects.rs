use crate::{Card, Edition, Enhancement, EnhancementKind, HandKind, Seal, Suit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Even,
    Odd,
}

/// Gate for the conditional joker effects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "trigger", rename_all = "snake_case")]
pub enum Condition {
    HasSuit { suit: Suit },
    HandType { hand: HandKind },
    CardCount { count: usize },
    RankParity { parity: Parity },
}

impl Condition {
    pub fn matches(&self, played: &[Card], hand: HandKind) -> bool {
        match self {
            Condition::HasSuit { suit } => played.iter().any(|card| card.suit == *suit),
            Condition::HandType { hand: wanted } => *wanted == hand,
            Condition::CardCount { count } => played.len() == *count,
            Condition::RankParity { parity } => {
                let want_even = *parity == Parity::Even;
                !played.is_empty() && played.iter().all(|card| card.rank.is_even() == want_even)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "trigger", rename_all = "snake_case")]
pub enum ScalingTrigger {
    /// A played card of `suit` that is not debuffed by the boss blind.
    ScoreSuit { suit: Suit },
}

impl ScalingTrigger {
    pub fn fires(&self, played: &[Card], debuffed_suit: Option<Suit>) -> bool {
        match self {
            ScalingTrigger::ScoreSuit { suit } => played
                .iter()
                .any(|card| card.suit == *suit && debuffed_suit != Some(card.suit)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JokerEffect {
    FlatChips {
        value: i64,
    },
    FlatMult {
        value: f64,
    },
    ScalingMult {
        #[serde(flatten)]
        trigger: ScalingTrigger,
        value: f64,
    },
    ConditionalMult {
        #[serde(flatten)]
        condition: Condition,
        value: f64,
    },
    ConditionalChips {
        #[serde(flatten)]
        condition: Condition,
        value: i64,
    },
    #[serde(rename = "conditional_xmult")]
    ConditionalXMult {
        #[serde(flatten)]
        condition: Condition,
        value: f64,
    },
    MoneyPerHand {
        value: i64,
    },
}

impl JokerEffect {
    pub fn is_scaling(&self) -> bool {
        matches!(self, JokerEffect::ScalingMult { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TarotEffect {
    EnhanceCard {
        enhancement: EnhancementKind,
        value: i64,
        targets: usize,
    },
    /// First target takes the suit of the second.
    ConvertSuit,
    ApplyEdition {
        edition: Edition,
        targets: usize,
    },
    ApplySeal {
        seal: Seal,
        targets: usize,
    },
    GainMoney {
        value: i64,
    },
    CreateLastConsumable,
}

impl TarotEffect {
    pub fn targets(&self) -> usize {
        match self {
            TarotEffect::EnhanceCard { targets, .. }
            | TarotEffect::ApplyEdition { targets, .. }
            | TarotEffect::ApplySeal { targets, .. } => *targets,
            TarotEffect::ConvertSuit => 2,
            TarotEffect::GainMoney { .. } | TarotEffect::CreateLastConsumable => 0,
        }
    }

    pub fn requires_target(&self) -> bool {
        self.targets() > 0
    }

    /// Stamps the effect onto `targets`, given in selection order. Editions
    /// and seals overwrite whatever the card carried before.
    pub fn apply_to_targets(&self, targets: &mut [Card]) {
        match self {
            TarotEffect::EnhanceCard {
                enhancement, value, ..
            } => {
                for card in targets.iter_mut() {
                    card.enhancement = Some(Enhancement {
                        kind: *enhancement,
                        value: *value,
                    });
                }
            }
            TarotEffect::ConvertSuit => {
                if let [first, second, ..] = targets {
                    first.suit = second.suit;
                }
            }
            TarotEffect::ApplyEdition { edition, .. } => {
                for card in targets.iter_mut() {
                    card.edition = Some(*edition);
                }
            }
            TarotEffect::ApplySeal { seal, .. } => {
                for card in targets.iter_mut() {
                    card.seal = Some(*seal);
                }
            }
            TarotEffect::GainMoney { .. } | TarotEffect::CreateLastConsumable => {}
        }
    }
}
