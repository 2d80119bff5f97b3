use crate::{BlindKind, HandKind, Rank};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRule {
    pub kind: HandKind,
    pub base_chips: i64,
    pub base_mult: f64,
    #[serde(default)]
    pub level_chips: i64,
    #[serde(default)]
    pub level_mult: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRule {
    pub rank: Rank,
    pub chips: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRule {
    pub base_hand_size: usize,
    pub base_hands: u32,
    pub base_discards: u32,
    pub max_select: usize,
    pub max_ante: u32,
    pub target_per_ante: i64,
    pub target_round_step: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyRule {
    pub starting_money: i64,
    pub reward_base: i64,
    pub interest_step: i64,
    pub interest_cap: i64,
    pub per_hand_reward: i64,
    pub gold_seal_money: i64,
    pub joker_sell_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopRule {
    pub joker_offers: usize,
    pub reroll_base: i64,
    pub reroll_step: i64,
    /// Chance that the second pack slot holds a Buffoon pack instead of a Standard one.
    pub buffoon_pack_chance: f64,
}

/// Independent per-card rolls used when packs create playing cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardOdds {
    pub polychrome: f64,
    pub holographic: f64,
    pub foil: f64,
    pub seal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRule {
    pub joker_slots: usize,
    pub consumable_slots: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub hands: Vec<HandRule>,
    #[serde(default)]
    pub ranks: Vec<RankRule>,
    pub round: RoundRule,
    pub economy: EconomyRule,
    pub shop: ShopRule,
    pub odds: CardOdds,
    pub inventory: InventoryRule,
}

impl GameConfig {
    pub fn hand_rule(&self, kind: HandKind) -> Option<&HandRule> {
        self.hands.iter().find(|rule| rule.kind == kind)
    }

    /// `target_per_ante * ante + target_round_step * round_index * ante`.
    pub fn target_for(&self, ante: u32, blind: BlindKind) -> i64 {
        let ante = ante as i64;
        let round = blind.index() as i64;
        self.round.target_per_ante * ante + self.round.target_round_step * round * ante
    }

    pub fn reward_for(&self, ante: u32, blind: BlindKind) -> i64 {
        self.economy.reward_base + ante as i64 + blind.index() as i64
    }

    pub fn interest_for(&self, money: i64) -> i64 {
        if self.economy.interest_step <= 0 || money <= 0 {
            return 0;
        }
        (money / self.economy.interest_step).min(self.economy.interest_cap)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let hands = HandKind::ALL
            .into_iter()
            .map(|kind| {
                let (base_chips, base_mult) = default_hand_base(kind);
                HandRule {
                    kind,
                    base_chips,
                    base_mult,
                    level_chips: 10,
                    level_mult: 2.0,
                }
            })
            .collect();
        let ranks = Rank::ALL
            .into_iter()
            .map(|rank| RankRule {
                rank,
                chips: rank.base_chips(),
            })
            .collect();
        Self {
            hands,
            ranks,
            round: RoundRule {
                base_hand_size: 8,
                base_hands: 4,
                base_discards: 3,
                max_select: 5,
                max_ante: 8,
                target_per_ante: 100,
                target_round_step: 50,
            },
            economy: EconomyRule {
                starting_money: 10,
                reward_base: 4,
                interest_step: 5,
                interest_cap: 5,
                per_hand_reward: 1,
                gold_seal_money: 3,
                joker_sell_price: 1,
            },
            shop: ShopRule {
                joker_offers: 2,
                reroll_base: 1,
                reroll_step: 1,
                buffoon_pack_chance: 0.5,
            },
            odds: CardOdds {
                polychrome: 0.02,
                holographic: 0.05,
                foil: 0.10,
                seal: 0.05,
            },
            inventory: InventoryRule {
                joker_slots: 5,
                consumable_slots: 2,
            },
        }
    }
}

pub fn default_hand_base(kind: HandKind) -> (i64, f64) {
    match kind {
        HandKind::HighCard => (5, 1.0),
        HandKind::Pair => (10, 2.0),
        HandKind::TwoPair => (20, 2.0),
        HandKind::ThreeOfAKind => (30, 3.0),
        HandKind::Straight => (30, 4.0),
        HandKind::Flush => (35, 4.0),
        HandKind::FullHouse => (40, 4.0),
        HandKind::FourOfAKind => (60, 7.0),
        HandKind::StraightFlush => (100, 8.0),
        HandKind::FiveOfAKind => (120, 12.0),
    }
}
