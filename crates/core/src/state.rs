use crate::{HandLevels, Suit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Play,
    /// Round won, waiting for the shop.
    Cleared,
    Shop,
    GameOver,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlindKind {
    Small,
    Big,
    Boss,
}

impl BlindKind {
    /// Position within the ante, starting at 0.
    pub fn index(self) -> u32 {
        match self {
            BlindKind::Small => 0,
            BlindKind::Big => 1,
            BlindKind::Boss => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            BlindKind::Small => BlindKind::Big,
            BlindKind::Big => BlindKind::Boss,
            BlindKind::Boss => BlindKind::Small,
        }
    }
}

/// Boss-round rule zeroing the base chips of one suit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BossDebuff {
    pub boss_id: String,
    pub name: String,
    pub suit: Suit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub ante: u32,
    pub blind: BlindKind,
    pub phase: Phase,
    pub target: i64,
    pub round_score: i64,
    pub hands_left: u32,
    pub discards_left: u32,
    pub hand_size: usize,
    pub discard_allowance: u32,
    pub money: i64,
    #[serde(default)]
    pub hand_levels: HandLevels,
    #[serde(default)]
    pub purchased_vouchers: Vec<String>,
    #[serde(default)]
    pub boss_debuff: Option<BossDebuff>,
    /// Last tarot used, other than the copying one.
    #[serde(default)]
    pub last_tarot: Option<String>,
    #[serde(default)]
    pub free_reroll: bool,
}

impl GameState {
    pub fn new(money: i64, hand_size: usize, discards: u32) -> Self {
        Self {
            ante: 1,
            blind: BlindKind::Small,
            phase: Phase::Setup,
            target: 0,
            round_score: 0,
            hands_left: 0,
            discards_left: 0,
            hand_size,
            discard_allowance: discards,
            money,
            hand_levels: HandLevels::new(),
            purchased_vouchers: Vec::new(),
            boss_debuff: None,
            last_tarot: None,
            free_reroll: false,
        }
    }

    pub fn debuffed_suit(&self) -> Option<Suit> {
        self.boss_debuff.as_ref().map(|debuff| debuff.suit)
    }

    /// Moves to the next blind, bumping the ante after a boss up to `max_ante`.
    pub fn advance_blind(&mut self, max_ante: u32) {
        if self.blind == BlindKind::Boss && self.ante < max_ante {
            self.ante += 1;
        }
        self.blind = self.blind.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blinds_cycle_and_ante_caps() {
        let mut state = GameState::new(10, 8, 3);
        state.advance_blind(2);
        assert_eq!(state.blind, BlindKind::Big);
        state.advance_blind(2);
        state.advance_blind(2);
        assert_eq!((state.ante, state.blind), (2, BlindKind::Small));
        state.blind = BlindKind::Boss;
        state.advance_blind(2);
        assert_eq!((state.ante, state.blind), (2, BlindKind::Small));
    }
}
