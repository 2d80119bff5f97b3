use crate::{
    Card, CardId, Content, Deck, GameConfig, GameState, HandKind, Inventory, InventoryError,
    Phase, RngState, ScoreBreakdown, ScoreTables, ShopOfferRef, ShopState, SlotKind,
    TargetingState,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod consumables;
mod hand;
mod round;
mod shop;
mod state;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidHandReason {
    EmptySelection,
    TooManyCards { selected: usize, max: usize },
    UnknownCard(CardId),
    DuplicateCard(CardId),
    /// A five-card-only category resolved from a selection of another size.
    CategoryNeedsFive(HandKind),
}

#[derive(Debug, Error, PartialEq)]
pub enum RunError {
    #[error("invalid hand: {0:?}")]
    InvalidHand(InvalidHandReason),
    #[error("no hands left")]
    NoHandsLeft,
    #[error("no discards left")]
    NoDiscardsLeft,
    #[error("not enough money: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },
    #[error("{0:?} slots full")]
    SlotsFull(SlotKind),
    #[error("card {0} is not in hand")]
    InvalidTarget(CardId),
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("targeting in progress")]
    TargetingActive,
    #[error("not targeting")]
    NotTargeting,
    #[error("invalid slot {0}")]
    InvalidSlot(usize),
    #[error("invalid shop offer")]
    InvalidOffer,
    #[error("voucher {0} already owned")]
    VoucherOwned(String),
    #[error("no tarot to copy")]
    NothingToCopy,
    #[error("unknown item {0}")]
    UnknownItem(String),
    #[error("not enough cards in hand")]
    InvalidCardCount,
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),
}

/// What the caller sees after an engine call: ready for input, or mid-selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Targeting {
        tarot: String,
        needed: usize,
        selected: Vec<CardId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashOut {
    pub reward: i64,
    pub interest: i64,
    pub hand_bonus: i64,
    pub gold_seals: i64,
    pub planets: usize,
}

impl CashOut {
    pub fn total(&self) -> i64 {
        self.reward + self.interest + self.hand_bonus + self.gold_seals
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    InProgress,
    Won(CashOut),
    Lost,
}

#[derive(Debug, Clone)]
pub struct PlayOutcome {
    pub hand: HandKind,
    pub level: u32,
    pub score: i64,
    pub money_delta: i64,
    pub breakdown: ScoreBreakdown,
    pub drawn: usize,
    pub status: RoundStatus,
}

#[derive(Debug, Clone)]
pub struct DiscardOutcome {
    pub discarded: Vec<Card>,
    pub drawn: usize,
    pub consumables_granted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RosterChange {
    JokerAdded { slot: usize, id: String },
    VoucherAdded { id: String },
    PlanetApplied { id: String, hand: HandKind, level: u32 },
    TarotAdded { id: String },
    CardsAdded { ids: Vec<CardId> },
    /// The pack's pool was empty.
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub offer: ShopOfferRef,
    pub money_delta: i64,
    pub roster_change: RosterChange,
}

#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub tables: ScoreTables,
    pub content: Content,
    pub inventory: Inventory,
    pub rng: RngState,
    pub deck: Deck,
    pub hand: Vec<Card>,
    pub state: GameState,
    pub shop: Option<ShopState>,
    pub targeting: TargetingState,
    next_card_id: CardId,
    total_cards: usize,
}
