use crate::{BlindKind, CardId, HandKind, ShopOfferRef, Suit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RoundStarted {
        ante: u32,
        blind: BlindKind,
        target: i64,
        hands: u32,
        discards: u32,
        debuffed_suit: Option<Suit>,
    },
    CardsDrawn {
        count: usize,
    },
    HandScored {
        hand: HandKind,
        level: u32,
        chips: i64,
        mult: f64,
        total: i64,
    },
    CardsDiscarded {
        count: usize,
    },
    JokerScaled {
        id: String,
        value: f64,
    },
    HandLeveled {
        hand: HandKind,
        level: u32,
    },
    TargetingStarted {
        tarot: String,
        needed: usize,
    },
    TargetSelected {
        card: CardId,
    },
    TargetingCancelled {
        tarot: String,
    },
    ConsumableUsed {
        id: String,
    },
    ConsumableGranted {
        id: String,
    },
    RoundWon {
        score: i64,
        reward: i64,
        interest: i64,
        hand_bonus: i64,
        money: i64,
    },
    RoundLost {
        score: i64,
        target: i64,
    },
    ShopEntered {
        reroll_cost: i64,
    },
    ShopRerolled {
        cost: i64,
        money: i64,
    },
    ItemPurchased {
        offer: ShopOfferRef,
        id: String,
        cost: i64,
        money: i64,
    },
    JokerSold {
        id: String,
        price: i64,
        money: i64,
    },
    CardsAdded {
        count: usize,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
