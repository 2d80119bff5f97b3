use crate::{Card, Rank, Suit};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Poker-hand categories, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandKind {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    FiveOfAKind,
}

impl HandKind {
    pub const ALL: [HandKind; 10] = [
        HandKind::HighCard,
        HandKind::Pair,
        HandKind::TwoPair,
        HandKind::ThreeOfAKind,
        HandKind::Straight,
        HandKind::Flush,
        HandKind::FullHouse,
        HandKind::FourOfAKind,
        HandKind::StraightFlush,
        HandKind::FiveOfAKind,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandKind::HighCard => "high_card",
            HandKind::Pair => "pair",
            HandKind::TwoPair => "two_pair",
            HandKind::ThreeOfAKind => "three_of_a_kind",
            HandKind::Straight => "straight",
            HandKind::Flush => "flush",
            HandKind::FullHouse => "full_house",
            HandKind::FourOfAKind => "four_of_a_kind",
            HandKind::StraightFlush => "straight_flush",
            HandKind::FiveOfAKind => "five_of_a_kind",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HandKind::HighCard => "High Card",
            HandKind::Pair => "Pair",
            HandKind::TwoPair => "Two Pair",
            HandKind::ThreeOfAKind => "Three of a Kind",
            HandKind::Straight => "Straight",
            HandKind::Flush => "Flush",
            HandKind::FullHouse => "Full House",
            HandKind::FourOfAKind => "Four of a Kind",
            HandKind::StraightFlush => "Straight Flush",
            HandKind::FiveOfAKind => "Five of a Kind",
        }
    }

    /// Categories that only exist with exactly five cards.
    pub fn requires_five(self) -> bool {
        matches!(
            self,
            HandKind::Straight | HandKind::Flush | HandKind::StraightFlush
        )
    }
}

/// Persistent per-category levels. Every category starts at level 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandLevels {
    levels: HashMap<HandKind, u32>,
}

impl HandLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, kind: HandKind) -> u32 {
        self.levels.get(&kind).copied().unwrap_or(1)
    }

    pub fn level_up(&mut self, kind: HandKind) -> u32 {
        let entry = self.levels.entry(kind).or_insert(1);
        *entry = entry.saturating_add(1);
        *entry
    }
}

/// Classifies `cards` top-down, returning the first category that matches.
pub fn evaluate_hand(cards: &[Card]) -> HandKind {
    if cards.is_empty() {
        return HandKind::HighCard;
    }

    let len = cards.len();
    let mut rank_counts: HashMap<Rank, usize> = HashMap::new();
    for card in cards {
        *rank_counts.entry(card.rank).or_insert(0) += 1;
    }
    let mut counts: Vec<usize> = rank_counts.values().copied().collect();
    counts.sort_by(|a, b| b.cmp(a));
    let first = counts.first().copied().unwrap_or(0);
    let second = counts.get(1).copied().unwrap_or(0);

    let flush = is_flush(cards);
    let straight = is_straight(cards);

    if first == 5 {
        return HandKind::FiveOfAKind;
    }
    if flush && straight && len == 5 {
        return HandKind::StraightFlush;
    }
    if first == 4 {
        return HandKind::FourOfAKind;
    }
    if first == 3 && second == 2 {
        return HandKind::FullHouse;
    }
    if flush && len == 5 {
        return HandKind::Flush;
    }
    if straight && len == 5 {
        return HandKind::Straight;
    }
    if first == 3 {
        return HandKind::ThreeOfAKind;
    }
    if first == 2 && second == 2 {
        return HandKind::TwoPair;
    }
    if first == 2 {
        return HandKind::Pair;
    }
    HandKind::HighCard
}

/// True when every card shares one suit. Card count is gated by the caller.
pub fn is_flush(cards: &[Card]) -> bool {
    let Some(first) = cards.first() else {
        return false;
    };
    let suit: Suit = first.suit;
    cards.iter().all(|card| card.suit == suit)
}

/// Any five consecutive distinct ranks, or the ace-low run A-2-3-4-5.
/// The ace never wraps past the king.
pub fn is_straight(cards: &[Card]) -> bool {
    if cards.len() < 5 {
        return false;
    }
    let distinct: BTreeSet<u8> = cards.iter().map(|card| card.rank.order()).collect();
    if distinct.len() < 5 {
        return false;
    }
    let values: Vec<u8> = distinct.iter().copied().collect();
    if values
        .windows(5)
        .any(|window| window[4] - window[0] == 4)
    {
        return true;
    }
    [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]
        .iter()
        .all(|rank| distinct.contains(&rank.order()))
}
