use crate::{Card, CardId, Rank, RngState, Suit};
use log::debug;

/// Draw pile and discard pile. The top of each pile is the end of its vector.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    /// One card per (suit, rank) pair, ids `1..=52`, unshuffled.
    pub fn standard52() -> Self {
        let mut draw = Vec::with_capacity(52);
        let mut next_id: CardId = 1;
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                draw.push(Card::standard(suit, rank).with_id(next_id));
                next_id += 1;
            }
        }
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    /// Draws up to `count` cards. When the draw pile runs out the discard pile is
    /// shuffled back in once; if both are exhausted the result is simply short.
    pub fn draw(&mut self, count: usize, rng: &mut RngState) -> Vec<Card> {
        let mut cards = self.take_top(count);
        if cards.len() < count && !self.discard.is_empty() {
            self.reshuffle_discard(rng);
            let mut rest = self.take_top(count - cards.len());
            cards.append(&mut rest);
        }
        cards
    }

    pub fn discard(&mut self, mut cards: Vec<Card>) {
        self.discard.append(&mut cards);
    }

    pub fn reshuffle_discard(&mut self, rng: &mut RngState) {
        if self.discard.is_empty() {
            return;
        }
        debug!(
            "reshuffling {} discarded cards into a draw pile of {}",
            self.discard.len(),
            self.draw.len()
        );
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
    }

    /// Moves `cards` and the whole discard pile back into the draw pile and shuffles.
    pub fn gather(&mut self, mut cards: Vec<Card>, rng: &mut RngState) {
        self.draw.append(&mut cards);
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
    }

    pub fn total(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    fn take_top(&mut self, count: usize) -> Vec<Card> {
        let split = self.draw.len().saturating_sub(count);
        let mut cards = self.draw.split_off(split);
        cards.reverse();
        cards
    }
}
