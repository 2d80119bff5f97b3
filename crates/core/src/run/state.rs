use super::*;
use crate::*;

impl RunState {
    pub fn new(config: GameConfig, content: Content, seed: u64) -> Self {
        let mut rng = RngState::from_seed(seed);
        let mut deck = Deck::standard52();
        deck.shuffle(&mut rng);
        let next_card_id = deck.total() as CardId + 1;
        let total_cards = deck.total();
        let tables = ScoreTables::from_config(&config);
        let inventory = Inventory::with_slots(
            config.inventory.joker_slots,
            config.inventory.consumable_slots,
        );
        let state = GameState::new(
            config.economy.starting_money,
            config.round.base_hand_size,
            config.round.base_discards,
        );
        let mut run = Self {
            config,
            tables,
            content,
            inventory,
            rng,
            deck,
            hand: Vec::new(),
            state,
            shop: None,
            targeting: TargetingState::Idle,
            next_card_id,
            total_cards,
        };
        run.recompute_derived_limits();
        run
    }

    /// Re-derives hand size, discard allowance and the free-reroll flag from
    /// the full voucher set.
    pub fn recompute_derived_limits(&mut self) -> DerivedLimits {
        let limits = recompute_limits(
            self.config.round.base_hand_size,
            self.config.round.base_discards,
            &self.state.purchased_vouchers,
            &self.content,
        );
        self.state.hand_size = limits.hand_size;
        self.state.discard_allowance = limits.discards;
        self.state.free_reroll = limits.free_reroll;
        limits
    }

    /// Size of the run's card population across deck, hand and discard pile.
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Cards actually present right now; equal to `total_cards` between calls.
    pub fn card_count(&self) -> usize {
        self.deck.total() + self.hand.len()
    }

    pub fn is_ready(&self) -> bool {
        self.targeting.is_idle()
    }

    pub fn engine_state(&self) -> EngineState {
        match self.targeting.session() {
            None => EngineState::Ready,
            Some(session) => EngineState::Targeting {
                tarot: session.tarot.clone(),
                needed: session.needed,
                selected: session.selected.clone(),
            },
        }
    }

    pub(super) fn alloc_card_id(&mut self) -> CardId {
        let id = self.next_card_id;
        self.next_card_id = self.next_card_id.saturating_add(1);
        id
    }

    /// Gives `card` a fresh id and puts it on the draw pile.
    pub(super) fn add_card_to_deck(&mut self, mut card: Card) -> CardId {
        card.id = self.alloc_card_id();
        self.deck.draw.push(card);
        self.total_cards += 1;
        card.id
    }

    pub(super) fn ensure_phase(&self, allowed: &[Phase]) -> Result<(), RunError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(RunError::InvalidPhase(self.state.phase))
        }
    }

    pub(super) fn ensure_idle(&self) -> Result<(), RunError> {
        if self.targeting.is_idle() {
            Ok(())
        } else {
            Err(RunError::TargetingActive)
        }
    }

    pub(super) fn ensure_funds(&self, cost: i64) -> Result<(), RunError> {
        if self.state.money < cost {
            return Err(RunError::InsufficientFunds {
                needed: cost,
                available: self.state.money,
            });
        }
        Ok(())
    }

    /// Checks a play/discard selection against the hand.
    pub(super) fn validate_selection(&self, card_ids: &[CardId]) -> Result<(), RunError> {
        if card_ids.is_empty() {
            return Err(RunError::InvalidHand(InvalidHandReason::EmptySelection));
        }
        let max = self.config.round.max_select;
        if card_ids.len() > max {
            return Err(RunError::InvalidHand(InvalidHandReason::TooManyCards {
                selected: card_ids.len(),
                max,
            }));
        }
        for (idx, id) in card_ids.iter().enumerate() {
            if card_ids[..idx].contains(id) {
                return Err(RunError::InvalidHand(InvalidHandReason::DuplicateCard(*id)));
            }
            if !self.hand.iter().any(|card| card.id == *id) {
                return Err(RunError::InvalidHand(InvalidHandReason::UnknownCard(*id)));
            }
        }
        Ok(())
    }

    /// Splits the hand into selected cards and the rest, both in hand order.
    pub(super) fn take_selected(&mut self, card_ids: &[CardId]) -> Vec<Card> {
        let (selected, kept): (Vec<Card>, Vec<Card>) = std::mem::take(&mut self.hand)
            .into_iter()
            .partition(|card| card_ids.contains(&card.id));
        self.hand = kept;
        selected
    }
}
