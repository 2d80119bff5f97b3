use super::*;
use crate::*;
use log::debug;

impl RunState {
    /// Tops the hand up to the current hand size. Returns the number drawn.
    pub fn draw_to_hand(&mut self, events: &mut EventBus) -> usize {
        let missing = self.state.hand_size.saturating_sub(self.hand.len());
        if missing == 0 {
            return 0;
        }
        let drawn = self.deck.draw(missing, &mut self.rng);
        let count = drawn.len();
        if count < missing {
            debug!("deck exhausted: drew {count} of {missing}");
        }
        self.hand.extend(drawn);
        events.push(Event::CardsDrawn { count });
        count
    }

    pub fn play_hand(
        &mut self,
        card_ids: &[CardId],
        events: &mut EventBus,
    ) -> Result<PlayOutcome, RunError> {
        self.ensure_phase(&[Phase::Play])?;
        self.ensure_idle()?;
        if self.state.hands_left == 0 {
            return Err(RunError::NoHandsLeft);
        }
        self.validate_selection(card_ids)?;
        let preview: Vec<Card> = self
            .hand
            .iter()
            .filter(|card| card_ids.contains(&card.id))
            .copied()
            .collect();
        let classification = classify(&preview, &self.tables, &self.state.hand_levels);
        if classification.kind.requires_five() && preview.len() != 5 {
            return Err(RunError::InvalidHand(InvalidHandReason::CategoryNeedsFive(
                classification.kind,
            )));
        }

        let mut played = self.take_selected(card_ids);
        let scaling_before: Vec<f64> = self
            .inventory
            .jokers
            .iter()
            .map(|slot| slot.as_ref().map_or(0.0, |joker| joker.current_value))
            .collect();
        let debuffed_suit = self.state.debuffed_suit();
        let breakdown = score_hand(
            &mut played,
            &classification,
            &mut self.inventory.jokers,
            &self.tables,
            debuffed_suit,
        );
        for (joker, before) in self.inventory.jokers.iter().zip(scaling_before) {
            if let Some(joker) = joker {
                if joker.current_value != before {
                    events.push(Event::JokerScaled {
                        id: joker.id.clone(),
                        value: joker.current_value,
                    });
                }
            }
        }

        self.state.money += breakdown.money_delta;
        self.state.round_score += breakdown.score;
        self.state.hands_left -= 1;
        self.deck.discard(played);
        debug!(
            "{} (level {}) scored {}; round {}/{}",
            classification.kind.display_name(),
            classification.level,
            breakdown.score,
            self.state.round_score,
            self.state.target
        );
        events.push(Event::HandScored {
            hand: breakdown.hand,
            level: breakdown.level,
            chips: breakdown.total.chips,
            mult: breakdown.total.mult * breakdown.total.x_mult,
            total: breakdown.score,
        });

        let mut drawn = 0;
        let status = if self.state.round_score >= self.state.target {
            RoundStatus::Won(self.cash_out(events))
        } else if self.state.hands_left == 0 {
            self.lose_round(events);
            RoundStatus::Lost
        } else {
            drawn = self.draw_to_hand(events);
            RoundStatus::InProgress
        };

        Ok(PlayOutcome {
            hand: breakdown.hand,
            level: breakdown.level,
            score: breakdown.score,
            money_delta: breakdown.money_delta,
            breakdown,
            drawn,
            status,
        })
    }

    pub fn discard_cards(
        &mut self,
        card_ids: &[CardId],
        events: &mut EventBus,
    ) -> Result<DiscardOutcome, RunError> {
        self.ensure_phase(&[Phase::Play])?;
        self.ensure_idle()?;
        if self.state.discards_left == 0 {
            return Err(RunError::NoDiscardsLeft);
        }
        self.validate_selection(card_ids)?;

        let mut discarded = self.take_selected(card_ids);
        let mut consumables_granted = Vec::new();
        for card in discarded.iter_mut() {
            if card.seal != Some(Seal::Purple) {
                continue;
            }
            card.seal = None;
            if !self.inventory.has_consumable_space() {
                debug!("purple seal on {card} lost: consumable slots full");
                continue;
            }
            let Some(tarot) = self.content.pick_tarot(&mut self.rng) else {
                continue;
            };
            let id = tarot.id.clone();
            self.inventory.add_consumable(id.clone())?;
            events.push(Event::ConsumableGranted { id: id.clone() });
            consumables_granted.push(id);
        }

        self.state.discards_left -= 1;
        let count = discarded.len();
        self.deck.discard(discarded.clone());
        events.push(Event::CardsDiscarded { count });
        let drawn = self.draw_to_hand(events);
        Ok(DiscardOutcome {
            discarded,
            drawn,
            consumables_granted,
        })
    }
}
