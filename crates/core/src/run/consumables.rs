use super::*;
use crate::*;
use log::{debug, info};

impl RunState {
    /// Uses the tarot in consumable slot `slot`. Targeted tarots enter
    /// targeting and are only consumed once enough cards are picked.
    pub fn use_consumable(
        &mut self,
        slot: usize,
        events: &mut EventBus,
    ) -> Result<EngineState, RunError> {
        self.ensure_phase(&[Phase::Play, Phase::Cleared, Phase::Shop])?;
        self.ensure_idle()?;
        let id = self
            .inventory
            .consumable(slot)
            .map(|item| item.id.clone())
            .ok_or(RunError::InvalidSlot(slot))?;
        let effect = self
            .content
            .tarot(&id)
            .map(|tarot| tarot.effect.clone())
            .ok_or_else(|| RunError::UnknownItem(id.clone()))?;

        if effect.requires_target() {
            if self.hand.len() < effect.targets() {
                return Err(RunError::InvalidCardCount);
            }
            let needed = effect.targets();
            self.targeting.begin(id.clone(), effect, slot);
            events.push(Event::TargetingStarted { tarot: id, needed });
            return Ok(self.engine_state());
        }

        match effect {
            TarotEffect::GainMoney { value } => {
                self.inventory.remove_consumable(slot)?;
                self.state.money += value;
                self.state.last_tarot = Some(id.clone());
                info!("{id}: +${value} (money ${})", self.state.money);
            }
            TarotEffect::CreateLastConsumable => {
                let copied = self.state.last_tarot.clone().ok_or(RunError::NothingToCopy)?;
                self.inventory.remove_consumable(slot)?;
                self.inventory.add_consumable(copied.clone())?;
                info!("{id} recreated {copied}");
                events.push(Event::ConsumableGranted { id: copied });
            }
            // Every other variant needs targets and returned above.
            _ => {}
        }
        events.push(Event::ConsumableUsed { id });
        Ok(EngineState::Ready)
    }

    /// Adds a target to the active session and applies the tarot once the
    /// session has enough cards. A card missing from the hand aborts the
    /// session; the tarot stays in its slot.
    pub fn select_target(
        &mut self,
        card_id: CardId,
        events: &mut EventBus,
    ) -> Result<EngineState, RunError> {
        if self.targeting.is_idle() {
            return Err(RunError::NotTargeting);
        }
        if !self.hand.iter().any(|card| card.id == card_id) {
            if let Some(session) = self.targeting.cancel() {
                events.push(Event::TargetingCancelled {
                    tarot: session.tarot,
                });
            }
            return Err(RunError::InvalidTarget(card_id));
        }
        match self.targeting.select(card_id) {
            Some(SelectOutcome::Complete(session)) => {
                events.push(Event::TargetSelected { card: card_id });
                self.finish_targeting(session, events)?;
            }
            Some(SelectOutcome::Pending) => events.push(Event::TargetSelected { card: card_id }),
            Some(SelectOutcome::Duplicate) => debug!("card {card_id} already targeted"),
            None => return Err(RunError::NotTargeting),
        }
        Ok(self.engine_state())
    }

    pub fn cancel_targeting(&mut self, events: &mut EventBus) -> Result<EngineState, RunError> {
        let session = self.targeting.cancel().ok_or(RunError::NotTargeting)?;
        events.push(Event::TargetingCancelled {
            tarot: session.tarot,
        });
        Ok(EngineState::Ready)
    }

    fn finish_targeting(
        &mut self,
        session: TargetingSession,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        let mut indices = Vec::with_capacity(session.selected.len());
        for id in &session.selected {
            let idx = self
                .hand
                .iter()
                .position(|card| card.id == *id)
                .ok_or(RunError::InvalidTarget(*id))?;
            indices.push(idx);
        }
        if self.inventory.consumable(session.source_slot).map(|item| &item.id)
            != Some(&session.tarot)
        {
            return Err(RunError::InvalidSlot(session.source_slot));
        }

        let mut targets: Vec<Card> = indices.iter().map(|&idx| self.hand[idx]).collect();
        session.effect.apply_to_targets(&mut targets);
        for (idx, card) in indices.into_iter().zip(targets) {
            self.hand[idx] = card;
        }
        self.inventory.remove_consumable(session.source_slot)?;
        self.state.last_tarot = Some(session.tarot.clone());
        info!("{} applied to {:?}", session.tarot, session.selected);
        events.push(Event::ConsumableUsed { id: session.tarot });
        Ok(())
    }

    /// Applies a planet straight away, raising its category by one level.
    pub fn use_planet(&mut self, planet_id: &str, events: &mut EventBus) -> Result<u32, RunError> {
        let hand = self
            .content
            .planet(planet_id)
            .map(|planet| planet.target_hand)
            .ok_or_else(|| RunError::UnknownItem(planet_id.to_string()))?;
        Ok(self.level_up_hand(planet_id, hand, events))
    }

    pub(super) fn level_up_hand(
        &mut self,
        planet_id: &str,
        hand: HandKind,
        events: &mut EventBus,
    ) -> u32 {
        let level = self.state.hand_levels.level_up(hand);
        info!("{planet_id}: {} now level {level}", hand.display_name());
        events.push(Event::HandLeveled { hand, level });
        level
    }
}
