use crate::{CardId, TarotEffect};
use log::debug;
use serde::{Deserialize, Serialize};

/// Selection flow for tarots that act on cards in hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum TargetingState {
    #[default]
    Idle,
    Targeting(TargetingSession),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetingSession {
    pub tarot: String,
    pub effect: TarotEffect,
    pub needed: usize,
    pub selected: Vec<CardId>,
    /// Consumable slot the tarot is removed from on completion.
    pub source_slot: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// Still waiting for more targets.
    Pending,
    /// The card was already selected; nothing changed.
    Duplicate,
    /// Enough targets; the session has ended and these are the picks.
    Complete(TargetingSession),
}

impl TargetingState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TargetingState::Idle)
    }

    pub fn session(&self) -> Option<&TargetingSession> {
        match self {
            TargetingState::Idle => None,
            TargetingState::Targeting(session) => Some(session),
        }
    }

    pub fn begin(&mut self, tarot: String, effect: TarotEffect, source_slot: usize) {
        let needed = effect.targets();
        debug!("targeting {tarot}: {needed} card(s) from slot {source_slot}");
        *self = TargetingState::Targeting(TargetingSession {
            tarot,
            effect,
            needed,
            selected: Vec::with_capacity(needed),
            source_slot,
        });
    }

    /// Records one target. Returns `None` when idle.
    pub fn select(&mut self, card: CardId) -> Option<SelectOutcome> {
        let TargetingState::Targeting(session) = self else {
            return None;
        };
        if session.selected.contains(&card) {
            return Some(SelectOutcome::Duplicate);
        }
        session.selected.push(card);
        if session.selected.len() < session.needed {
            return Some(SelectOutcome::Pending);
        }
        match std::mem::take(self) {
            TargetingState::Targeting(session) => Some(SelectOutcome::Complete(session)),
            TargetingState::Idle => None,
        }
    }

    /// Drops partial selections. Returns the abandoned session, if any.
    pub fn cancel(&mut self) -> Option<TargetingSession> {
        match std::mem::take(self) {
            TargetingState::Targeting(session) => {
                debug!("targeting {} cancelled", session.tarot);
                Some(session)
            }
            TargetingState::Idle => None,
        }
    }
}
