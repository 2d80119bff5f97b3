use crate::{JokerDef, JokerEffect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JokerInstance {
    /// Unique per acquisition, so two copies of one joker stay distinct.
    pub uid: u32,
    pub id: String,
    pub name: String,
    pub effect: JokerEffect,
    /// Accumulated bonus of a scaling joker; 0 for every other kind.
    #[serde(default)]
    pub current_value: f64,
}

impl JokerInstance {
    pub fn from_def(uid: u32, def: &JokerDef) -> Self {
        Self {
            uid,
            id: def.id.clone(),
            name: def.name.clone(),
            effect: def.effect.clone(),
            current_value: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsumableInstance {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotKind {
    Joker,
    Consumable,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("no joker slots")]
    NoJokerSlots,
    #[error("no consumable slots")]
    NoConsumableSlots,
    #[error("slot {0} is empty")]
    EmptySlot(usize),
}

impl InventoryError {
    pub fn slot_kind(&self) -> Option<SlotKind> {
        match self {
            InventoryError::NoJokerSlots => Some(SlotKind::Joker),
            InventoryError::NoConsumableSlots => Some(SlotKind::Consumable),
            InventoryError::EmptySlot(_) => None,
        }
    }
}

/// Joker slots keep their positions: removing a joker leaves a hole that the
/// next acquisition fills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub jokers: Vec<Option<JokerInstance>>,
    pub consumable_slots: usize,
    pub consumables: Vec<ConsumableInstance>,
    next_uid: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::with_slots(5, 2)
    }

    pub fn with_slots(joker_slots: usize, consumable_slots: usize) -> Self {
        Self {
            jokers: vec![None; joker_slots],
            consumable_slots,
            consumables: Vec::new(),
            next_uid: 1,
        }
    }

    pub fn joker_capacity(&self) -> usize {
        self.jokers.len()
    }

    pub fn joker_count(&self) -> usize {
        self.jokers.iter().flatten().count()
    }

    pub fn has_joker_space(&self) -> bool {
        self.jokers.iter().any(Option::is_none)
    }

    pub fn has_consumable_space(&self) -> bool {
        self.consumables.len() < self.consumable_slots
    }

    pub fn owned_joker_ids(&self) -> Vec<&str> {
        self.jokers
            .iter()
            .flatten()
            .map(|joker| joker.id.as_str())
            .collect()
    }

    /// Places the joker in the first empty slot and returns that slot.
    pub fn add_joker(&mut self, def: &JokerDef) -> Result<usize, InventoryError> {
        let slot = self
            .jokers
            .iter()
            .position(Option::is_none)
            .ok_or(InventoryError::NoJokerSlots)?;
        let uid = self.next_uid;
        self.next_uid += 1;
        self.jokers[slot] = Some(JokerInstance::from_def(uid, def));
        Ok(slot)
    }

    pub fn remove_joker(&mut self, slot: usize) -> Result<JokerInstance, InventoryError> {
        self.jokers
            .get_mut(slot)
            .and_then(Option::take)
            .ok_or(InventoryError::EmptySlot(slot))
    }

    pub fn add_consumable(&mut self, id: String) -> Result<(), InventoryError> {
        if !self.has_consumable_space() {
            return Err(InventoryError::NoConsumableSlots);
        }
        self.consumables.push(ConsumableInstance { id });
        Ok(())
    }

    pub fn consumable(&self, slot: usize) -> Option<&ConsumableInstance> {
        self.consumables.get(slot)
    }

    pub fn remove_consumable(&mut self, slot: usize) -> Result<ConsumableInstance, InventoryError> {
        if slot >= self.consumables.len() {
            return Err(InventoryError::EmptySlot(slot));
        }
        Ok(self.consumables.remove(slot))
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
