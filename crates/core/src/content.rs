use crate::{HandKind, JokerEffect, RngState, TarotEffect, VoucherEffect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JokerDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: i64,
    pub effect: JokerEffect,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TarotDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: i64,
    pub effect: TarotEffect,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanetDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: i64,
    pub target_hand: HandKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoucherDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: i64,
    pub effect: VoucherEffect,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PackKind {
    Celestial,
    Arcana,
    Standard,
    Buffoon,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: i64,
    pub kind: PackKind,
    pub contains: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BossEffect {
    /// Zeroes the base chips of one suit, picked when the round starts.
    DebuffSuit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BossDef {
    pub id: String,
    pub name: String,
    pub effect: BossEffect,
}

/// The static item catalog. Items are plain data interpreted by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default)]
    pub jokers: Vec<JokerDef>,
    #[serde(default)]
    pub tarots: Vec<TarotDef>,
    #[serde(default)]
    pub planets: Vec<PlanetDef>,
    #[serde(default)]
    pub vouchers: Vec<VoucherDef>,
    #[serde(default)]
    pub packs: Vec<PackDef>,
    #[serde(default)]
    pub bosses: Vec<BossDef>,
}

impl Content {
    pub fn joker(&self, id: &str) -> Option<&JokerDef> {
        self.jokers.iter().find(|joker| joker.id == id)
    }

    pub fn tarot(&self, id: &str) -> Option<&TarotDef> {
        self.tarots.iter().find(|tarot| tarot.id == id)
    }

    pub fn planet(&self, id: &str) -> Option<&PlanetDef> {
        self.planets.iter().find(|planet| planet.id == id)
    }

    pub fn voucher(&self, id: &str) -> Option<&VoucherDef> {
        self.vouchers.iter().find(|voucher| voucher.id == id)
    }

    pub fn pack(&self, kind: PackKind) -> Option<&PackDef> {
        self.packs.iter().find(|pack| pack.kind == kind)
    }

    pub fn pick_tarot<'a>(&'a self, rng: &mut RngState) -> Option<&'a TarotDef> {
        rng.index(self.tarots.len()).map(|idx| &self.tarots[idx])
    }

    pub fn pick_planet<'a>(&'a self, rng: &mut RngState) -> Option<&'a PlanetDef> {
        rng.index(self.planets.len()).map(|idx| &self.planets[idx])
    }

    pub fn pick_boss<'a>(&'a self, rng: &mut RngState) -> Option<&'a BossDef> {
        rng.index(self.bosses.len()).map(|idx| &self.bosses[idx])
    }

    /// A random joker whose id is not in `owned`.
    pub fn pick_joker<'a>(&'a self, owned: &[&str], rng: &mut RngState) -> Option<&'a JokerDef> {
        let indices: Vec<usize> = self
            .jokers
            .iter()
            .enumerate()
            .filter(|(_, joker)| !owned.contains(&joker.id.as_str()))
            .map(|(idx, _)| idx)
            .collect();
        pick_index(&indices, rng).map(|idx| &self.jokers[idx])
    }

    /// A random voucher that has not been purchased yet.
    pub fn pick_voucher<'a>(
        &'a self,
        purchased: &[String],
        rng: &mut RngState,
    ) -> Option<&'a VoucherDef> {
        let indices: Vec<usize> = self
            .vouchers
            .iter()
            .enumerate()
            .filter(|(_, voucher)| !purchased.contains(&voucher.id))
            .map(|(idx, _)| idx)
            .collect();
        pick_index(&indices, rng).map(|idx| &self.vouchers[idx])
    }
}

fn pick_index(indices: &[usize], rng: &mut RngState) -> Option<usize> {
    rng.index(indices.len()).map(|pos| indices[pos])
}
