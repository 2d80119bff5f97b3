use serde::{Deserialize, Serialize};

/// Running totals of a scoring pass. `mult` is the additive multiplier and
/// `x_mult` the product of every multiplicative bonus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Score {
    pub chips: i64,
    pub mult: f64,
    pub x_mult: f64,
}

impl Default for Score {
    fn default() -> Self {
        Self::new(0, 0.0)
    }
}

impl Score {
    pub fn new(chips: i64, mult: f64) -> Self {
        Self {
            chips,
            mult,
            x_mult: 1.0,
        }
    }

    pub fn total_raw(&self) -> f64 {
        self.chips as f64 * self.mult * self.x_mult
    }

    /// Floors exactly once, at the end.
    pub fn total(&self) -> i64 {
        self.total_raw().floor().max(0.0) as i64
    }

    pub fn apply(&mut self, effect: &RuleEffect) {
        match effect {
            RuleEffect::AddChips(value) => self.chips += value,
            RuleEffect::AddMult(value) => self.mult += value,
            RuleEffect::MultiplyMult(value) => self.x_mult *= value,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum RuleEffect {
    AddChips(i64),
    AddMult(f64),
    MultiplyMult(f64),
}

/// One named contribution. `effect` is `None` when a conditional bonus missed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreTraceStep {
    pub source: String,
    pub effect: Option<RuleEffect>,
    pub before: Score,
    pub after: Score,
}

impl ScoreTraceStep {
    pub fn is_miss(&self) -> bool {
        self.effect.is_none()
    }
}
