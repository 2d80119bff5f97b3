use crate::Content;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoucherEffect {
    IncreaseHandSize { value: u32 },
    IncreaseDiscards { value: u32 },
    /// One free shop reroll per visit.
    FreeReroll,
}

/// Run limits derived from the purchased voucher set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedLimits {
    pub hand_size: usize,
    pub discards: u32,
    pub free_reroll: bool,
}

/// Folds every purchased voucher over the base limits. Vouchers are flat
/// additions, so the result does not depend on purchase order. Unknown ids
/// contribute nothing.
pub fn recompute_limits(
    base_hand_size: usize,
    base_discards: u32,
    purchased: &[String],
    content: &Content,
) -> DerivedLimits {
    purchased
        .iter()
        .filter_map(|id| content.voucher(id))
        .fold(
            DerivedLimits {
                hand_size: base_hand_size,
                discards: base_discards,
                free_reroll: false,
            },
            |mut limits, voucher| {
                match voucher.effect {
                    VoucherEffect::IncreaseHandSize { value } => {
                        limits.hand_size = limits.hand_size.saturating_add(value as usize);
                    }
                    VoucherEffect::IncreaseDiscards { value } => {
                        limits.discards = limits.discards.saturating_add(value);
                    }
                    VoucherEffect::FreeReroll => limits.free_reroll = true,
                }
                limits
            },
        )
}
