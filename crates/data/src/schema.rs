pub use cardrun_core::{
    BossDef, CardOdds, Content, EconomyRule, GameConfig, HandRule, InventoryRule, JokerDef,
    PackDef, PlanetDef, RankRule, RoundRule, ShopRule, TarotDef, VoucherDef,
};
