use crate::schema::{
    BossDef, CardOdds, Content, EconomyRule, GameConfig, HandRule, InventoryRule, JokerDef,
    PackDef, PlanetDef, RankRule, RoundRule, ShopRule, TarotDef, VoucherDef,
};
use anyhow::{bail, Context};
use cardrun_core::{HandKind, Rank, TarotEffect};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let hands: Vec<HandRule> = load_json(dir.join("hands.json"))?;
    let ranks: Vec<RankRule> = load_json(dir.join("ranks.json"))?;
    let round: RoundRule = load_json(dir.join("round.json"))?;
    let economy: EconomyRule = load_json(dir.join("economy.json"))?;
    let shop: ShopRule = load_json(dir.join("shop.json"))?;
    let odds: CardOdds = load_json(dir.join("odds.json"))?;
    let inventory: InventoryRule = load_json(dir.join("inventory.json"))?;

    let config = GameConfig {
        hands,
        ranks,
        round,
        economy,
        shop,
        odds,
        inventory,
    };
    validate_config(&config).with_context(|| format!("validate config in {}", dir.display()))?;
    Ok(config)
}

pub fn load_content(dir: &Path) -> anyhow::Result<Content> {
    let base = dir.join("content");
    let jokers: Vec<JokerDef> = load_json(base.join("jokers.json"))?;
    let tarots: Vec<TarotDef> = load_json(base.join("tarots.json"))?;
    let planets: Vec<PlanetDef> = load_json(base.join("planets.json"))?;
    let vouchers: Vec<VoucherDef> = load_json(base.join("vouchers.json"))?;
    let packs: Vec<PackDef> = load_json(base.join("packs.json"))?;
    let bosses: Vec<BossDef> = load_json(base.join("bosses.json"))?;

    let content = Content {
        jokers,
        tarots,
        planets,
        vouchers,
        packs,
        bosses,
    };
    validate_content(&content)
        .with_context(|| format!("validate content in {}", base.display()))?;
    info!(
        "loaded {} jokers, {} tarots, {} planets, {} vouchers, {} packs, {} bosses",
        content.jokers.len(),
        content.tarots.len(),
        content.planets.len(),
        content.vouchers.len(),
        content.packs.len(),
        content.bosses.len()
    );
    Ok(content)
}

pub fn validate_config(config: &GameConfig) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for rule in &config.hands {
        if !seen.insert(rule.kind) {
            bail!("duplicate hand rule {}", rule.kind.id());
        }
        if rule.base_chips < 0 || rule.base_mult < 0.0 {
            bail!("hand rule {} has negative base values", rule.kind.id());
        }
    }
    for kind in HandKind::ALL {
        if !seen.contains(&kind) {
            bail!("missing hand rule {}", kind.id());
        }
    }
    let mut ranks = HashSet::new();
    for rule in &config.ranks {
        if !ranks.insert(rule.rank) {
            bail!("duplicate rank rule {:?}", rule.rank);
        }
    }
    if !config.ranks.is_empty() && ranks.len() != Rank::ALL.len() {
        bail!("rank rules cover {} of {} ranks", ranks.len(), Rank::ALL.len());
    }
    if config.round.max_select == 0 {
        bail!("max_select must be at least 1");
    }
    if config.round.base_hands == 0 {
        bail!("base_hands must be at least 1");
    }
    let odds = &config.odds;
    for (name, value) in [
        ("polychrome", odds.polychrome),
        ("holographic", odds.holographic),
        ("foil", odds.foil),
        ("seal", odds.seal),
    ] {
        if !(0.0..=1.0).contains(&value) {
            bail!("{name} odds {value} outside [0, 1]");
        }
    }
    if odds.polychrome + odds.holographic + odds.foil > 1.0 {
        bail!("edition odds sum above 1");
    }
    if !(0.0..=1.0).contains(&config.shop.buffoon_pack_chance) {
        bail!("buffoon_pack_chance outside [0, 1]");
    }
    Ok(())
}

pub fn validate_content(content: &Content) -> anyhow::Result<()> {
    let mut ids = HashSet::new();
    ensure_unique(&mut ids, "joker", content.jokers.iter().map(|item| &item.id))?;
    ensure_unique(&mut ids, "tarot", content.tarots.iter().map(|item| &item.id))?;
    ensure_unique(&mut ids, "planet", content.planets.iter().map(|item| &item.id))?;
    ensure_unique(&mut ids, "voucher", content.vouchers.iter().map(|item| &item.id))?;
    ensure_unique(&mut ids, "pack", content.packs.iter().map(|item| &item.id))?;
    ensure_unique(&mut ids, "boss", content.bosses.iter().map(|item| &item.id))?;

    for tarot in &content.tarots {
        let targets = tarot.effect.targets();
        match &tarot.effect {
            TarotEffect::EnhanceCard { .. }
            | TarotEffect::ApplyEdition { .. }
            | TarotEffect::ApplySeal { .. } => {
                if targets == 0 {
                    bail!("tarot {} needs at least one target", tarot.id);
                }
            }
            TarotEffect::ConvertSuit
            | TarotEffect::GainMoney { .. }
            | TarotEffect::CreateLastConsumable => {}
        }
        debug!("tarot {} takes {} target(s)", tarot.id, targets);
    }

    let mut pack_kinds = HashSet::new();
    for pack in &content.packs {
        if !pack_kinds.insert(pack.kind) {
            bail!("duplicate {:?} pack {}", pack.kind, pack.id);
        }
        if pack.contains == 0 {
            bail!("pack {} contains nothing", pack.id);
        }
    }

    let costs = content
        .jokers
        .iter()
        .map(|item| (&item.id, item.cost))
        .chain(content.vouchers.iter().map(|item| (&item.id, item.cost)))
        .chain(content.packs.iter().map(|item| (&item.id, item.cost)));
    for (id, cost) in costs {
        if cost < 0 {
            bail!("{id} has negative cost {cost}");
        }
    }
    Ok(())
}

fn ensure_unique<'a>(
    seen: &mut HashSet<String>,
    label: &str,
    ids: impl Iterator<Item = &'a String>,
) -> anyhow::Result<()> {
    for id in ids {
        if !seen.insert(id.clone()) {
            bail!("duplicate {label} id {id}");
        }
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
