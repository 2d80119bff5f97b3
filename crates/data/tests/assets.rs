use cardrun_core::{
    EventBus, GameConfig, HandKind, JokerEffect, PackKind, Phase, RunState, TarotEffect,
    VoucherEffect,
};
use cardrun_data::{load_content, load_game_config, validate_content, validate_config};
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

#[test]
fn config_matches_defaults() {
    let loaded = load_game_config(&assets_root()).expect("load config");
    let defaults = GameConfig::default();
    for kind in HandKind::ALL {
        let rule = loaded.hand_rule(kind).expect("hand rule");
        let default = defaults.hand_rule(kind).expect("default rule");
        assert_eq!(rule.base_chips, default.base_chips, "{}", kind.id());
        assert_eq!(rule.base_mult, default.base_mult, "{}", kind.id());
    }
    assert_eq!(loaded.round.base_hand_size, 8);
    assert_eq!(loaded.round.max_select, 5);
    assert_eq!(loaded.economy.starting_money, 10);
    assert_eq!(loaded.inventory.joker_slots, 5);
    assert_eq!(loaded.inventory.consumable_slots, 2);
    assert_eq!(loaded.odds.polychrome, 0.02);
}

#[test]
fn content_catalog_loads() {
    let content = load_content(&assets_root()).expect("load content");
    assert_eq!(content.jokers.len(), 8);
    assert_eq!(content.tarots.len(), 11);
    assert_eq!(content.planets.len(), 9);
    assert_eq!(content.vouchers.len(), 4);
    assert_eq!(content.bosses.len(), 1);
    for kind in [
        PackKind::Celestial,
        PackKind::Arcana,
        PackKind::Standard,
        PackKind::Buffoon,
    ] {
        assert!(content.pack(kind).is_some(), "{kind:?}");
    }

    let jolly = content.joker("j_mult").expect("jolly");
    assert!(matches!(
        jolly.effect,
        JokerEffect::ConditionalMult { value, .. } if value == 8.0
    ));
    assert!(content.joker("j_scale_hearts").unwrap().effect.is_scaling());
    assert_eq!(content.tarot("t_death").unwrap().effect.targets(), 2);
    assert_eq!(content.tarot("t_strength").unwrap().effect.targets(), 2);
    assert!(matches!(
        content.tarot("t_fool").unwrap().effect,
        TarotEffect::CreateLastConsumable
    ));
    assert_eq!(
        content.planet("p_venus").unwrap().target_hand,
        HandKind::FourOfAKind
    );
    assert_eq!(
        content.voucher("v_reroll").unwrap().effect,
        VoucherEffect::FreeReroll
    );
}

#[test]
fn every_hand_has_a_planet() {
    let content = load_content(&assets_root()).expect("load content");
    for kind in HandKind::ALL {
        if kind == HandKind::FiveOfAKind {
            continue;
        }
        assert!(
            content.planets.iter().any(|planet| planet.target_hand == kind),
            "{}",
            kind.id()
        );
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut content = load_content(&assets_root()).expect("load content");
    let copy = content.jokers[0].clone();
    content.jokers.push(copy);
    let err = validate_content(&content).unwrap_err();
    assert!(err.to_string().contains("duplicate joker id"));
}

#[test]
fn targeted_tarot_without_targets_is_rejected() {
    let mut content = load_content(&assets_root()).expect("load content");
    let sun = content
        .tarots
        .iter_mut()
        .find(|tarot| tarot.id == "t_sun")
        .unwrap();
    if let TarotEffect::ApplyEdition { targets, .. } = &mut sun.effect {
        *targets = 0;
    }
    assert!(validate_content(&content).is_err());
}

#[test]
fn missing_hand_rule_is_rejected() {
    let mut config = load_game_config(&assets_root()).expect("load config");
    config.hands.retain(|rule| rule.kind != HandKind::Flush);
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("flush"));
}

#[test]
fn missing_directory_reports_the_path() {
    let err = load_content(&assets_root().join("nope")).unwrap_err();
    assert!(format!("{err:#}").contains("jokers.json"));
}

#[test]
fn seeded_run_on_real_assets() {
    let config = load_game_config(&assets_root()).expect("load config");
    let content = load_content(&assets_root()).expect("load content");
    let mut run = RunState::new(config, content, 12345);
    let mut events = EventBus::default();
    run.start_round(&mut events).expect("start");
    assert_eq!(run.state.phase, Phase::Play);
    assert_eq!(run.hand.len(), 8);

    run.inventory.add_consumable("t_emperor".to_string()).unwrap();
    run.use_consumable(0, &mut events).unwrap();
    assert_eq!(run.state.money, 15);

    let ids: Vec<u32> = run.hand.iter().take(2).map(|card| card.id).collect();
    run.discard_cards(&ids, &mut events).unwrap();
    assert_eq!(run.card_count(), 52);
}
