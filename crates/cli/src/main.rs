use anyhow::Context;
use cardrun_core::{
    Card, CardId, EngineState, EventBus, GameState, HandKind, Phase, RoundStatus, RunError,
    RunState, ShopOfferRef, ShopState,
};
use cardrun_data::{load_content, load_game_config};
use log::{debug, info};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;

#[derive(Debug, Clone)]
struct CliOptions {
    seed: u64,
    assets: PathBuf,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut seed = DEFAULT_RUN_SEED;
    let mut assets = PathBuf::from("assets");
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().unwrap_or(DEFAULT_RUN_SEED);
                    idx += 1;
                }
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    assets = PathBuf::from(value);
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions { seed, assets }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    state: &'a GameState,
    hand: &'a [Card],
    jokers: Vec<Option<&'a str>>,
    consumables: &'a [cardrun_core::ConsumableInstance],
    shop: Option<&'a ShopState>,
    engine: EngineState,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let config = load_game_config(&options.assets)
        .with_context(|| format!("load config from {}", options.assets.display()))?;
    let content = load_content(&options.assets)
        .with_context(|| format!("load content from {}", options.assets.display()))?;
    info!("starting run with seed {}", options.seed);

    let mut run = RunState::new(config, content, options.seed);
    let mut events = EventBus::default();
    run.start_round(&mut events)?;
    flush_events(&mut events);
    print_hand(&run);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "{}> ", prompt_text(&run))?;
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((command, rest)) = parts.split_first() else {
            continue;
        };
        debug!("command {command} {rest:?}");
        match *command {
            "q" | "quit" | "exit" => break,
            "h" | "help" | "?" => print_help(),
            "hand" => print_hand(&run),
            "levels" => print_levels(&run),
            "jokers" | "inv" => print_inventory(&run),
            "state" => {
                let snapshot = Snapshot {
                    state: &run.state,
                    hand: &run.hand,
                    jokers: run
                        .inventory
                        .jokers
                        .iter()
                        .map(|slot| slot.as_ref().map(|joker| joker.id.as_str()))
                        .collect(),
                    consumables: &run.inventory.consumables,
                    shop: run.shop.as_ref(),
                    engine: run.engine_state(),
                };
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
            "play" | "p" => match hand_ids(&run, rest) {
                Ok(ids) => match run.play_hand(&ids, &mut events) {
                    Ok(outcome) => {
                        for step in &outcome.breakdown.trace {
                            let marker = if step.is_miss() { "-" } else { "+" };
                            println!(
                                "  {marker} {:<20} {} x {:.1} x {:.2}",
                                step.source, step.after.chips, step.after.mult, step.after.x_mult
                            );
                        }
                        println!(
                            "{} (level {}) scored {}",
                            outcome.hand.display_name(),
                            outcome.level,
                            outcome.score
                        );
                        match outcome.status {
                            RoundStatus::InProgress => {}
                            RoundStatus::Won(cash) => {
                                println!("round won, cash out ${}", cash.total())
                            }
                            RoundStatus::Lost => println!("round lost"),
                        }
                    }
                    Err(err) => print_run_error(&err),
                },
                Err(err) => println!("{err}"),
            },
            "discard" | "d" => match hand_ids(&run, rest) {
                Ok(ids) => {
                    report(run.discard_cards(&ids, &mut events).map(|outcome| {
                        format!(
                            "discarded {}, drew {}",
                            outcome.discarded.len(),
                            outcome.drawn
                        )
                    }))
                }
                Err(err) => println!("{err}"),
            },
            "use" | "u" => match parse_index(rest.first()) {
                Ok(slot) => report(
                    run.use_consumable(slot, &mut events)
                        .map(|state| describe_engine(&state)),
                ),
                Err(err) => println!("{err}"),
            },
            "target" | "t" => match parse_index(rest.first()) {
                Ok(idx) => match run.hand.get(idx).map(|card| card.id) {
                    Some(id) => report(
                        run.select_target(id, &mut events)
                            .map(|state| describe_engine(&state)),
                    ),
                    None => println!("no card at index {idx}"),
                },
                Err(err) => println!("{err}"),
            },
            "cancel" => report(
                run.cancel_targeting(&mut events)
                    .map(|state| describe_engine(&state)),
            ),
            "shop" => {
                if run.state.phase == Phase::Cleared {
                    if let Err(err) = run.enter_shop(&mut events) {
                        print_run_error(&err);
                    }
                }
                print_shop(&run);
            }
            "buy" => match parse_offer(rest) {
                Ok(offer) => report(
                    run.purchase_item(offer, &mut events)
                        .map(|purchase| format!("{:?}", purchase.roster_change)),
                ),
                Err(err) => println!("{err}"),
            },
            "reroll" | "r" => {
                report(run.reroll_shop(&mut events).map(|cost| format!("paid ${cost}")));
                print_shop(&run);
            }
            "sell" => match parse_index(rest.first()) {
                Ok(slot) => report(
                    run.sell_joker(slot, &mut events)
                        .map(|price| format!("sold for ${price}")),
                ),
                Err(err) => println!("{err}"),
            },
            "next" | "n" => {
                if let Err(err) = run.start_next_round(&mut events) {
                    print_run_error(&err);
                } else {
                    print_hand(&run);
                }
            }
            other => println!("unknown command '{other}', try 'help'"),
        }
        flush_events(&mut events);
        if run.state.phase == Phase::GameOver {
            println!("game over at ante {}", run.state.ante);
            break;
        }
    }
    Ok(())
}

fn report(result: Result<String, RunError>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(err) => print_run_error(&err),
    }
}

fn print_run_error(err: &RunError) {
    println!("error: {err}");
}

fn flush_events(events: &mut EventBus) {
    for event in events.drain() {
        println!("  event: {event:?}");
    }
}

fn describe_engine(state: &EngineState) -> String {
    match state {
        EngineState::Ready => "ready".to_string(),
        EngineState::Targeting {
            tarot,
            needed,
            selected,
        } => format!("{tarot}: pick {} more card(s)", needed - selected.len()),
    }
}

fn prompt_text(run: &RunState) -> String {
    let phase = match run.state.phase {
        Phase::Setup => "setup",
        Phase::Play => "play",
        Phase::Cleared => "cleared",
        Phase::Shop => "shop",
        Phase::GameOver => "over",
    };
    format!(
        "[ante {} {:?} {}/{} ${} {}]",
        run.state.ante,
        run.state.blind,
        run.state.round_score,
        run.state.target,
        run.state.money,
        phase
    )
}

fn print_help() {
    println!("commands:");
    println!("  hand | levels | jokers | state");
    println!("  play <idx..> | discard <idx..>");
    println!("  use <slot> | target <idx> | cancel");
    println!("  shop | buy joker <n> | buy voucher | buy pack <n> | reroll | sell <slot>");
    println!("  next | quit");
}

fn print_hand(run: &RunState) {
    println!(
        "hands {} discards {} deck {}",
        run.state.hands_left,
        run.state.discards_left,
        run.deck.len()
    );
    if let Some(debuff) = &run.state.boss_debuff {
        println!("boss {}: {:?} debuffed", debuff.name, debuff.suit);
    }
    for (idx, card) in run.hand.iter().enumerate() {
        println!("{idx:>3}  {}", format_card(card));
    }
}

fn print_levels(run: &RunState) {
    for kind in HandKind::ALL {
        let level = run.state.hand_levels.level(kind);
        let (chips, mult) = run.tables.hand_base_for_level(kind, level);
        println!(
            "  {:<18} lvl {:<3} {} x {}",
            kind.display_name(),
            level,
            chips,
            mult
        );
    }
}

fn print_inventory(run: &RunState) {
    for (slot, joker) in run.inventory.jokers.iter().enumerate() {
        match joker {
            Some(joker) if joker.effect.is_scaling() => {
                println!("  joker {slot}: {} (+{})", joker.name, joker.current_value)
            }
            Some(joker) => println!("  joker {slot}: {}", joker.name),
            None => println!("  joker {slot}: -"),
        }
    }
    for (slot, item) in run.inventory.consumables.iter().enumerate() {
        println!("  consumable {slot}: {}", item.id);
    }
}

fn print_shop(run: &RunState) {
    let Some(shop) = run.shop.as_ref() else {
        println!("shop is closed");
        return;
    };
    for (idx, joker) in shop.jokers.iter().enumerate() {
        match joker {
            Some(def) => println!("  joker {idx}: {} ${}", def.name, def.cost),
            None => println!("  joker {idx}: sold"),
        }
    }
    match &shop.voucher {
        Some(def) => println!("  voucher: {} ${}", def.name, def.cost),
        None => println!("  voucher: -"),
    }
    for (idx, pack) in shop.packs.iter().enumerate() {
        match pack {
            Some(def) => println!("  pack {idx}: {} ${}", def.name, def.cost),
            None => println!("  pack {idx}: sold"),
        }
    }
    if let Some(price) = run.reroll_price() {
        println!("  reroll ${price}");
    }
}

fn format_card(card: &Card) -> String {
    let mut out = format!("{}{}", card.rank.symbol(), card.suit.symbol());
    let mut tags = Vec::new();
    if card.bonus_chips() != 0 {
        tags.push(format!("+{}", card.bonus_chips()));
    }
    if let Some(edition) = card.edition {
        tags.push(format!("{edition:?}"));
    }
    if let Some(seal) = card.seal {
        tags.push(format!("{seal:?} seal"));
    }
    if !tags.is_empty() {
        out.push_str(" [");
        out.push_str(&tags.join(","));
        out.push(']');
    }
    out
}

fn parse_index(arg: Option<&&str>) -> Result<usize, String> {
    let arg = arg.ok_or_else(|| "missing index".to_string())?;
    arg.parse::<usize>()
        .map_err(|_| format!("invalid index '{arg}'"))
}

fn parse_indices(args: &[&str]) -> Result<Vec<usize>, String> {
    if args.is_empty() {
        return Err("missing indices".to_string());
    }
    let mut indices = Vec::new();
    for arg in args {
        for part in arg.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let idx = part
                .parse::<usize>()
                .map_err(|_| format!("invalid index '{part}'"))?;
            indices.push(idx);
        }
    }
    Ok(indices)
}

/// Maps hand positions to card ids; the engine validates the selection itself.
fn hand_ids(run: &RunState, args: &[&str]) -> Result<Vec<CardId>, String> {
    parse_indices(args)?
        .into_iter()
        .map(|idx| {
            run.hand
                .get(idx)
                .map(|card| card.id)
                .ok_or_else(|| format!("no card at index {idx}"))
        })
        .collect()
}

fn parse_offer(args: &[&str]) -> Result<ShopOfferRef, String> {
    match args {
        ["joker", idx] | ["j", idx] => parse_index(Some(idx)).map(ShopOfferRef::Joker),
        ["pack", idx] | ["p", idx] => parse_index(Some(idx)).map(ShopOfferRef::Pack),
        ["voucher"] | ["v"] => Ok(ShopOfferRef::Voucher),
        _ => Err("usage: buy joker <n> | buy voucher | buy pack <n>".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offers() {
        assert_eq!(parse_offer(&["joker", "1"]), Ok(ShopOfferRef::Joker(1)));
        assert_eq!(parse_offer(&["voucher"]), Ok(ShopOfferRef::Voucher));
        assert_eq!(parse_offer(&["pack", "0"]), Ok(ShopOfferRef::Pack(0)));
        assert!(parse_offer(&["pack"]).is_err());
    }

    #[test]
    fn parses_index_lists() {
        assert_eq!(parse_indices(&["0,2", "4"]), Ok(vec![0, 2, 4]));
        assert!(parse_indices(&[]).is_err());
        assert!(parse_indices(&["x"]).is_err());
    }

    #[test]
    fn options_fall_back_to_defaults() {
        let options = parse_cli_options(&["--seed".to_string(), "7".to_string()]);
        assert_eq!(options.seed, 7);
        assert_eq!(options.assets, PathBuf::from("assets"));
    }
}
