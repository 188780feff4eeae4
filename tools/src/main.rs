//! homestead-runner: headless runner for the Homestead simulation.
//!
//! Usage:
//!   homestead-runner --seed 12345 --days 60 --db saves.db
//!   homestead-runner --seed 12345 --ipc-mode
//!   homestead-runner --db saves.db --slot autosave --export save.json

use anyhow::Result;
use homestead_core::{
    command::PlayerCommand,
    config::SimConfig,
    crop::TileStage,
    farm::UpgradeTrack,
    produce::Produce,
    rng::{RngBank, RngStream, StreamRng},
    session::{CommandOutcome, Session},
    store::SaveStore,
    types::{Day, Money, Quantity},
};
use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufRead, Write};

/// Units of each produce the autopilot keeps back from the market.
const AUTOPILOT_RESERVE: Quantity = 12;
/// Money the autopilot keeps after buying an upgrade.
const AUTOPILOT_CASH_FLOOR: Money = 200;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command { command: PlayerCommand },
    Save { slot: String },
    Load { slot: String },
    Quit,
}

#[derive(serde::Serialize)]
struct UiFamily {
    name:           String,
    satisfied:      bool,
    remaining_need: homestead_core::nutrition::Nutrition,
    stockpile:      homestead_core::nutrition::Nutrition,
}

#[derive(serde::Serialize)]
struct UiPrice {
    price: u64,
    delta: Option<i64>,
}

#[derive(serde::Serialize)]
struct UiState {
    day:              Day,
    money:            Money,
    irrigation_level: u8,
    yield_level:      u8,
    storage:          BTreeMap<String, Quantity>,
    prices:           BTreeMap<String, UiPrice>,
    families:         Vec<UiFamily>,
    tiles:            Vec<String>,
    game_over:        Option<String>,
    last_outcome:     Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 60u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let data_dir = string_arg(&args, "--data-dir");
    let slot = string_arg(&args, "--slot");
    let export = string_arg(&args, "--export");

    let config = match data_dir {
        Some(dir) => SimConfig::load(dir)?,
        None => SimConfig::default(),
    };

    if !ipc_mode {
        println!("Homestead runner");
        println!("  seed:      {seed}");
        println!("  days:      {days}");
        println!("  db:        {db}");
        println!("  data_dir:  {}", data_dir.unwrap_or("(built-in)"));
        println!();
    }

    let store = SaveStore::open(db)?;
    store.migrate()?;

    let mut session = Session::new(format!("session-{seed}"), seed, config, store)?;
    if let Some(slot) = slot {
        session.load(slot)?;
    }

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        let played = run_autopilot(&mut session, days)?;
        if let Some(slot) = slot {
            session.save(slot)?;
        }
        print_summary(&session, played)?;
    }

    if let Some(path) = export {
        std::fs::write(path, session.snapshot().to_json()?)?;
        log::info!("runner: exported snapshot to {path}");
    }

    Ok(())
}

fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let last_outcome = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => None,
            IpcCommand::Command { command } => Some(describe(&session.submit(command)?)),
            IpcCommand::Save { slot } => Some(match session.save(&slot) {
                Ok(()) => format!("saved to {slot}"),
                Err(e) => format!("save failed: {e}"),
            }),
            IpcCommand::Load { slot } => Some(match session.load(&slot) {
                Ok(()) => format!("loaded {slot}"),
                Err(e) => format!("load failed: {e}"),
            }),
        };

        let state = build_ui_state(session, last_outcome);
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn describe(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Applied { event, .. } => format!("applied: {}", event.type_name()),
        CommandOutcome::Rejected(err) => format!("rejected: {err}"),
        CommandOutcome::GameOver(over) => over.to_string(),
    }
}

fn build_ui_state(session: &Session, last_outcome: Option<String>) -> UiState {
    let state = session.state();
    let market = session.market();

    let prices = market
        .prices()
        .iter()
        .map(|(&p, &price)| (p.id().to_string(), UiPrice { price, delta: market.delta(p) }))
        .collect();

    let tiles = state
        .grid
        .iter()
        .map(|t| match t.stage() {
            TileStage::Empty => "empty".to_string(),
            TileStage::Growing { produce, days_grown } => {
                format!("{} ({days_grown}/{})", produce.id(), produce.days_to_mature())
            }
            TileStage::Mature { produce } => format!("{} (ready)", produce.id()),
        })
        .collect();

    UiState {
        day:              state.day,
        money:            state.money,
        irrigation_level: state.farm.irrigation_level,
        yield_level:      state.farm.yield_level,
        storage:          state.storage.iter().map(|(p, q)| (p.id().to_string(), q)).collect(),
        prices,
        families: state
            .families
            .iter()
            .map(|f| UiFamily {
                name:           f.name.clone(),
                satisfied:      f.is_satisfied(),
                remaining_need: f.remaining_need(),
                stockpile:      f.stockpile,
            })
            .collect(),
        tiles,
        game_over: session.game_over().map(|o| o.reason.clone()),
        last_outcome,
    }
}

/// Play up to `days` days. Returns the number of days actually ended.
fn run_autopilot(session: &mut Session, days: u64) -> Result<u64> {
    let mut rng = RngBank::new(session.seed()).for_stream(RngStream::Autopilot);

    for played in 0..days {
        harvest_ready(session)?;
        feed_families(session)?;
        sell_surplus(session)?;
        buy_upgrades(session)?;
        replant(session, &mut rng)?;

        if let CommandOutcome::GameOver(over) = session.submit(PlayerCommand::EndDay)? {
            println!("  {over}");
            return Ok(played);
        }
    }
    Ok(days)
}

fn harvest_ready(session: &mut Session) -> Result<()> {
    for tile in session.state().mature_tiles() {
        session.submit(PlayerCommand::Harvest { tile })?;
    }
    Ok(())
}

/// Hand out one unit at a time, always from the largest pile, until each
/// family is covered or storage runs dry.
fn feed_families(session: &mut Session) -> Result<()> {
    for family in 0..session.state().families.len() {
        while !session.state().families[family].is_satisfied() {
            let Some((produce, _)) = session
                .state()
                .storage
                .iter()
                .max_by_key(|&(_, qty)| qty)
            else {
                return Ok(());
            };
            let outcome = session.submit(PlayerCommand::Assign { family, produce, quantity: 1 })?;
            if !matches!(outcome, CommandOutcome::Applied { .. }) {
                break;
            }
        }
    }
    Ok(())
}

fn sell_surplus(session: &mut Session) -> Result<()> {
    let surplus: Vec<(Produce, Quantity)> = session
        .state()
        .storage
        .iter()
        .filter(|&(_, qty)| qty > AUTOPILOT_RESERVE)
        .map(|(p, qty)| (p, qty - AUTOPILOT_RESERVE))
        .collect();
    for (produce, quantity) in surplus {
        session.submit(PlayerCommand::Sell { produce, quantity })?;
    }
    Ok(())
}

fn buy_upgrades(session: &mut Session) -> Result<()> {
    let cheapest = UpgradeTrack::ALL
        .into_iter()
        .filter_map(|track| session.next_upgrade_cost(track).map(|q| (track, q.price)))
        .min_by_key(|&(_, price)| price);

    if let Some((track, price)) = cheapest {
        if session.state().money >= price + AUTOPILOT_CASH_FLOOR {
            session.submit(PlayerCommand::BuyUpgrade { track })?;
        }
    }
    Ok(())
}

fn replant(session: &mut Session, rng: &mut StreamRng) -> Result<()> {
    for tile in session.state().empty_tiles() {
        let pick = rng.next_u64_below(Produce::ALL.len() as u64) as usize;
        session.submit(PlayerCommand::Plant { tile, produce: Produce::ALL[pick] })?;
    }
    Ok(())
}

fn print_summary(session: &Session, played: u64) -> Result<()> {
    let state = session.state();
    let events = session.store().event_count(&session.session_id)?;

    println!("=== RUN SUMMARY ===");
    println!("  session:     {}", session.session_id);
    println!("  days played: {played}");
    println!("  final day:   {}", state.day);
    println!("  money:       {}", state.money);
    println!("  irrigation:  {}", state.farm.irrigation_level);
    println!("  yield:       {}", state.farm.yield_level);
    println!("  events:      {events}");
    if let Some(over) = session.game_over() {
        println!("  ended:       {}", over.reason);
    }

    println!();
    println!("=== STORAGE & MARKET ===");
    for produce in Produce::ALL {
        let delta = match session.market_delta(produce) {
            Some(d) => format!("{d:+}"),
            None => "—".to_string(),
        };
        println!(
            "  {:<11} stock {:>4} | price {:>4} ({delta})",
            produce.label(),
            state.storage.quantity(produce),
            session.market().price(produce).unwrap_or(0),
        );
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
