//! warp-protocol - a deterministic push-your-luck reactor game.
//!
//! Terminal front-end over the pure engine crate: an interactive REPL or a
//! scripted replay, entered from a seed, a daily date or a share link.

mod action_script;
mod commands;
mod config;

use std::env;
use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};

use action_script::ActionScript;
use anyhow::{Context, Result};
use commands::PlayerCommand;
use config::PlayerConfig;
use tracing::info;
use warp_protocol_engine::{
    daily_seed, generate_seed, reduce, GameAction, GameMode, GameState, GameStatus, ShareLink,
};

fn main() -> Result<()> {
    // WARN by default; override via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = CliOptions::parse(env::args().skip(1))?;
    if cli.help {
        print_help();
        return Ok(());
    }
    info!("Starting warp-protocol v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config_path {
        Some(path) => PlayerConfig::load_from_path(path),
        None => PlayerConfig::load(),
    };

    let start = resolve_run(&cli, &config, &today_string(), generate_seed)?;
    let state = GameState::with_options(start.seed, start.mode, start.daily_date);

    match &cli.script {
        Some(path) => run_script(state, path, cli.state_json),
        None => repl(state, &config),
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    seed: Option<String>,
    mode: Option<GameMode>,
    date: Option<String>,
    share: Option<String>,
    script: Option<PathBuf>,
    config_path: Option<PathBuf>,
    state_json: bool,
    help: bool,
}

impl CliOptions {
    fn parse<I>(mut args: I) -> Result<Self>
    where
        I: Iterator<Item = String>,
    {
        let mut options = CliOptions::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => options.seed = args.next(),
                "--mode" => {
                    options.mode = match args.next().as_deref() {
                        Some("random") => Some(GameMode::Random),
                        Some("seeded") => Some(GameMode::Seeded),
                        Some("daily") => Some(GameMode::Daily),
                        Some(other) => anyhow::bail!("unknown mode `{other}`"),
                        None => anyhow::bail!("--mode expects random, seeded or daily"),
                    }
                }
                "--date" => options.date = args.next(),
                "--share" => options.share = args.next(),
                "--script" => options.script = args.next().map(PathBuf::from),
                "--config" => options.config_path = args.next().map(PathBuf::from),
                "--state-json" => options.state_json = true,
                "-h" | "--help" => options.help = true,
                _ => {}
            }
        }
        Ok(options)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct RunStart {
    mode: GameMode,
    seed: String,
    daily_date: Option<String>,
}

/// Decide the run triple from flags, configuration and ambient inputs.
///
/// `today` and `fresh_seed` are injected so resolution itself stays
/// deterministic; they are only consulted when the flags leave a gap.
fn resolve_run(
    cli: &CliOptions,
    config: &PlayerConfig,
    today: &str,
    fresh_seed: impl FnOnce() -> String,
) -> Result<RunStart> {
    if let Some(query) = &cli.share {
        let link = ShareLink::parse_query(query)
            .with_context(|| format!("invalid share link `{query}`"))?;
        return Ok(RunStart {
            mode: link.mode,
            seed: link.seed,
            daily_date: link.daily_date,
        });
    }

    if cli.date.is_some() || cli.mode == Some(GameMode::Daily) {
        let date = cli.date.clone().unwrap_or_else(|| today.to_string());
        return Ok(RunStart {
            mode: GameMode::Daily,
            seed: daily_seed(&date),
            daily_date: Some(date),
        });
    }

    if let Some(seed) = &cli.seed {
        return Ok(RunStart {
            mode: cli.mode.unwrap_or(GameMode::Seeded),
            seed: seed.clone(),
            daily_date: None,
        });
    }

    let mode = cli
        .mode
        .or_else(|| config.default_game_mode())
        .unwrap_or(GameMode::Random);
    if mode == GameMode::Daily {
        return Ok(RunStart {
            mode,
            seed: daily_seed(today),
            daily_date: Some(today.to_string()),
        });
    }
    Ok(RunStart {
        mode,
        seed: fresh_seed(),
        daily_date: None,
    })
}

fn today_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn run_script(state: GameState, path: &Path, state_json: bool) -> Result<()> {
    let script = ActionScript::from_path(path)
        .with_context(|| format!("failed to load action script {}", path.display()))?;
    let steps = script.len();
    let final_state = script.replay(state);
    println!("Replayed {steps} actions.");
    print_summary(&final_state);
    if state_json {
        println!("{}", serde_json::to_string_pretty(&final_state)?);
    }
    Ok(())
}

fn repl(mut state: GameState, config: &PlayerConfig) -> Result<()> {
    println!(
        "Warp Protocol - {} run, seed \"{}\". Type `help` for commands.",
        state.mode, state.seed
    );
    print_summary(&state);
    let mut seen_log = state.log.len();

    let stdin = io::stdin();
    print_prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match commands::parse(&line) {
            Ok(PlayerCommand::Quit) => break,
            Ok(PlayerCommand::Help) => print_command_reference(),
            Ok(PlayerCommand::State) => print_summary(&state),
            Ok(PlayerCommand::Log { count }) => {
                let count = count.unwrap_or(config.log_tail);
                let skip = state.log.len().saturating_sub(count);
                for entry in &state.log[skip..] {
                    println!("  {entry}");
                }
            }
            Ok(PlayerCommand::Share) => {
                println!("Share link: ?{}", ShareLink::for_state(&state).to_query());
            }
            Ok(PlayerCommand::New { seed }) => {
                let (seed, mode) = match seed {
                    Some(seed) => (seed, GameMode::Seeded),
                    None => (generate_seed(), GameMode::Random),
                };
                state = reduce(
                    state,
                    GameAction::NewRun {
                        seed,
                        mode: Some(mode),
                        daily_date: None,
                    },
                );
                seen_log = print_new_log(&state, 0);
            }
            Ok(PlayerCommand::Daily { date }) => {
                let date = date.unwrap_or_else(today_string);
                state = reduce(
                    state,
                    GameAction::NewRun {
                        seed: daily_seed(&date),
                        mode: Some(GameMode::Daily),
                        daily_date: Some(date),
                    },
                );
                seen_log = print_new_log(&state, 0);
            }
            Ok(PlayerCommand::Action(action)) => {
                state = reduce(state, action);
                seen_log = print_new_log(&state, seen_log);
                print_status_line(&state);
            }
            Err(err) => println!("{err}"),
        }
        print_prompt()?;
    }
    Ok(())
}

fn print_prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

/// Print log entries appended since `seen`; returns the new watermark.
fn print_new_log(state: &GameState, seen: usize) -> usize {
    let seen = seen.min(state.log.len());
    for entry in &state.log[seen..] {
        println!("  {entry}");
    }
    state.log.len()
}

fn print_status_line(state: &GameState) {
    let score = match state.score {
        Some(score) => score.to_string(),
        None => "-".to_string(),
    };
    println!(
        "[{:?}/{:?}] round {} | banked {} flux, {} credits | at risk {} flux, {} credits | instability {}/{} | slots {}/{} | score {}",
        state.status,
        state.round_status,
        state.rounds + 1,
        state.banked_flux,
        state.banked_credits,
        state.round_flux,
        state.round_credits,
        state.round_instability,
        state.instability_threshold,
        state.active_pile.len(),
        state.slot_capacity,
        score,
    );
}

fn print_summary(state: &GameState) {
    print_status_line(state);
    println!(
        "bag {} / discard {} / active {} ({} modules owned) | next upgrades: capacity {} cr, threshold {} cr",
        state.bag.len(),
        state.discard.len(),
        state.active_pile.len(),
        state.module_count(),
        state.next_slot_capacity_cost,
        state.next_instability_cost,
    );
    if state.status == GameStatus::Won {
        println!(
            "Run complete: warp protocol finished in {} rounds.",
            state.rounds
        );
    }
}

fn print_help() {
    println!("warp-protocol - deterministic push-your-luck reactor game");
    println!();
    println!("Usage: warp-protocol [options]");
    println!("  --seed <seed>       play a specific seed (seeded mode)");
    println!("  --mode <mode>       random | seeded | daily");
    println!("  --date <date>       daily challenge date (YYYY-MM-DD, implies daily)");
    println!("  --share <query>     start from a share link query string");
    println!("  --script <path>     replay a JSON action script instead of the REPL");
    println!("  --config <path>     player config file (default config/player.toml)");
    println!("  --state-json        print the final state as JSON after a script run");
    println!("  -h, --help          this message");
}

fn print_command_reference() {
    println!("Commands:");
    println!("  draw (d)                      draw a module from the bag");
    println!("  bank (b)                      stop and bank this round");
    println!("  next (n)                      start the next round");
    println!("  buy <module-kind>             buy a module (between rounds)");
    println!("  upgrade <track>               buy an upgrade: slot-capacity | instability-threshold");
    println!("  new [seed]                    start a new run (random seed when omitted)");
    println!("  daily [date]                  start a daily challenge run");
    println!("  share                         print this run's share link");
    println!("  state (s), log [n], help, quit");
}
