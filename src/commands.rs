//! REPL command grammar: one line of player input parsed into a command.

use std::fmt;

use warp_protocol_engine::{GameAction, ModuleKind, UpgradeKind};

/// A rejected command line, with a message suitable for direct display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

/// One parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Show the command reference.
    Help,
    /// Leave the game.
    Quit,
    /// Print the full state summary.
    State,
    /// Print the tail of the run log (optionally a specific line count).
    Log {
        /// Lines to print; the configured tail length when omitted.
        count: Option<usize>,
    },
    /// Print the share link for the current run.
    Share,
    /// Start a new run (generated seed when omitted).
    New {
        /// Explicit seed for the new run.
        seed: Option<String>,
    },
    /// Start a daily-challenge run (today when omitted).
    Daily {
        /// Challenge date, `YYYY-MM-DD`.
        date: Option<String>,
    },
    /// A game action dispatched straight to the reducer.
    Action(GameAction),
}

/// Parse one input line.
pub fn parse(line: &str) -> Result<PlayerCommand, CommandError> {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return Err(CommandError::new("Type a command, or `help` for the list."));
    };

    let parsed = match command {
        "help" | "h" | "?" => PlayerCommand::Help,
        "quit" | "exit" | "q" => PlayerCommand::Quit,
        "state" | "s" => PlayerCommand::State,
        "share" => PlayerCommand::Share,
        "log" => {
            let count = match tokens.next() {
                None => None,
                Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
                    CommandError::new(format!("`log` expects a line count, got `{raw}`."))
                })?),
            };
            PlayerCommand::Log { count }
        }
        "draw" | "d" => PlayerCommand::Action(GameAction::DrawModule),
        "bank" | "b" => PlayerCommand::Action(GameAction::StopAndBank),
        "next" | "n" => PlayerCommand::Action(GameAction::StartNextRound),
        "buy" => {
            let Some(raw) = tokens.next() else {
                return Err(CommandError::new(
                    "`buy` expects a module kind: flux-coil, sponsored-relay, stabilizer, volatile-lens or warp-core.",
                ));
            };
            let kind = parse_module_kind(raw)
                .ok_or_else(|| CommandError::new(format!("Unknown module kind `{raw}`.")))?;
            PlayerCommand::Action(GameAction::BuyModule { kind })
        }
        "upgrade" | "u" => {
            let Some(raw) = tokens.next() else {
                return Err(CommandError::new(
                    "`upgrade` expects a track: slot-capacity or instability-threshold.",
                ));
            };
            let kind = parse_upgrade_kind(raw)
                .ok_or_else(|| CommandError::new(format!("Unknown upgrade track `{raw}`.")))?;
            PlayerCommand::Action(GameAction::BuyUpgrade { kind })
        }
        "new" => PlayerCommand::New {
            seed: tokens.next().map(str::to_string),
        },
        "daily" => PlayerCommand::Daily {
            date: tokens.next().map(str::to_string),
        },
        other => {
            return Err(CommandError::new(format!(
                "Unknown command `{other}`. Type `help` for the list."
            )))
        }
    };

    if let Some(extra) = tokens.next() {
        return Err(CommandError::new(format!(
            "Unexpected trailing argument `{extra}`."
        )));
    }
    Ok(parsed)
}

fn parse_module_kind(raw: &str) -> Option<ModuleKind> {
    match raw {
        "flux-coil" => Some(ModuleKind::FluxCoil),
        "sponsored-relay" => Some(ModuleKind::SponsoredRelay),
        "stabilizer" => Some(ModuleKind::Stabilizer),
        "volatile-lens" => Some(ModuleKind::VolatileLens),
        "warp-core" => Some(ModuleKind::WarpCore),
        _ => None,
    }
}

fn parse_upgrade_kind(raw: &str) -> Option<UpgradeKind> {
    match raw {
        "slot-capacity" | "capacity" => Some(UpgradeKind::SlotCapacity),
        "instability-threshold" | "threshold" => Some(UpgradeKind::InstabilityThreshold),
        _ => None,
    }
}
