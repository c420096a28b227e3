//! Run state: the single aggregate value owned by the caller and transformed
//! by the reducer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::module::{Module, ModuleId, ModuleKind};
use crate::rng;
use crate::seed;

/// Flux a fresh run starts with.
pub const START_FLUX: u32 = 0;
/// Credits a fresh run starts with.
pub const START_CREDITS: u32 = 0;
/// Active-pile slots before a round auto-banks.
pub const START_SLOT_CAPACITY: usize = 4;
/// Instability a round tolerates before meltdown, before the seed modifier.
pub const START_INSTABILITY_THRESHOLD: i32 = 4;
/// First slot-capacity upgrade price.
pub const START_SLOT_CAPACITY_COST: u32 = 4;
/// First instability-threshold upgrade price.
pub const START_INSTABILITY_COST: u32 = 5;
/// Price growth per purchased slot-capacity upgrade.
pub const SLOT_CAPACITY_COST_STEP: u32 = 2;
/// Price growth per purchased instability-threshold upgrade.
pub const INSTABILITY_COST_STEP: u32 = 3;
/// Warp cores that must be banked in a single round to win.
pub const WARP_CORE_TARGET: u32 = 4;
/// The instability threshold never drops below this, seed modifier included.
pub const INSTABILITY_FLOOR: i32 = 2;

/// How the current run was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Seed generated from OS entropy at run start.
    Random,
    /// Seed supplied by the player (or a share link).
    Seeded,
    /// Date-derived daily challenge seed.
    Daily,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameMode::Random => "random",
            GameMode::Seeded => "seeded",
            GameMode::Daily => "daily",
        };
        f.write_str(label)
    }
}

/// Run-level status. `Won` is terminal: every action except `new-run` becomes
/// a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// The run is in progress.
    Playing,
    /// The warp protocol completed; the score is set.
    Won,
}

/// Round-level status, orthogonal to the run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// Draws are legal; shop actions are not.
    Drawing,
    /// The round banked (manually or by filling the slots).
    Stopped,
    /// The round melted down; unbanked resources were forfeited.
    Busted,
}

/// Why a banked round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BankReason {
    /// The player stopped and banked.
    Manual,
    /// The active pile reached the slot capacity.
    AutoCapacity,
}

/// Immutable record of one completed round, kept for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSnapshot {
    /// 1-based round number.
    pub number: u32,
    /// Terminal round status (`Stopped` or `Busted`).
    pub status: RoundStatus,
    /// Bank reason; `None` for busted rounds.
    pub bank_reason: Option<BankReason>,
    /// Modules drawn during the round, in draw order.
    pub drawn: Vec<Module>,
    /// Flux accumulated before the round ended.
    pub round_flux: u32,
    /// Credits accumulated before the round ended.
    pub round_credits: u32,
    /// Instability reading when the round ended.
    pub round_instability: i32,
}

/// The complete state of one run.
///
/// Created by [`GameState::new`] (or `with_options`), transformed exclusively
/// by [`crate::reduce`], and replaced wholesale by a `new-run` action. Fields
/// are public and read-only by convention: a presentation layer renders them,
/// nothing outside the reducer writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// How the run was started.
    pub mode: GameMode,
    /// The seed string this run derives all randomness from.
    pub seed: String,
    /// Challenge date for daily runs.
    pub daily_date: Option<String>,
    /// Run-level status.
    pub status: GameStatus,
    /// Completed rounds (banked or busted).
    pub rounds: u32,
    /// Rounds taken to win; `None` until the run is won.
    pub score: Option<u32>,
    /// Round-level status.
    pub round_status: RoundStatus,
    /// Rounds lost to instability meltdowns.
    pub volatility_exceeded_count: u32,
    /// Banked flux; survives busts.
    pub banked_flux: u32,
    /// Banked credits; survives busts.
    pub banked_credits: u32,
    /// Flux at risk in the current round.
    pub round_flux: u32,
    /// Credits at risk in the current round.
    pub round_credits: u32,
    /// Instability accumulated in the current round.
    pub round_instability: i32,
    /// Active-pile slots before a round auto-banks.
    pub slot_capacity: usize,
    /// Instability that busts the current round when reached.
    pub instability_threshold: i32,
    /// Price of the next slot-capacity upgrade.
    pub next_slot_capacity_cost: u32,
    /// Price of the next instability-threshold upgrade.
    pub next_instability_cost: u32,
    /// Warp cores that must be banked in one round to win.
    pub warp_core_target: u32,
    /// Undrawn modules.
    pub bag: Vec<Module>,
    /// Resolved modules awaiting recycling.
    pub discard: Vec<Module>,
    /// Modules drawn this round, in draw order.
    pub active_pile: Vec<Module>,
    /// The pile most recently moved to the discard, kept for display.
    pub last_discarded: Vec<Module>,
    /// RNG cursor; consumed and replaced by every shuffle or draw.
    pub rng_state: u32,
    /// Next id handed to a purchased module.
    pub next_module_id: u32,
    /// Snapshot of the most recently completed round.
    pub last_round: Option<RoundSnapshot>,
    /// Human-readable label of the seed-derived threshold modifier.
    pub seed_modifier: String,
    /// Append-only human-readable event log.
    pub log: Vec<String>,
}

impl GameState {
    /// Build the initial state for `seed` in seeded mode.
    pub fn new(seed: impl Into<String>) -> Self {
        Self::with_options(seed, GameMode::Seeded, None)
    }

    /// Build the initial state for `seed` with explicit mode metadata.
    ///
    /// Daily runs without an explicit date recover it from the
    /// `daily-<date>` seed prefix when present.
    pub fn with_options(seed: impl Into<String>, mode: GameMode, daily_date: Option<String>) -> Self {
        let seed = seed.into();
        let bag = Self::starting_bag();
        let seed_hash = rng::hash_seed(&seed);
        let (delta, modifier_label) = seed_instability_modifier(seed_hash);
        let instability_threshold = (START_INSTABILITY_THRESHOLD + delta).max(INSTABILITY_FLOOR);
        let daily_date = match (mode, daily_date) {
            (GameMode::Daily, None) => seed::daily_date_from_seed(&seed).map(str::to_string),
            (_, date) => date,
        };
        let next_module_id = bag.len() as u32 + 1;
        let log = vec![
            format!("Run initialized with seed \"{seed}\"."),
            modifier_label.to_string(),
        ];

        Self {
            mode,
            seed,
            daily_date,
            status: GameStatus::Playing,
            rounds: 0,
            score: None,
            round_status: RoundStatus::Drawing,
            volatility_exceeded_count: 0,
            banked_flux: START_FLUX,
            banked_credits: START_CREDITS,
            round_flux: 0,
            round_credits: 0,
            round_instability: 0,
            slot_capacity: START_SLOT_CAPACITY,
            instability_threshold,
            next_slot_capacity_cost: START_SLOT_CAPACITY_COST,
            next_instability_cost: START_INSTABILITY_COST,
            warp_core_target: WARP_CORE_TARGET,
            bag,
            discard: Vec::new(),
            active_pile: Vec::new(),
            last_discarded: Vec::new(),
            rng_state: seed_hash,
            next_module_id,
            last_round: None,
            seed_modifier: modifier_label.to_string(),
            log,
        }
    }

    /// The fixed starting bag: two flux coils, a sponsored relay, a
    /// stabilizer and a volatile lens, ids 1-5.
    pub fn starting_bag() -> Vec<Module> {
        let kinds = [
            ModuleKind::FluxCoil,
            ModuleKind::FluxCoil,
            ModuleKind::SponsoredRelay,
            ModuleKind::Stabilizer,
            ModuleKind::VolatileLens,
        ];
        kinds
            .into_iter()
            .enumerate()
            .map(|(index, kind)| Module::new(kind, ModuleId(index as u32 + 1)))
            .collect()
    }

    /// Total modules across the bag, discard and active pile.
    pub fn module_count(&self) -> usize {
        self.bag.len() + self.discard.len() + self.active_pile.len()
    }

    pub(crate) fn push_log(&mut self, entry: String) {
        self.log.push(entry);
    }
}

/// Derive the instability-threshold nudge from a seed hash: one of −1, 0, +1
/// with a matching log label.
fn seed_instability_modifier(seed_hash: u32) -> (i32, &'static str) {
    match seed_hash % 3 {
        0 => (-1, "Seed modifier: volatile reactor (-1 instability threshold)."),
        1 => (0, "Seed modifier: neutral reactor (no instability modifier)."),
        _ => (1, "Seed modifier: reinforced reactor (+1 instability threshold)."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_bag_is_five_low_tier_modules() {
        let bag = GameState::starting_bag();
        assert_eq!(bag.len(), 5);
        assert_eq!(
            bag.iter().map(|m| m.kind).collect::<Vec<_>>(),
            vec![
                ModuleKind::FluxCoil,
                ModuleKind::FluxCoil,
                ModuleKind::SponsoredRelay,
                ModuleKind::Stabilizer,
                ModuleKind::VolatileLens,
            ]
        );
        assert_eq!(bag[0].id, ModuleId(1));
        assert_eq!(bag[4].id, ModuleId(5));
    }

    #[test]
    fn initial_state_uses_documented_constants() {
        let state = GameState::new("baseline-seed");
        assert_eq!(state.mode, GameMode::Seeded);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.round_status, RoundStatus::Drawing);
        assert_eq!(state.rounds, 0);
        assert_eq!(state.score, None);
        assert_eq!((state.banked_flux, state.banked_credits), (0, 0));
        assert_eq!(state.slot_capacity, START_SLOT_CAPACITY);
        assert_eq!(state.next_slot_capacity_cost, START_SLOT_CAPACITY_COST);
        assert_eq!(state.next_instability_cost, START_INSTABILITY_COST);
        assert_eq!(state.warp_core_target, WARP_CORE_TARGET);
        assert_eq!(state.next_module_id, 6);
        assert_eq!(state.rng_state, crate::rng::hash_seed("baseline-seed"));
        assert!(state.discard.is_empty() && state.active_pile.is_empty());
        assert!(state.last_round.is_none());
    }

    #[test]
    fn seed_modifier_covers_all_residues() {
        assert_eq!(seed_instability_modifier(0).0, -1);
        assert_eq!(seed_instability_modifier(1).0, 0);
        assert_eq!(seed_instability_modifier(2).0, 1);
        // "baseline-seed" hashes to a multiple of 3: volatile reactor.
        let state = GameState::new("baseline-seed");
        assert_eq!(state.instability_threshold, 3);
        assert!(state.seed_modifier.contains("volatile reactor"));
    }

    #[test]
    fn daily_date_is_inferred_from_seed_prefix() {
        let explicit = GameState::with_options(
            "daily-2026-03-01",
            GameMode::Daily,
            Some("2026-03-01".to_string()),
        );
        assert_eq!(explicit.daily_date.as_deref(), Some("2026-03-01"));

        let implicit = GameState::with_options("daily-2026-03-02", GameMode::Daily, None);
        assert_eq!(implicit.daily_date.as_deref(), Some("2026-03-02"));

        let seeded = GameState::new("daily-2026-03-02");
        assert_eq!(seeded.daily_date, None);
    }

    #[test]
    fn initial_log_names_seed_and_modifier() {
        let state = GameState::new("log-seed");
        assert_eq!(state.log.len(), 2);
        assert_eq!(state.log[0], "Run initialized with seed \"log-seed\".");
        assert!(state.log[1].starts_with("Seed modifier:"));
        assert_eq!(state.log[1], state.seed_modifier);
    }
}
