#![warn(missing_docs)]
//! Deterministic core of the Warp Protocol push-your-luck game.
//!
//! Three cooperating parts: a seeded RNG ([`rng`]), a module catalog
//! ([`Module`], [`ModuleKind`]) and a pure reducer ([`reduce`]) over the run
//! aggregate ([`GameState`]). A caller holds a state value and dispatches
//! actions one at a time; supplying the same seed and action sequence always
//! reproduces the same state, log text included. The crate performs no I/O;
//! the only entry point for external randomness is [`generate_seed`].

mod action;
mod module;
mod reducer;
pub mod rng;
mod seed;
mod share;
mod state;

pub use action::{GameAction, UpgradeKind};
pub use module::{Module, ModuleId, ModuleKind};
pub use reducer::reduce;
pub use seed::{
    daily_date_from_seed, daily_seed, generate_seed, generate_seed_with, DAILY_SEED_PREFIX,
    SEED_LENGTH,
};
pub use share::{ShareLink, ShareLinkError};
pub use state::{
    BankReason, GameMode, GameState, GameStatus, RoundSnapshot, RoundStatus, INSTABILITY_COST_STEP,
    INSTABILITY_FLOOR, SLOT_CAPACITY_COST_STEP, START_CREDITS, START_FLUX, START_INSTABILITY_COST,
    START_INSTABILITY_THRESHOLD, START_SLOT_CAPACITY, START_SLOT_CAPACITY_COST, WARP_CORE_TARGET,
};
