//! Action values: the only inputs the reducer accepts.

use serde::{Deserialize, Serialize};

use crate::module::ModuleKind;
use crate::state::GameMode;

/// Upgrade tracks purchasable with credits between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpgradeKind {
    /// +1 active-pile slot per tier.
    SlotCapacity,
    /// +1 instability tolerance per tier.
    InstabilityThreshold,
}

impl UpgradeKind {
    /// Human-readable track name used in log entries.
    pub fn display_name(self) -> &'static str {
        match self {
            UpgradeKind::SlotCapacity => "slot capacity",
            UpgradeKind::InstabilityThreshold => "instability threshold",
        }
    }
}

/// One discrete input to [`crate::reduce`].
///
/// A closed sum type: unrecognized actions are unrepresentable, so the
/// reducer needs no runtime fallback. The serde encoding tags each action
/// with a kebab-case `type` field, which is also the wire shape action
/// scripts use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameAction {
    /// Draw one module from the bag into the active pile.
    DrawModule,
    /// End the round, banking accumulated resources.
    StopAndBank,
    /// Buy a module of `kind` into the bag (between rounds).
    BuyModule {
        /// Catalog kind to purchase.
        kind: ModuleKind,
    },
    /// Buy one tier of an upgrade track (between rounds).
    BuyUpgrade {
        /// Upgrade track to advance.
        kind: UpgradeKind,
    },
    /// Recycle the discard into the bag and resume drawing.
    StartNextRound,
    /// Discard the current run and start over from `seed`.
    NewRun {
        /// Seed for the fresh run.
        seed: String,
        /// Mode metadata; defaults to seeded when omitted.
        #[serde(default)]
        mode: Option<GameMode>,
        /// Challenge date for daily runs.
        #[serde(default)]
        daily_date: Option<String>,
    },
}
