//! Property-based tests over arbitrary action sequences.
//!
//! Validates the structural invariants of the reducer:
//! - Pool conservation: modules only enter via purchases, never leave
//! - Round accumulators are zero whenever a round is not in progress
//! - The instability threshold never drops below its floor
//! - The log only grows
//! - Replaying a sequence is deterministic
//! - Illegal actions are exact no-ops

use proptest::prelude::*;
use std::collections::HashSet;
use warp_protocol_engine::{
    reduce, GameAction, GameState, GameStatus, ModuleKind, RoundStatus, UpgradeKind,
};
use warp_protocol_testkit::apply_actions;

fn module_kind_strategy() -> impl Strategy<Value = ModuleKind> {
    prop_oneof![
        Just(ModuleKind::FluxCoil),
        Just(ModuleKind::SponsoredRelay),
        Just(ModuleKind::Stabilizer),
        Just(ModuleKind::VolatileLens),
        Just(ModuleKind::WarpCore),
    ]
}

fn action_strategy() -> impl Strategy<Value = GameAction> {
    prop_oneof![
        4 => Just(GameAction::DrawModule),
        2 => Just(GameAction::StopAndBank),
        2 => Just(GameAction::StartNextRound),
        1 => module_kind_strategy().prop_map(|kind| GameAction::BuyModule { kind }),
        1 => prop_oneof![
            Just(UpgradeKind::SlotCapacity),
            Just(UpgradeKind::InstabilityThreshold),
        ]
        .prop_map(|kind| GameAction::BuyUpgrade { kind }),
    ]
}

fn seed_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,12}"
}

proptest! {
    /// Property: without `new-run`, the owned-module count equals the
    /// starting bag plus successful purchases, and ids stay unique.
    #[test]
    fn pools_conserve_modules(
        seed in seed_strategy(),
        actions in prop::collection::vec(action_strategy(), 0..60),
    ) {
        let mut state = GameState::new(seed.as_str());
        for action in actions {
            state = reduce(state, action);

            let purchases = (state.next_module_id - 6) as usize;
            prop_assert_eq!(state.module_count(), 5 + purchases);

            let ids: HashSet<u32> = state
                .bag
                .iter()
                .chain(state.discard.iter())
                .chain(state.active_pile.iter())
                .map(|module| module.id.0)
                .collect();
            prop_assert_eq!(ids.len(), state.module_count());
        }
    }

    /// Property: round accumulators reset whenever a round ends, whatever
    /// ended it.
    #[test]
    fn accumulators_are_zero_between_rounds(
        seed in seed_strategy(),
        actions in prop::collection::vec(action_strategy(), 0..60),
    ) {
        let mut state = GameState::new(seed.as_str());
        for action in actions {
            state = reduce(state, action);
            if state.round_status != RoundStatus::Drawing {
                prop_assert_eq!(state.round_flux, 0);
                prop_assert_eq!(state.round_credits, 0);
                prop_assert_eq!(state.round_instability, 0);
            }
            prop_assert!(state.instability_threshold >= 2);
        }
    }

    /// Property: the log is append-only.
    #[test]
    fn the_log_only_grows(
        seed in seed_strategy(),
        actions in prop::collection::vec(action_strategy(), 0..40),
    ) {
        let mut state = GameState::new(seed.as_str());
        for action in actions {
            let log_before = state.log.clone();
            state = reduce(state, action);
            prop_assert!(state.log.len() >= log_before.len());
            prop_assert_eq!(&state.log[..log_before.len()], &log_before[..]);
        }
    }

    /// Property: a fixed seed and action sequence always lands on the same
    /// state, the log text included.
    #[test]
    fn replays_are_deterministic(
        seed in seed_strategy(),
        actions in prop::collection::vec(action_strategy(), 0..60),
    ) {
        let first = apply_actions(GameState::new(seed.as_str()), actions.clone());
        let second = apply_actions(GameState::new(seed.as_str()), actions);
        prop_assert_eq!(first, second);
    }

    /// Property: every action except `new-run` is a no-op on a won run.
    #[test]
    fn won_runs_absorb_all_actions(
        seed in seed_strategy(),
        action in action_strategy(),
    ) {
        let mut state = GameState::new(seed.as_str());
        state.status = GameStatus::Won;
        state.score = Some(3);
        let next = reduce(state.clone(), action);
        prop_assert_eq!(next, state);
    }

    /// Property: drawing while the round is stopped changes nothing.
    #[test]
    fn stopped_rounds_ignore_draws(seed in seed_strategy()) {
        let stopped = reduce(GameState::new(seed.as_str()), GameAction::StopAndBank);
        prop_assert_eq!(stopped.round_status, RoundStatus::Stopped);
        let redrawn = reduce(stopped.clone(), GameAction::DrawModule);
        prop_assert_eq!(redrawn, stopped);
    }
}
