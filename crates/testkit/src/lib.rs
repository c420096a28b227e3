#![warn(missing_docs)]
//! Deterministic test helpers for driving the engine through scripted action
//! sequences.

use warp_protocol_engine::{reduce, GameAction, GameState, Module, ModuleId, ModuleKind};

/// Reduce `actions` in order against `state`, returning the final state.
pub fn apply_actions(
    state: GameState,
    actions: impl IntoIterator<Item = GameAction>,
) -> GameState {
    actions.into_iter().fold(state, reduce)
}

/// Build modules of the given kinds with sequential ids starting at
/// `first_id`.
pub fn modules_of(kinds: &[ModuleKind], first_id: u32) -> Vec<Module> {
    kinds
        .iter()
        .enumerate()
        .map(|(offset, &kind)| Module::new(kind, ModuleId(first_id + offset as u32)))
        .collect()
}

/// Search for a seed whose starting instability threshold equals `target`.
///
/// Scans the `threshold-<target>-<n>` namespace. The seed modifier cycles
/// through all three residues, so the first few candidates hit; panics if
/// 500 candidates all miss.
pub fn find_seed_for_threshold(target: i32) -> String {
    for index in 0..500 {
        let seed = format!("threshold-{target}-{index}");
        if GameState::new(seed.as_str()).instability_threshold == target {
            return seed;
        }
    }
    panic!("no seed found for instability threshold {target}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_actions_folds_in_order() {
        let state = GameState::new("fold-seed");
        let after = apply_actions(state, [GameAction::DrawModule, GameAction::StopAndBank]);
        assert_eq!(after.rounds, 1);
        assert_eq!(after.active_pile.len(), 0);
    }

    #[test]
    fn modules_of_assigns_sequential_ids() {
        let modules = modules_of(&[ModuleKind::FluxCoil, ModuleKind::WarpCore], 10);
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].id, ModuleId(10));
        assert_eq!(modules[1].id, ModuleId(11));
        assert!(modules[1].is_warp_core);
    }

    #[test]
    fn threshold_search_covers_every_modifier() {
        for target in [3, 4, 5] {
            let seed = find_seed_for_threshold(target);
            assert_eq!(GameState::new(seed.as_str()).instability_threshold, target);
        }
    }
}
