//! Deterministic action script runner.
//!
//! Scripts are a JSON object with a `steps` array of engine actions (the
//! tagged kebab-case encoding), replayed in file order against an initial
//! state. Replaying the same script against the same seed always lands on
//! the same final state.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::Path};
use warp_protocol_engine::{reduce, GameAction, GameState};

#[derive(Debug, Deserialize)]
struct ActionScriptFile {
    steps: Vec<GameAction>,
}

#[derive(Debug)]
pub struct ActionScript {
    steps: Vec<GameAction>,
}

impl ActionScript {
    /// Load an action script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Load an action script from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: ActionScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("action script contains no steps");
        }
        Ok(Self { steps: file.steps })
    }

    /// Number of steps in the script.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Replay every step in order against `state`.
    pub fn replay(&self, state: GameState) -> GameState {
        self.steps.iter().cloned().fold(state, reduce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_protocol_testkit::apply_actions;

    const SCRIPT: &str = r#"{
        "steps": [
            {"type": "draw-module"},
            {"type": "draw-module"},
            {"type": "stop-and-bank"},
            {"type": "start-next-round"}
        ]
    }"#;

    #[test]
    fn script_rejects_empty_steps() {
        let err = ActionScript::from_str(r#"{"steps": []}"#).unwrap_err();
        assert!(
            err.to_string().contains("no steps"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn script_parses_tagged_actions() {
        let script = ActionScript::from_str(SCRIPT).expect("script should parse");
        assert_eq!(script.len(), 4);
        assert_eq!(script.steps[0], GameAction::DrawModule);
        assert_eq!(script.steps[2], GameAction::StopAndBank);
    }

    #[test]
    fn replay_matches_a_manual_fold_and_is_deterministic() {
        let script = ActionScript::from_str(SCRIPT).expect("script should parse");

        let replayed = script.replay(GameState::new("script-seed"));
        let folded = apply_actions(GameState::new("script-seed"), script.steps.clone());
        assert_eq!(replayed, folded);

        let again = script.replay(GameState::new("script-seed"));
        assert_eq!(replayed, again);
    }
}
