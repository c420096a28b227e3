//! Share links: the `(mode, seed, date)` triple round-tripped through a URL
//! query string so a run can be replayed elsewhere.

use serde::Serialize;
use thiserror::Error;

use crate::action::GameAction;
use crate::seed::{daily_date_from_seed, daily_seed};
use crate::state::{GameMode, GameState};

/// Failure modes when parsing a share-link query string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareLinkError {
    /// The `mode` parameter named an unknown game mode.
    #[error("unknown game mode `{0}`")]
    UnknownMode(String),
    /// A daily link carried neither a `date` nor a daily seed.
    #[error("daily share links require a `date` parameter")]
    MissingDate,
    /// A non-daily link carried no `seed` parameter.
    #[error("share links require a `seed` parameter")]
    MissingSeed,
}

/// The replayable triple encoded in a share link.
///
/// Reconstructing a run from a parsed link and replaying the same actions
/// reproduces the original state field for field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    /// Game mode of the shared run.
    pub mode: GameMode,
    /// Seed string of the shared run.
    pub seed: String,
    /// Challenge date, for daily runs.
    pub daily_date: Option<String>,
}

impl ShareLink {
    /// The link describing `state`'s run.
    pub fn for_state(state: &GameState) -> Self {
        Self {
            mode: state.mode,
            seed: state.seed.clone(),
            daily_date: state.daily_date.clone(),
        }
    }

    /// Encode as a query string: `mode=daily&date=<d>` for daily runs,
    /// `mode=<m>&seed=<s>` otherwise.
    pub fn to_query(&self) -> String {
        if self.mode == GameMode::Daily {
            let date = self
                .daily_date
                .as_deref()
                .or_else(|| daily_date_from_seed(&self.seed));
            if let Some(date) = date {
                return format!("mode=daily&date={date}");
            }
        }
        format!("mode={}&seed={}", self.mode, self.seed)
    }

    /// Decode a query string produced by [`ShareLink::to_query`].
    ///
    /// Parameter order is irrelevant; a missing mode defaults to seeded.
    /// Daily links rebuild the seed from the date, so the triple survives the
    /// round trip verbatim.
    pub fn parse_query(query: &str) -> Result<Self, ShareLinkError> {
        let mut mode_param: Option<&str> = None;
        let mut seed_param: Option<&str> = None;
        let mut date_param: Option<&str> = None;
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "mode" => mode_param = Some(value),
                "seed" => seed_param = Some(value),
                "date" => date_param = Some(value),
                _ => {}
            }
        }

        let mode = match mode_param {
            None => {
                if date_param.is_some() {
                    GameMode::Daily
                } else {
                    GameMode::Seeded
                }
            }
            Some("random") => GameMode::Random,
            Some("seeded") => GameMode::Seeded,
            Some("daily") => GameMode::Daily,
            Some(other) => return Err(ShareLinkError::UnknownMode(other.to_string())),
        };

        if mode == GameMode::Daily {
            let date = match (date_param, seed_param) {
                (Some(date), _) if !date.is_empty() => date.to_string(),
                (_, Some(seed)) => daily_date_from_seed(seed)
                    .ok_or(ShareLinkError::MissingDate)?
                    .to_string(),
                _ => return Err(ShareLinkError::MissingDate),
            };
            return Ok(Self {
                mode,
                seed: daily_seed(&date),
                daily_date: Some(date),
            });
        }

        let seed = match seed_param {
            Some(seed) if !seed.is_empty() => seed.to_string(),
            _ => return Err(ShareLinkError::MissingSeed),
        };
        Ok(Self {
            mode,
            seed,
            daily_date: None,
        })
    }

    /// The `new-run` action that reproduces this link's run.
    pub fn new_run_action(&self) -> GameAction {
        GameAction::NewRun {
            seed: self.seed.clone(),
            mode: Some(self.mode),
            daily_date: self.daily_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_links_round_trip() {
        let link = ShareLink {
            mode: GameMode::Seeded,
            seed: "kx72p0qa".to_string(),
            daily_date: None,
        };
        let query = link.to_query();
        assert_eq!(query, "mode=seeded&seed=kx72p0qa");
        assert_eq!(ShareLink::parse_query(&query).unwrap(), link);
    }

    #[test]
    fn random_links_round_trip() {
        let link = ShareLink {
            mode: GameMode::Random,
            seed: "a1b2c3d4".to_string(),
            daily_date: None,
        };
        assert_eq!(ShareLink::parse_query(&link.to_query()).unwrap(), link);
    }

    #[test]
    fn daily_links_round_trip_through_the_date() {
        let link = ShareLink {
            mode: GameMode::Daily,
            seed: "daily-2026-03-01".to_string(),
            daily_date: Some("2026-03-01".to_string()),
        };
        let query = link.to_query();
        assert_eq!(query, "mode=daily&date=2026-03-01");
        assert_eq!(ShareLink::parse_query(&query).unwrap(), link);
    }

    #[test]
    fn parameter_order_does_not_matter() {
        let link = ShareLink::parse_query("seed=zz9&mode=random").unwrap();
        assert_eq!(link.mode, GameMode::Random);
        assert_eq!(link.seed, "zz9");
    }

    #[test]
    fn bare_seed_defaults_to_seeded_mode() {
        let link = ShareLink::parse_query("seed=plain").unwrap();
        assert_eq!(link.mode, GameMode::Seeded);
        assert_eq!(link.seed, "plain");
        assert_eq!(link.daily_date, None);
    }

    #[test]
    fn daily_link_accepts_a_daily_seed_in_place_of_a_date() {
        let link = ShareLink::parse_query("mode=daily&seed=daily-2026-04-05").unwrap();
        assert_eq!(link.daily_date.as_deref(), Some("2026-04-05"));
        assert_eq!(link.seed, "daily-2026-04-05");
    }

    #[test]
    fn malformed_links_fail_with_typed_errors() {
        assert_eq!(
            ShareLink::parse_query("mode=weekly&seed=x"),
            Err(ShareLinkError::UnknownMode("weekly".to_string()))
        );
        assert_eq!(
            ShareLink::parse_query("mode=daily"),
            Err(ShareLinkError::MissingDate)
        );
        assert_eq!(
            ShareLink::parse_query("mode=seeded"),
            Err(ShareLinkError::MissingSeed)
        );
    }

    #[test]
    fn link_reproduces_the_originating_state() {
        let state = GameState::with_options(
            "daily-2026-03-01",
            GameMode::Daily,
            Some("2026-03-01".to_string()),
        );
        let link = ShareLink::for_state(&state);
        let reparsed = ShareLink::parse_query(&link.to_query()).unwrap();
        let rebuilt = crate::reduce(GameState::new("placeholder"), reparsed.new_run_action());
        assert_eq!(rebuilt, state);
    }
}
