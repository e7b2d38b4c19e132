use crate::access::{array, get, text};
use crate::path;
use serde_json::Value;
use std::sync::Arc;

pub const UNKNOWN_MATCHUP: &str = "Unknown matchup";

/// Extractor view over one scoreboard snapshot.
///
/// Every projection yields exactly one entry per element of `events`, so the
/// lists stay index-aligned with each other.
#[derive(Debug, Clone)]
pub struct Scoreboard {
    doc: Arc<Value>,
}

/// One scoreboard row, assembled from the five projections at the same index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreboardGame {
    pub event_id: String,
    pub matchup: String,
    pub score: String,
    pub state: String,
    pub tipoff: String,
}

impl ScoreboardGame {
    pub fn is_live(&self) -> bool {
        self.state == "in"
    }
}

impl Scoreboard {
    pub fn new(doc: Arc<Value>) -> Self {
        Self { doc }
    }

    pub fn from_value(doc: Value) -> Self {
        Self::new(Arc::new(doc))
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }

    /// `"<away> @ <home>"` per event.
    pub fn matchups(&self) -> Vec<String> {
        self.project(|event| {
            let home = text(competitor(event, "home")?, path!["team", "shortDisplayName"])?;
            let away = text(competitor(event, "away")?, path!["team", "shortDisplayName"])?;
            Some(format!("{away} @ {home}"))
        }, UNKNOWN_MATCHUP)
    }

    /// `"<away score> - <home score>"` per event.
    pub fn scores(&self) -> Vec<String> {
        self.project(|event| {
            let home = text(competitor(event, "home")?, path!["score"])?;
            let away = text(competitor(event, "away")?, path!["score"])?;
            Some(format!("{away} - {home}"))
        }, "")
    }

    /// `pre`, `in` or `post` per event, passed through verbatim.
    pub fn states(&self) -> Vec<String> {
        self.project(|event| text(event, path!["status", "type", "state"]), "")
    }

    /// Raw ISO start timestamps.
    pub fn tipoff_times(&self) -> Vec<String> {
        self.project(|event| text(event, path!["date"]), "")
    }

    pub fn event_ids(&self) -> Vec<String> {
        self.project(|event| text(event, path!["id"]), "")
    }

    pub fn games(&self) -> Vec<ScoreboardGame> {
        self.event_ids()
            .into_iter()
            .zip(self.matchups())
            .zip(self.scores())
            .zip(self.states())
            .zip(self.tipoff_times())
            .map(|((((event_id, matchup), score), state), tipoff)| ScoreboardGame {
                event_id,
                matchup,
                score,
                state,
                tipoff,
            })
            .collect()
    }

    fn events(&self) -> &[Value] {
        array(&self.doc, path!["events"]).unwrap_or_default()
    }

    fn project<F>(&self, extract: F, placeholder: &str) -> Vec<String>
    where
        F: Fn(&Value) -> Option<String>,
    {
        self.events()
            .iter()
            .map(|event| extract(event).unwrap_or_else(|| placeholder.to_owned()))
            .collect()
    }
}

fn competitor<'e>(event: &'e Value, side: &str) -> Option<&'e Value> {
    array(event, path!["competitions", 0, "competitors"])?
        .iter()
        .find(|c| get(c, path!["homeAway"]).and_then(Value::as_str) == Some(side))
}
