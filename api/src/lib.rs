pub mod access;
pub mod client;
pub mod localtime;
pub mod plays;
pub mod scoreboard;
pub mod store;
pub mod summary;

pub use scoreboard::{Scoreboard, ScoreboardGame};
pub use store::{DocumentKind, DocumentStore};
pub use summary::Summary;

// ---------------------------------------------------------------------------
// Display projections shared across extractors
// ---------------------------------------------------------------------------

/// One row of the scoring-play timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringPlay {
    pub period: String,      // "2ND QUARTER", "OT 1"
    pub clock: String,       // "5:12"
    pub description: String, // "Lakers: Layup (LeBron James #23)"
}

impl ScoringPlay {
    pub fn into_triple(self) -> (String, String, String) {
        (self.period, self.clock, self.description)
    }
}

impl From<ScoringPlay> for (String, String, String) {
    fn from(play: ScoringPlay) -> Self {
        play.into_triple()
    }
}

/// The seven per-team lines shown in a box-score table, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamStatLines {
    pub field_goal_pct: Vec<String>,
    pub three_point_pct: Vec<String>,
    pub free_throw_pct: Vec<String>,
    pub rebounds: Vec<String>,
    pub assists: Vec<String>,
    pub turnovers: Vec<String>,
    pub points: Vec<String>,
}

impl TeamStatLines {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            field_goal_pct: summary.field_goal_pct(),
            three_point_pct: summary.three_point_pct(),
            free_throw_pct: summary.free_throw_pct(),
            rebounds: summary.rebounds(),
            assists: summary.assists(),
            turnovers: summary.turnovers(),
            points: summary.points(),
        }
    }

    /// `(label, lines)` pairs in table order.
    pub fn rows(&self) -> [(&'static str, &[String]); 7] {
        [
            ("FG%", self.field_goal_pct.as_slice()),
            ("3P%", self.three_point_pct.as_slice()),
            ("FT%", self.free_throw_pct.as_slice()),
            ("REB", self.rebounds.as_slice()),
            ("AST", self.assists.as_slice()),
            ("TO", self.turnovers.as_slice()),
            ("PTS", self.points.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.rows().iter().all(|(_, lines)| lines.is_empty())
    }
}
