use crate::ScoringPlay;
use crate::access::{array, first_text, get, int, scalar_text, text};
use crate::path;
use crate::plays;
use serde_json::Value;
use std::sync::Arc;

pub const TEAM_PLACEHOLDER: &str = "Team";
pub const STAT_PLACEHOLDER: &str = "?";
pub const OFFICIAL_PLACEHOLDER: &str = "Official";

static NULL: Value = Value::Null;

/// Selects a box-score statistic by canonical name or by abbreviation.
/// Upstream feeds expose one or the other, so either is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatMatcher {
    pub name: &'static str,
    pub abbreviation: &'static str,
}

impl StatMatcher {
    pub const fn new(name: &'static str, abbreviation: &'static str) -> Self {
        Self { name, abbreviation }
    }

    pub fn matches(&self, stat: &StatRecord<'_>) -> bool {
        stat.name == Some(self.name) || stat.abbreviation == Some(self.abbreviation)
    }
}

pub const FIELD_GOAL_PCT: StatMatcher = StatMatcher::new("fieldGoalPct", "FG%");
pub const THREE_POINT_PCT: StatMatcher = StatMatcher::new("threePointPct", "3P%");
pub const FREE_THROW_PCT: StatMatcher = StatMatcher::new("freeThrowPct", "FT%");
pub const REBOUNDS: StatMatcher = StatMatcher::new("rebounds", "REB");
pub const ASSISTS: StatMatcher = StatMatcher::new("assists", "AST");
pub const TURNOVERS: StatMatcher = StatMatcher::new("turnovers", "TO");

/// A box-score statistic entry reduced to the fields matching cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatRecord<'a> {
    pub name: Option<&'a str>,
    pub abbreviation: Option<&'a str>,
    pub display_value: Option<String>,
}

impl<'a> StatRecord<'a> {
    pub fn from_value(stat: &'a Value) -> Self {
        Self {
            name: get(stat, path!["name"]).and_then(Value::as_str),
            abbreviation: get(stat, path!["abbreviation"]).and_then(Value::as_str),
            display_value: text(stat, path!["displayValue"]),
        }
    }
}

/// Extractor view over one game-summary snapshot.
#[derive(Debug, Clone)]
pub struct Summary {
    doc: Arc<Value>,
}

impl Summary {
    pub fn new(doc: Arc<Value>) -> Self {
        Self { doc }
    }

    pub fn from_value(doc: Value) -> Self {
        Self::new(Arc::new(doc))
    }

    // -----------------------------------------------------------------------
    // Game state: header.competitions[0].status
    // -----------------------------------------------------------------------

    pub fn quarter_label(&self) -> String {
        int(self.competition(), path!["status", "period"])
            .map(quarter_label)
            .unwrap_or_default()
    }

    pub fn game_clock(&self) -> String {
        text(self.competition(), path!["status", "displayClock"]).unwrap_or_default()
    }

    pub fn game_status(&self) -> String {
        text(self.competition(), path!["status", "type", "state"]).unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Team statistics
    // -----------------------------------------------------------------------

    /// `"<team>: <value>"` for every box-score team, in box-score order.
    pub fn project_stat(&self, matcher: StatMatcher) -> Vec<String> {
        let Some(teams) = array(&self.doc, path!["boxscore", "teams"]) else {
            return Vec::new();
        };

        teams
            .iter()
            .map(|team| {
                let value = array(team, path!["statistics"])
                    .unwrap_or_default()
                    .iter()
                    .map(StatRecord::from_value)
                    .find(|stat| matcher.matches(stat))
                    .and_then(|stat| stat.display_value)
                    .unwrap_or_else(|| STAT_PLACEHOLDER.to_owned());
                format!("{}: {value}", team_name(team))
            })
            .collect()
    }

    pub fn field_goal_pct(&self) -> Vec<String> {
        self.project_stat(FIELD_GOAL_PCT)
    }

    pub fn three_point_pct(&self) -> Vec<String> {
        self.project_stat(THREE_POINT_PCT)
    }

    pub fn free_throw_pct(&self) -> Vec<String> {
        self.project_stat(FREE_THROW_PCT)
    }

    pub fn rebounds(&self) -> Vec<String> {
        self.project_stat(REBOUNDS)
    }

    pub fn assists(&self) -> Vec<String> {
        self.project_stat(ASSISTS)
    }

    pub fn turnovers(&self) -> Vec<String> {
        self.project_stat(TURNOVERS)
    }

    /// Points come from the header competitors; the box score has no points
    /// entry among its team statistics.
    pub fn points(&self) -> Vec<String> {
        let Some(competitors) = array(self.competition(), path!["competitors"]) else {
            return Vec::new();
        };

        competitors
            .iter()
            .map(|competitor| {
                let score = text(competitor, path!["score"])
                    .unwrap_or_else(|| STAT_PLACEHOLDER.to_owned());
                format!("{}: {score}", team_name(competitor))
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Game info
    // -----------------------------------------------------------------------

    /// `"<venue> (<city>, <state>)"`, dropping whichever location parts are missing.
    pub fn venue(&self) -> String {
        let Some(venue) = get(&self.doc, path!["gameInfo", "venue"]).filter(|v| v.is_object())
        else {
            return String::new();
        };

        let name = first_text(venue, &[path!["fullName"], path!["name"]]).unwrap_or_default();
        let location: Vec<String> = [path!["address", "city"], path!["address", "state"]]
            .into_iter()
            .filter_map(|part| text(venue, part))
            .collect();

        if location.is_empty() {
            name
        } else {
            format!("{name} ({})", location.join(", "))
        }
    }

    pub fn attendance(&self) -> String {
        get(&self.doc, path!["gameInfo", "attendance"])
            .filter(|figure| figure.as_f64() != Some(0.0))
            .and_then(scalar_text)
            .map(|figure| format!("Attendance: {figure}"))
            .unwrap_or_default()
    }

    pub fn officials(&self) -> Vec<String> {
        array(&self.doc, path!["gameInfo", "officials"])
            .unwrap_or_default()
            .iter()
            .map(|official| {
                let name = first_text(official, &[path!["displayName"], path!["fullName"]])
                    .unwrap_or_else(|| OFFICIAL_PLACEHOLDER.to_owned());
                match official_position(official) {
                    Some(position) => format!("{name} ({position})"),
                    None => name,
                }
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Scoring plays
    // -----------------------------------------------------------------------

    pub fn scoring_plays(&self) -> Vec<ScoringPlay> {
        plays::timeline(array(&self.doc, path!["scoringPlays"]).unwrap_or_default())
    }

    fn competition(&self) -> &Value {
        get(&self.doc, path!["header", "competitions", 0]).unwrap_or(&NULL)
    }
}

/// Label for the game-state header. Period 5 reads "OVERTIME"; later
/// periods fall through to "PERIOD n".
pub fn quarter_label(period: i64) -> String {
    match regulation_label(period) {
        Some(label) => label.to_owned(),
        None if period == 5 => "OVERTIME".to_owned(),
        None => format!("PERIOD {period}"),
    }
}

pub(crate) fn regulation_label(period: i64) -> Option<&'static str> {
    match period {
        1 => Some("1ST QUARTER"),
        2 => Some("2ND QUARTER"),
        3 => Some("3RD QUARTER"),
        4 => Some("4TH QUARTER"),
        _ => None,
    }
}

pub(crate) fn team_name(node: &Value) -> String {
    text(node, path!["team", "shortDisplayName"]).unwrap_or_else(|| TEAM_PLACEHOLDER.to_owned())
}

// ESPN has sent `position` both as a bare string and as {name, displayName}.
fn official_position(official: &Value) -> Option<String> {
    let position = get(official, path!["position"]);
    position
        .and_then(scalar_text)
        .or_else(|| position.and_then(|p| first_text(p, &[path!["displayName"], path!["name"]])))
        .or_else(|| text(official, path!["positionName"]))
}
