//! Scoring-play timeline: one `(period, clock, description)` row per play.
use crate::ScoringPlay;
use crate::access::{first_text, get, int, text};
use crate::path;
use crate::summary::{regulation_label, team_name};
use serde_json::Value;

pub fn timeline(plays: &[Value]) -> Vec<ScoringPlay> {
    plays.iter().map(scoring_play).collect()
}

pub fn scoring_play(play: &Value) -> ScoringPlay {
    let period = int(play, path!["period"])
        .or_else(|| int(play, path!["period", "number"]))
        .map(period_label)
        .unwrap_or_default();
    let clock = first_text(play, &[path!["clock"], path!["clock", "displayValue"]])
        .unwrap_or_default();
    let base = first_text(play, &[path!["text"], path!["description"]]).unwrap_or_default();

    let mut description = format!("{}: {base}", team_name(play));
    let players = participants(play);
    if let Some(credit) = credit_line(&players) {
        description.push_str(&format!(" ({credit})"));
    }

    ScoringPlay { period, clock, description }
}

/// Overtime periods count from one ("OT 1", "OT 2", ...), unlike the game
/// header's "OVERTIME".
pub fn period_label(period: i64) -> String {
    match regulation_label(period) {
        Some(label) => label.to_owned(),
        None if period > 4 => format!("OT {}", period - 4),
        None => format!("PERIOD {period}"),
    }
}

fn participants(play: &Value) -> Vec<String> {
    let Some(list) = get(play, path!["participants"]).and_then(Value::as_array) else {
        return Vec::new();
    };

    list.iter()
        .filter_map(|participant| {
            let athlete = get(participant, path!["athlete"])?;
            let name = first_text(athlete, &[path!["displayName"], path!["shortName"]])?;
            Some(match text(athlete, path!["jersey"]) {
                Some(jersey) => format!("{name} #{jersey}"),
                None => name,
            })
        })
        .collect()
}

// Two names read as assist-to-scorer.
fn credit_line(players: &[String]) -> Option<String> {
    match players {
        [] => None,
        [only] => Some(only.clone()),
        [first, second] => Some(format!("{first} to {second}")),
        many => Some(many.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn athlete(name: &str, jersey: Option<&str>) -> Value {
        match jersey {
            Some(j) => json!({"athlete": {"displayName": name, "jersey": j}}),
            None => json!({"athlete": {"displayName": name}}),
        }
    }

    fn play_with(participants: Vec<Value>) -> Value {
        json!({
            "period": 2,
            "clock": "5:12",
            "team": {"shortDisplayName": "Lakers"},
            "text": "LeBron James makes 24-foot three point jumper",
            "participants": participants
        })
    }

    #[test]
    fn period_labels() {
        assert_eq!(period_label(1), "1ST QUARTER");
        assert_eq!(period_label(4), "4TH QUARTER");
        assert_eq!(period_label(5), "OT 1");
        assert_eq!(period_label(6), "OT 2");
        assert_eq!(period_label(9), "OT 5");
        assert_eq!(period_label(0), "PERIOD 0");
    }

    #[test]
    fn no_participants_means_no_parenthetical() {
        let row = scoring_play(&play_with(vec![]));
        assert_eq!(row.description, "Lakers: LeBron James makes 24-foot three point jumper");
        assert!(!row.description.contains('('));
    }

    #[test]
    fn single_participant_with_jersey() {
        let row = scoring_play(&play_with(vec![athlete("LeBron James", Some("23"))]));
        assert_eq!(
            row.description,
            "Lakers: LeBron James makes 24-foot three point jumper (LeBron James #23)"
        );
    }

    #[test]
    fn two_participants_read_assist_to_scorer() {
        let row = scoring_play(&play_with(vec![
            athlete("LeBron James", Some("23")),
            athlete("Anthony Davis", None),
        ]));
        assert!(row.description.ends_with("(LeBron James #23 to Anthony Davis)"));
        assert!(row.description.contains(" to "));
    }

    #[test]
    fn three_or_more_are_comma_joined_in_order() {
        let row = scoring_play(&play_with(vec![
            athlete("A", None),
            athlete("B", Some("7")),
            athlete("C", None),
        ]));
        assert!(row.description.ends_with("(A, B #7, C)"));
    }

    #[test]
    fn participants_without_names_are_skipped() {
        let row = scoring_play(&play_with(vec![
            json!({"athlete": {"shortName": "K. Durant", "jersey": "35"}}),
            json!({"type": "assister"}),
            json!({"athlete": {"jersey": "1"}}),
        ]));
        assert!(row.description.ends_with("(K. Durant #35)"));
    }

    #[test]
    fn defaults_for_missing_fields() {
        let row = scoring_play(&json!({"description": "Free throw 1 of 2"}));
        assert_eq!(row.period, "");
        assert_eq!(row.clock, "");
        assert_eq!(row.description, "Team: Free throw 1 of 2");

        let empty = scoring_play(&json!("not a play"));
        assert_eq!(empty.into_triple(), (String::new(), String::new(), "Team: ".to_owned()));
    }

    #[test]
    fn nested_period_and_clock_shapes() {
        let row = scoring_play(&json!({
            "period": {"number": 3},
            "clock": {"displayValue": "0:45"},
            "team": {"shortDisplayName": "Celtics"},
            "text": "Layup"
        }));
        assert_eq!(row.period, "3RD QUARTER");
        assert_eq!(row.clock, "0:45");
    }

    #[test]
    fn timeline_keeps_one_row_per_play_in_order() {
        let rows = timeline(&[
            json!({"period": 1, "clock": "11:40", "text": "first"}),
            json!(null),
            json!({"period": 5, "clock": "4:59", "text": "third"}),
        ]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].period, "1ST QUARTER");
        assert_eq!(rows[1].description, "Team: ");
        assert_eq!(rows[2].period, "OT 1");
        assert_eq!(rows[2].description, "Team: third");
    }
}
