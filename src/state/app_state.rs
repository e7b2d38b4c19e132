use crate::app::MenuItem;
use chrono::{Days, NaiveDate};

// ---------------------------------------------------------------------------
// Scoreboard state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ScoreboardState {
    /// Day whose scoreboard is (being) loaded.
    pub date: NaiveDate,
    /// Selected row; clamped whenever a new scoreboard arrives.
    pub selected: usize,
}

impl ScoreboardState {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, selected: 0 }
    }

    pub fn select_next(&mut self, game_count: usize) {
        if self.selected + 1 < game_count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self, game_count: usize) {
        self.selected = self.selected.min(game_count.saturating_sub(1));
    }

    pub fn previous_day(&mut self) {
        if let Some(day) = self.date.checked_sub_days(Days::new(1)) {
            self.date = day;
            self.selected = 0;
        }
    }

    pub fn next_day(&mut self) {
        if let Some(day) = self.date.checked_add_days(Days::new(1)) {
            self.date = day;
            self.selected = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// Game detail state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct GameDetailState {
    /// Event whose summary was last requested.
    pub event_id: Option<String>,
    /// The summary slot holds a document for `event_id`.
    pub loaded: bool,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Top-level app state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// Set once the first scoreboard response (or error) has come back.
    pub scoreboard_loaded: bool,
    pub scoreboard: ScoreboardState,
    pub game_detail: GameDetailState,
}

impl AppState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            scoreboard_loaded: false,
            scoreboard: ScoreboardState::new(date),
            game_detail: GameDetailState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = ScoreboardState::new(day(2026, 1, 11));
        state.select_prev();
        assert_eq!(state.selected, 0);
        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected, 2);
        state.clamp_selection(1);
        assert_eq!(state.selected, 0);
        state.select_next(0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn day_navigation_resets_selection() {
        let mut state = ScoreboardState::new(day(2026, 3, 1));
        state.selected = 4;
        state.previous_day();
        assert_eq!(state.date, day(2026, 2, 28));
        assert_eq!(state.selected, 0);
        state.next_day();
        state.next_day();
        assert_eq!(state.date, day(2026, 3, 2));
    }
}
