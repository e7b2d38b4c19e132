use crate::state::app_settings::{AppSettings, format_date};
use crate::state::app_state::AppState;
use log::debug;
use nba_api::{DocumentStore, Scoreboard, ScoreboardGame, Summary};
use std::sync::Arc;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Scoreboard,
    GameDetail,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    /// Shared with the network worker, which is the only writer.
    pub store: Arc<DocumentStore>,
}

impl App {
    pub fn new(settings: AppSettings, store: Arc<DocumentStore>) -> Self {
        let app = Self {
            state: AppState::new(settings.date),
            settings,
            store,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Extractor views over the current store snapshot
    // -----------------------------------------------------------------------

    pub fn scoreboard(&self) -> Scoreboard {
        self.store.scoreboard()
    }

    pub fn summary(&self) -> Summary {
        self.store.summary()
    }

    pub fn games(&self) -> Vec<ScoreboardGame> {
        self.scoreboard().games()
    }

    pub fn scoreboard_date(&self) -> String {
        format_date(self.state.scoreboard.date)
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_scoreboard_loaded(&mut self, date: &str) {
        if date == self.scoreboard_date() {
            self.state.last_error = None;
        }
        self.state.scoreboard_loaded = true;
        let count = self.scoreboard().len();
        self.state.scoreboard.clamp_selection(count);
    }

    pub fn on_summary_loaded(&mut self, event_id: &str) {
        debug!("summary for event {event_id} loaded");
        self.state.last_error = None;
        self.sync_detail_loaded();
    }

    pub fn on_refreshed(&mut self) {
        self.state.last_error = None;
        self.sync_detail_loaded();
        let count = self.scoreboard().len();
        self.state.scoreboard.clamp_selection(count);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.scoreboard_loaded = true;
        self.sync_detail_loaded();
        let count = self.scoreboard().len();
        self.state.scoreboard.clamp_selection(count);
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Scoreboard navigation
    // -----------------------------------------------------------------------

    pub fn scoreboard_down(&mut self) {
        let count = self.scoreboard().len();
        self.state.scoreboard.select_next(count);
    }

    pub fn scoreboard_up(&mut self) {
        self.state.scoreboard.select_prev();
    }

    /// Move to the previous day; returns the `YYYYMMDD` date to fetch.
    pub fn scoreboard_previous_day(&mut self) -> String {
        self.state.scoreboard.previous_day();
        self.scoreboard_date()
    }

    pub fn scoreboard_next_day(&mut self) -> String {
        self.state.scoreboard.next_day();
        self.scoreboard_date()
    }

    pub fn selected_event_id(&self) -> Option<String> {
        self.scoreboard()
            .event_ids()
            .into_iter()
            .nth(self.state.scoreboard.selected)
            .filter(|id| !id.is_empty())
    }

    /// Returns the event ID if the user pressed Enter on a game.
    /// Switches to the GameDetail tab as a side-effect.
    pub fn scoreboard_select_game(&mut self) -> Option<String> {
        let event_id = self.selected_event_id()?;
        if self.state.game_detail.event_id.as_deref() != Some(event_id.as_str()) {
            self.state.game_detail.scroll_offset = 0;
            self.state.game_detail.loaded = false;
        }
        self.state.game_detail.event_id = Some(event_id.clone());
        self.update_tab(MenuItem::GameDetail);
        Some(event_id)
    }

    // -----------------------------------------------------------------------
    // Game detail
    // -----------------------------------------------------------------------

    /// The detail tab only shows the summary slot when it holds the selected game.
    fn sync_detail_loaded(&mut self) {
        self.state.game_detail.loaded = match self.state.game_detail.event_id.as_deref() {
            Some(event_id) => self.store.holds_summary_for(event_id),
            None => false,
        };
    }

    pub fn detail_scroll_down(&mut self) {
        let plays = self.summary().scoring_plays().len() as u16;
        let offset = &mut self.state.game_detail.scroll_offset;
        if *offset + 1 < plays {
            *offset += 1;
        }
    }

    pub fn detail_scroll_up(&mut self) {
        self.state.game_detail.scroll_offset =
            self.state.game_detail.scroll_offset.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use nba_api::DocumentKind;
    use serde_json::json;

    fn app_with(scoreboard: serde_json::Value) -> App {
        let settings = AppSettings::from_lookup(
            |_| None,
            NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
            None,
        );
        let store = Arc::new(DocumentStore::new());
        store.set_scoreboard(Some(scoreboard));
        App::new(settings, store)
    }

    fn two_games() -> serde_json::Value {
        json!({"events": [
            {"id": "401585567", "competitions": [{"competitors": [
                {"homeAway": "home", "team": {"shortDisplayName": "Lakers"}, "score": "102"},
                {"homeAway": "away", "team": {"shortDisplayName": "Celtics"}, "score": "98"}
            ]}]},
            {"id": "401585568"}
        ]})
    }

    #[test]
    fn selecting_a_game_switches_tab_and_returns_event_id() {
        let mut app = app_with(two_games());
        app.scoreboard_down();
        assert_eq!(app.scoreboard_select_game().as_deref(), Some("401585568"));
        assert_eq!(app.state.active_tab, MenuItem::GameDetail);
        assert_eq!(app.state.game_detail.event_id.as_deref(), Some("401585568"));
        assert!(!app.state.game_detail.loaded);

        app.store.set_fetched(DocumentKind::Summary, "401585568", Some(json!({})));
        app.on_summary_loaded("401585568");
        assert!(app.state.game_detail.loaded);
    }

    #[test]
    fn another_games_summary_does_not_count_as_loaded() {
        let mut app = app_with(two_games());
        // A refresh for the first game lands after the second was picked.
        app.store.set_fetched(DocumentKind::Summary, "401585567", Some(json!({"header": {}})));
        app.scoreboard_down();
        app.scoreboard_select_game();

        app.on_error("API error for scoreboard".into());
        assert!(!app.state.game_detail.loaded);
        app.on_refreshed();
        assert!(!app.state.game_detail.loaded);

        app.store.set_fetched(DocumentKind::Summary, "401585568", Some(json!({"header": {}})));
        app.on_summary_loaded("401585568");
        assert!(app.state.game_detail.loaded);
    }

    #[test]
    fn empty_scoreboard_selects_nothing() {
        let mut app = app_with(json!({}));
        app.scoreboard_down();
        assert_eq!(app.scoreboard_select_game(), None);
        assert_eq!(app.state.active_tab, MenuItem::Scoreboard);
    }

    #[test]
    fn day_navigation_yields_api_dates() {
        let mut app = app_with(two_games());
        assert_eq!(app.scoreboard_previous_day(), "20260110");
        assert_eq!(app.scoreboard_next_day(), "20260111");
        assert_eq!(app.scoreboard_next_day(), "20260112");
    }

    #[test]
    fn error_clamps_selection_to_what_the_store_holds() {
        let mut app = app_with(two_games());
        app.scoreboard_down();
        app.store.set_scoreboard(None);
        app.on_error("Network error".into());
        assert_eq!(app.state.scoreboard.selected, 0);
        assert_eq!(app.state.last_error.as_deref(), Some("Network error"));
        assert!(app.games().is_empty());
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app_with(two_games());
        app.update_tab(MenuItem::GameDetail);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::GameDetail);
    }
}
