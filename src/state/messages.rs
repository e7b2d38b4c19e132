use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkRequest {
    /// Fetch the scoreboard for a `YYYYMMDD` day.
    LoadScoreboard { date: String },
    LoadSummary { event_id: String },
    /// Re-fetch whatever was requested last, of each kind.
    Refresh,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    ScoreboardLoaded { date: String },
    SummaryLoaded { event_id: String },
    Refreshed,
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
