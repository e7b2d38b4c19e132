use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut request = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Scoreboard),
        (_, Char('2'), _) => guard.update_tab(MenuItem::GameDetail),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Scoreboard navigation
        (MenuItem::Scoreboard, Char('j') | KeyCode::Down, _) => guard.scoreboard_down(),
        (MenuItem::Scoreboard, Char('k') | KeyCode::Up, _) => guard.scoreboard_up(),
        (MenuItem::Scoreboard, Char('h') | KeyCode::Left, _) => {
            let date = guard.scoreboard_previous_day();
            request = Some(NetworkRequest::LoadScoreboard { date });
        }
        (MenuItem::Scoreboard, Char('l') | KeyCode::Right, _) => {
            let date = guard.scoreboard_next_day();
            request = Some(NetworkRequest::LoadScoreboard { date });
        }
        (MenuItem::Scoreboard, KeyCode::Enter, _) => {
            request = guard
                .scoreboard_select_game()
                .map(|event_id| NetworkRequest::LoadSummary { event_id });
        }

        // Game detail navigation
        (MenuItem::GameDetail, Char('j') | KeyCode::Down, _) => guard.detail_scroll_down(),
        (MenuItem::GameDetail, Char('k') | KeyCode::Up, _) => guard.detail_scroll_up(),
        (MenuItem::GameDetail, KeyCode::Esc, _) => guard.update_tab(MenuItem::Scoreboard),

        // Global
        (_, Char('r'), _) => request = Some(NetworkRequest::Refresh),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}
