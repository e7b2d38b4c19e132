mod app;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::{self, AppSettings, CliOverrides, parse_date};
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use nba_api::DocumentStore;
use nba_api::client::NbaApi;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(overrides) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    // Raise the level first so warnings about the other settings are kept.
    let log_level = app_settings::log_level(|key| std::env::var(key).ok())
        .unwrap_or(log::LevelFilter::Error);
    tui_logger::init_logger(log_level)?;
    tui_logger::set_default_level(log_level);

    let settings = AppSettings::load(overrides);
    let store = Arc::new(DocumentStore::new());
    let client = match settings.api_base.as_deref() {
        Some(base) => NbaApi::with_base_url(base),
        None => NbaApi::new(),
    };
    let refresh_interval = settings.refresh_interval;
    let app = Arc::new(Mutex::new(App::new(settings, store.clone())));
    info!("using API base {}", client.base_url());

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, store, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic refresh thread
    let periodic_updater = PeriodicRefresher::new(network_req_tx.clone(), refresh_interval);
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Trigger scoreboard load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();

    Ok(())
}

/// `None` means the arguments were fully handled (help, version) and the
/// program should exit.
fn handle_cli_args() -> Option<CliOverrides> {
    match parse_cli_args(std::env::args().skip(1)) {
        Ok(CliAction::Run(overrides)) => Some(overrides),
        Ok(CliAction::Help) => {
            println!("{}", usage_text());
            None
        }
        Ok(CliAction::Version) => {
            println!("courtside {}", env!("CARGO_PKG_VERSION"));
            None
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

#[derive(Debug, PartialEq)]
enum CliAction {
    Run(CliOverrides),
    Help,
    Version,
}

fn parse_cli_args(mut args: impl Iterator<Item = String>) -> Result<CliAction, String> {
    let mut overrides = CliOverrides::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "-d" | "--date" => {
                let raw = args.next().ok_or("Missing value for --date")?;
                let date = parse_date(&raw).ok_or(format!("Invalid date {raw:?}, expected YYYYMMDD"))?;
                overrides.date = Some(date);
            }
            _ => return Err(format!("Unknown argument: {arg}")),
        }
    }

    Ok(CliAction::Run(overrides))
}

fn usage_text() -> &'static str {
    "courtside - NBA scoreboard terminal UI

Usage:
  courtside [--date YYYYMMDD]
  courtside --help
  courtside --version

Environment:
  COURTSIDE_DATE          Scoreboard day to open (YYYYMMDD, default today)
  COURTSIDE_TZ            Time zone for tipoff times (default: system zone, else UTC)
  COURTSIDE_API_BASE      Override the ESPN site API base URL
  COURTSIDE_REFRESH_SECS  Seconds between automatic refreshes (default 30)
  COURTSIDE_LOG           Log level for the log pane (error, warn, info, debug, trace)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let date = app.lock().await.scoreboard_date();
            let _ = network_requests.send(NetworkRequest::LoadScoreboard { date }).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::ScoreboardLoaded { date } => {
            app.lock().await.on_scoreboard_loaded(&date);
        }
        NetworkResponse::SummaryLoaded { event_id } => {
            app.lock().await.on_summary_loaded(&event_id);
        }
        NetworkResponse::Refreshed => {
            app.lock().await.on_refreshed();
        }
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            app.lock().await.on_error(message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        cursor::Hide,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All)
    );
    let _ = terminal::enable_raw_mode();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show
    );
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
