use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use nba_api::DocumentStore;
use nba_api::client::{ApiResult, NbaApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns the only write path into the document store. Requests are served one
/// at a time, so the last request to complete is the one the store keeps.
pub struct NetworkWorker {
    client: NbaApi,
    store: Arc<DocumentStore>,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
    last_date: Option<String>,
    last_event: Option<String>,
}

impl NetworkWorker {
    pub fn new(
        client: NbaApi,
        store: Arc<DocumentStore>,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            store,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
            last_date: None,
            last_event: None,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = self.handle_request(request).await;

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_request(&mut self, request: NetworkRequest) -> ApiResult<NetworkResponse> {
        match request {
            NetworkRequest::LoadScoreboard { date } => self.handle_load_scoreboard(date).await,
            NetworkRequest::LoadSummary { event_id } => self.handle_load_summary(event_id).await,
            NetworkRequest::Refresh => self.handle_refresh().await,
        }
    }

    async fn handle_load_scoreboard(&mut self, date: String) -> ApiResult<NetworkResponse> {
        debug!("loading scoreboard for {date}");
        self.last_date = Some(date.clone());
        self.client.refresh_scoreboard(&self.store, &date).await?;
        Ok(NetworkResponse::ScoreboardLoaded { date })
    }

    async fn handle_load_summary(&mut self, event_id: String) -> ApiResult<NetworkResponse> {
        debug!("loading game summary for event {event_id}");
        self.last_event = Some(event_id.clone());
        self.client.refresh_summary(&self.store, &event_id).await?;
        Ok(NetworkResponse::SummaryLoaded { event_id })
    }

    // Both kinds are refreshed even when the first fails; the first error wins.
    async fn handle_refresh(&mut self) -> ApiResult<NetworkResponse> {
        debug!("refreshing documents");
        let scoreboard = match self.last_date.as_deref() {
            Some(date) => self.client.refresh_scoreboard(&self.store, date).await,
            None => Ok(()),
        };
        let summary = match self.last_event.as_deref() {
            Some(event_id) => self.client.refresh_summary(&self.store, event_id).await,
            None => Ok(()),
        };
        scoreboard.and(summary).map(|()| NetworkResponse::Refreshed)
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn next_payload(rx: &mut mpsc::Receiver<NetworkResponse>) -> NetworkResponse {
        loop {
            match rx.recv().await.expect("worker hung up") {
                NetworkResponse::LoadingStateChanged { .. } => continue,
                other => return other,
            }
        }
    }

    #[tokio::test]
    async fn failed_fetch_reports_error_and_clears_slot() {
        let store = Arc::new(DocumentStore::new());
        store.set_scoreboard(Some(serde_json::json!({"events": []})));

        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let worker = NetworkWorker::new(NbaApi::new(), store.clone(), req_rx, resp_tx);
        let handle = tokio::spawn(worker.run());

        // Blank dates are rejected before any request goes out.
        req_tx
            .send(NetworkRequest::LoadScoreboard { date: "  ".into() })
            .await
            .unwrap();
        match next_payload(&mut resp_rx).await {
            NetworkResponse::Error { message } => assert!(message.contains("date is empty")),
            other => panic!("expected error, got {other:?}"),
        }
        assert!(!store.is_present(nba_api::DocumentKind::Scoreboard));

        // Blank event ids are rejected the same way.
        req_tx.send(NetworkRequest::LoadSummary { event_id: String::new() }).await.unwrap();
        assert!(matches!(next_payload(&mut resp_rx).await, NetworkResponse::Error { .. }));

        drop(req_tx);
        handle.await.unwrap();
    }
}
