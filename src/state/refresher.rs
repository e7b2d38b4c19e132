use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic refresh of the current scoreboard day and the open game summary.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, period: Duration) -> Self {
        Self { network_requests, period }
    }

    pub async fn run(self) {
        let mut refresh_interval = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        refresh_interval.tick().await;

        loop {
            refresh_interval.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::Refresh)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}
