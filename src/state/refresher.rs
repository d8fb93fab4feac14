use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Sends RefreshDashboard on a fixed period while `--watch` is active.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    every: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, every: Duration) -> Self {
        Self { network_requests, every }
    }

    pub async fn run(self) {
        let mut ticker = interval(self.every);
        // Skip the immediate first tick so the startup load isn't doubled.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::RefreshDashboard)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sends_refresh_after_each_period() {
        let (tx, mut rx) = mpsc::channel(4);
        let task = tokio::spawn(PeriodicRefresher::new(tx, Duration::from_secs(30)).run());

        assert_eq!(rx.recv().await, Some(NetworkRequest::RefreshDashboard));
        assert_eq!(rx.recv().await, Some(NetworkRequest::RefreshDashboard));
        task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        PeriodicRefresher::new(tx, Duration::from_secs(1)).run().await;
    }
}
