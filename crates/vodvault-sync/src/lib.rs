//! Bucket change detection.
//!
//! The gateway keeps one logical clock value per bucket; every mutation by
//! any client advances it. Watching that single value makes "did anything
//! change?" a cheap lookup instead of a bucket listing. A `ChangeDetector`
//! owns the local mirror of the clock and a polling task that compares it
//! against the remote; drift raises one notification on a broadcast
//! channel and adopts the remote value.
//!
//! Detectors are explicit instances — construct one per bucket as needed,
//! there is no process-wide singleton.

mod clock;

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use vodvault_client::GatewayClient;
use vodvault_core::{VaultError, VaultResult};

use clock::next_clock_value;

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Watches one bucket's logical clock for remote mutations.
pub struct ChangeDetector {
    inner: Arc<DetectorInner>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

struct DetectorInner {
    client: GatewayClient,
    cached: RwLock<Option<String>>,
    changes: broadcast::Sender<()>,
}

impl ChangeDetector {
    pub fn new(client: GatewayClient) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(DetectorInner {
                client,
                cached: RwLock::new(None),
                changes,
            }),
            poller: Mutex::new(None),
        }
    }

    /// Subscribe to change notifications. One `()` per detected drift.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.inner.changes.subscribe()
    }

    /// The locally cached clock value, if initialized.
    pub fn cached_clock(&self) -> Option<String> {
        self.inner.cached.read().unwrap().clone()
    }

    /// Initialize the cache from the remote clock. A bucket whose clock
    /// was never written gets one created by advancing; any other failure
    /// is fatal — the detector never silently proceeds uninitialized.
    pub async fn poll_init(&self) -> VaultResult<()> {
        match self.inner.client.fetch_clock().await {
            Ok(Some(value)) => {
                tracing::debug!(bucket = %self.inner.client.bucket(), value = %value, "adopted remote clock");
                *self.inner.cached.write().unwrap() = Some(value);
                Ok(())
            }
            Ok(None) => self
                .advance_clock()
                .await
                .map_err(|e| VaultError::Initialization(e.to_string())),
            Err(e) => Err(VaultError::Initialization(e.to_string())),
        }
    }

    /// Advance the clock after a successful mutation. The new value is
    /// adopted locally before the remote push; if the push fails, the
    /// local cache stays ahead of the remote until the next successful
    /// mutation or poll — a known, accepted divergence.
    pub async fn advance_clock(&self) -> VaultResult<()> {
        let value = {
            let mut cached = self.inner.cached.write().unwrap();
            let next = next_clock_value(cached.as_deref());
            *cached = Some(next.clone());
            next
        };

        self.inner.client.push_clock(&value).await
    }

    /// Start the recurring drift check, replacing any running poller. The
    /// first tick fires one `interval` after this call; ticks are
    /// sequential awaits in a single task, so a slow tick delays the next
    /// one rather than overlapping it.
    pub fn start_polling(&self, interval: Duration) {
        self.stop_polling();

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                inner.check_once().await;
            }
        });

        *self.poller.lock().unwrap() = Some(handle);
    }

    /// Cancel the recurring check. Idempotent; an in-flight tick is not
    /// interrupted mid-request but no further ticks run.
    pub fn stop_polling(&self) {
        if let Some(handle) = self.poller.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl DetectorInner {
    /// One poll tick. Failures are logged and swallowed — polling is
    /// best-effort and one bad response must not stop future ticks.
    async fn check_once(&self) {
        match self.client.fetch_clock().await {
            Ok(Some(remote)) => {
                let drifted = {
                    let cached = self.cached.read().unwrap();
                    cached.as_deref() != Some(remote.as_str())
                };
                if drifted {
                    *self.cached.write().unwrap() = Some(remote.clone());
                    tracing::debug!(bucket = %self.client.bucket(), value = %remote, "remote clock drift detected");
                    let _ = self.changes.send(());
                }
            }
            Ok(None) => {
                // Clock not created yet; nothing to compare against.
            }
            Err(e) => {
                tracing::warn!(bucket = %self.client.bucket(), error = %e, "clock poll tick failed");
            }
        }
    }
}

impl Drop for ChangeDetector {
    fn drop(&mut self) {
        self.stop_polling();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vodvault_core::GatewayConfig;

    const CLOCK_PATH: &str = "/api/v0/buckets/guild-1/clock";

    fn detector(server: &mockito::Server) -> ChangeDetector {
        let client =
            GatewayClient::new(&GatewayConfig::new(server.url(), "guild-1", "secret")).unwrap();
        ChangeDetector::new(client)
    }

    async fn mock_clock(server: &mut mockito::Server, value: &str) -> mockito::Mock {
        server
            .mock("GET", CLOCK_PATH)
            .with_status(200)
            .with_body(format!(r#"{{"value":"{value}"}}"#))
            .create_async()
            .await
    }

    #[tokio::test]
    async fn poll_init_adopts_remote_value() {
        let mut server = mockito::Server::new_async().await;
        mock_clock(&mut server, "100").await;

        let detector = detector(&server);
        detector.poll_init().await.unwrap();
        assert_eq!(detector.cached_clock().as_deref(), Some("100"));
    }

    #[tokio::test]
    async fn poll_init_creates_missing_clock() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", CLOCK_PATH)
            .with_status(404)
            .create_async()
            .await;
        let push = server
            .mock("PUT", CLOCK_PATH)
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let detector = detector(&server);
        detector.poll_init().await.unwrap();
        assert!(detector.cached_clock().is_some());
        push.assert_async().await;
    }

    #[tokio::test]
    async fn poll_init_auth_failure_creates_nothing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", CLOCK_PATH)
            .with_status(401)
            .with_body("bad key")
            .create_async()
            .await;
        let push = server
            .mock("PUT", CLOCK_PATH)
            .expect(0)
            .create_async()
            .await;

        let detector = detector(&server);
        let err = detector.poll_init().await.unwrap_err();
        assert!(matches!(err, VaultError::Initialization(_)), "{err}");
        assert!(detector.cached_clock().is_none());
        push.assert_async().await;
    }

    #[tokio::test]
    async fn advance_strictly_increases_the_cache() {
        let mut server = mockito::Server::new_async().await;
        mock_clock(&mut server, "1700000000000").await;
        server
            .mock("PUT", CLOCK_PATH)
            .with_status(200)
            .create_async()
            .await;

        let detector = detector(&server);
        detector.poll_init().await.unwrap();
        let before: i64 = detector.cached_clock().unwrap().parse().unwrap();

        detector.advance_clock().await.unwrap();
        let after: i64 = detector.cached_clock().unwrap().parse().unwrap();
        assert!(after > before);
    }

    #[tokio::test]
    async fn advance_keeps_local_value_when_push_fails() {
        let mut server = mockito::Server::new_async().await;
        mock_clock(&mut server, "99999999999999").await;
        server
            .mock("PUT", CLOCK_PATH)
            .with_status(500)
            .with_body("remote write failed")
            .create_async()
            .await;

        let detector = detector(&server);
        detector.poll_init().await.unwrap();

        let err = detector.advance_clock().await.unwrap_err();
        assert!(matches!(err, VaultError::Gateway { status: 500, .. }), "{err}");
        // Cache is already ahead of the remote; the divergence stands.
        assert_eq!(detector.cached_clock().as_deref(), Some("100000000000000"));
    }

    #[tokio::test]
    async fn drift_emits_exactly_one_notification() {
        let mut server = mockito::Server::new_async().await;
        mock_clock(&mut server, "100").await;

        let detector = detector(&server);
        detector.poll_init().await.unwrap();
        let mut rx = detector.subscribe();

        server.reset_async().await;
        mock_clock(&mut server, "150").await;

        detector.start_polling(Duration::from_millis(50));
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("drift notification")
            .unwrap();
        assert_eq!(detector.cached_clock().as_deref(), Some("150"));

        // The value is unchanged from here on: further ticks stay silent.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
        detector.stop_polling();
    }

    #[tokio::test]
    async fn failed_tick_does_not_stop_polling() {
        let mut server = mockito::Server::new_async().await;
        mock_clock(&mut server, "100").await;

        let detector = detector(&server);
        detector.poll_init().await.unwrap();
        let mut rx = detector.subscribe();

        server.reset_async().await;
        server
            .mock("GET", CLOCK_PATH)
            .with_status(500)
            .create_async()
            .await;

        detector.start_polling(Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(150)).await;

        server.reset_async().await;
        mock_clock(&mut server, "200").await;

        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("polling survived the failed tick")
            .unwrap();
        assert_eq!(detector.cached_clock().as_deref(), Some("200"));
        detector.stop_polling();
    }

    #[tokio::test]
    async fn stop_polling_is_idempotent() {
        let server = mockito::Server::new_async().await;
        let detector = detector(&server);
        detector.stop_polling();
        detector.start_polling(Duration::from_millis(50));
        detector.stop_polling();
        detector.stop_polling();
    }
}
