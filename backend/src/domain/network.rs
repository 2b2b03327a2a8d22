//! Simulated network latency.
//!
//! There is no real I/O anywhere in the application; screens await a fixed
//! delay before invoking a store action to mimic a round-trip. The delay is
//! a future tied to a cancellation token, so a caller that navigates away
//! cancels the token and the pending action never fires.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

/// Returned when a simulated request is cancelled mid-delay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("simulated request cancelled")]
pub struct Cancelled;

/// Cooperative cancellation token. Cloning shares the same cancellation
/// state; any clone can cancel all of them.
#[derive(Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        let _ = self.sender.send(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once cancellation is requested.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        while !*receiver.borrow() {
            if receiver.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-latency stand-in for a network client.
#[derive(Debug, Clone)]
pub struct SimulatedNetwork {
    latency: Duration,
}

impl SimulatedNetwork {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Wait out the simulated round-trip, or bail early if the token is
    /// cancelled first.
    pub async fn delay(&self, token: &CancelToken) -> Result<(), Cancelled> {
        if token.is_cancelled() {
            return Err(Cancelled);
        }
        tokio::select! {
            _ = tokio::time::sleep(self.latency) => Ok(()),
            _ = token.cancelled() => Err(Cancelled),
        }
    }
}

impl Default for SimulatedNetwork {
    /// The latency every screen's fake round-trip uses.
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delay_completes_when_not_cancelled() {
        let network = SimulatedNetwork::new(Duration::from_millis(5));
        let token = CancelToken::new();
        assert_eq!(network.delay(&token).await, Ok(()));
    }

    #[tokio::test]
    async fn test_cancel_mid_delay_aborts() {
        let network = SimulatedNetwork::new(Duration::from_secs(30));
        let token = CancelToken::new();

        let canceller = token.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            canceller.cancel();
        });

        assert_eq!(network.delay(&token).await, Err(Cancelled));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_before_delay_aborts_immediately() {
        let network = SimulatedNetwork::new(Duration::from_secs(30));
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(network.delay(&token).await, Err(Cancelled));
    }

    #[tokio::test]
    async fn test_token_clones_share_cancellation() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
