//! Application error bus
//!
//! A typed side channel for errors that are swallowed at their origin but
//! should still reach the user. One bus is created per application context
//! and cloned into every component that reports.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;

const BUS_CAPACITY: usize = 64;

/// Category of a reported error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Storage,
    Network,
    Authentication,
    Infrastructure,
    Configuration,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorKind::Storage => "storage",
            ErrorKind::Network => "network",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Infrastructure => "infrastructure",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(label)
    }
}

/// Error event delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppError {
    pub kind: ErrorKind,
    /// Technical message for logs
    pub message: String,
    /// Message suitable for showing to the user
    pub user_message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            user_message: user_message.into(),
        }
    }
}

/// Cloneable handle for reporting errors
#[derive(Debug, Clone)]
pub struct ErrorBus {
    sender: broadcast::Sender<AppError>,
}

impl ErrorBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender }
    }

    /// Start receiving errors reported from now on
    ///
    /// Dropping the subscription unsubscribes.
    pub fn subscribe(&self) -> ErrorSubscription {
        ErrorSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Log the error and deliver it to every live subscriber
    pub fn report(&self, error: AppError) {
        warn!(kind = %error.kind, message = %error.message, "{}", error.user_message);
        // no receivers is fine
        let _ = self.sender.send(error);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ErrorBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of the bus
#[derive(Debug)]
pub struct ErrorSubscription {
    receiver: broadcast::Receiver<AppError>,
}

impl ErrorSubscription {
    /// Wait for the next error
    ///
    /// Returns `None` once every bus handle is gone. Events missed because the
    /// subscriber fell behind are skipped.
    pub async fn recv(&mut self) -> Option<AppError> {
        loop {
            match self.receiver.recv().await {
                Ok(error) => return Some(error),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Error subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next error if one is already queued
    pub fn try_recv(&mut self) -> Option<AppError> {
        loop {
            match self.receiver.try_recv() {
                Ok(error) => return Some(error),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }

    /// Drain every queued error
    pub fn drain(&mut self) -> Vec<AppError> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(message: &str) -> AppError {
        AppError::new(ErrorKind::Infrastructure, message, "Something went wrong")
    }

    #[test]
    fn test_report_without_subscribers_is_noop() {
        let bus = ErrorBus::new();
        bus.report(sample("nobody listens"));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_every_subscriber_receives() {
        let bus = ErrorBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.clone().subscribe();

        bus.report(sample("boom"));

        assert_eq!(first.recv().await.unwrap().message, "boom");
        assert_eq!(second.recv().await.unwrap().message, "boom");
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = ErrorBus::new();
        let subscription = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        drop(subscription);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_only_events_after_subscribe() {
        let bus = ErrorBus::new();
        bus.report(sample("before"));

        let mut subscription = bus.subscribe();
        bus.report(sample("after"));

        let received = subscription.drain();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message, "after");
    }

    #[tokio::test]
    async fn test_closed_bus_ends_subscription() {
        let bus = ErrorBus::new();
        let mut subscription = bus.subscribe();
        drop(bus);
        assert!(subscription.recv().await.is_none());
    }
}
