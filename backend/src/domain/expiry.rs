//! Deadline-driven booking expiry.
//!
//! Instead of re-scanning every booking on a fixed interval, each pending
//! booking registers its expiry instant in a min-heap. A background task
//! sleeps until the earliest deadline, runs the idempotent sweep, and goes
//! back to sleep. Newly scheduled deadlines wake the task early. Repeated
//! fires are safe: the sweep only touches bookings that are actually
//! pending and past their expiry.

use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tracing::{error, info};

use crate::domain::booking_service::BookingService;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Deadline {
    at: DateTime<Utc>,
    booking_id: String,
}

/// Handle for registering expiry deadlines. Cloning shares the heap.
#[derive(Clone, Default)]
pub struct ExpiryQueue {
    heap: Arc<Mutex<BinaryHeap<Reverse<Deadline>>>>,
    notify: Arc<Notify>,
}

impl ExpiryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a booking's expiry instant and wake the scheduler.
    pub fn schedule(&self, booking_id: String, at: DateTime<Utc>) {
        self.heap
            .lock()
            .expect("expiry heap lock poisoned")
            .push(Reverse(Deadline { at, booking_id }));
        self.notify.notify_one();
    }

    /// Earliest registered deadline, if any.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.heap
            .lock()
            .expect("expiry heap lock poisoned")
            .peek()
            .map(|Reverse(d)| d.at)
    }

    /// Drain every deadline at or before `now`.
    fn pop_due(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut heap = self.heap.lock().expect("expiry heap lock poisoned");
        let mut due = Vec::new();
        while let Some(Reverse(deadline)) = heap.peek() {
            if deadline.at > now {
                break;
            }
            let Some(Reverse(deadline)) = heap.pop() else {
                break;
            };
            due.push(deadline.booking_id);
        }
        due
    }

    async fn changed(&self) {
        self.notify.notified().await;
    }
}

/// Background task that fires the expiry sweep exactly when deadlines come
/// due.
pub struct ExpiryScheduler {
    queue: ExpiryQueue,
    bookings: BookingService,
}

impl ExpiryScheduler {
    pub fn new(queue: ExpiryQueue, bookings: BookingService) -> Self {
        Self { queue, bookings }
    }

    /// Run forever. Intended to be spawned once from the composition root.
    pub async fn run(self) {
        loop {
            match self.queue.next_deadline() {
                None => self.queue.changed().await,
                Some(at) => {
                    let now = Utc::now();
                    if at <= now {
                        let due = self.queue.pop_due(now);
                        if due.is_empty() {
                            continue;
                        }
                        match self.bookings.expire_due_bookings(now).await {
                            Ok(expired) if expired > 0 => {
                                info!(expired, "Expired due bookings");
                            }
                            Ok(_) => {}
                            Err(e) => error!(error = %e, "Booking expiry sweep failed"),
                        }
                    } else {
                        let wait = (at - now).to_std().unwrap_or_default();
                        tokio::select! {
                            _ = tokio::time::sleep(wait) => {}
                            _ = self.queue.changed() => {}
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_pop_due_returns_deadlines_in_order() {
        let queue = ExpiryQueue::new();
        let now = Utc::now();
        queue.schedule("booking_2".to_string(), now - Duration::minutes(1));
        queue.schedule("booking_1".to_string(), now - Duration::minutes(5));
        queue.schedule("booking_3".to_string(), now + Duration::hours(1));

        assert_eq!(queue.pop_due(now), vec!["booking_1", "booking_2"]);
        // The future deadline stays queued
        assert_eq!(queue.next_deadline(), Some(now + Duration::hours(1)));
        assert!(queue.pop_due(now).is_empty());
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let queue = ExpiryQueue::new();
        assert_eq!(queue.next_deadline(), None);

        let now = Utc::now();
        queue.schedule("booking_1".to_string(), now + Duration::hours(2));
        queue.schedule("booking_2".to_string(), now + Duration::hours(1));
        assert_eq!(queue.next_deadline(), Some(now + Duration::hours(1)));
    }
}
