//! Last-request-wins ordering for overlapping calls.
//!
//! Calls issued in quick succession resolve in whatever order the network
//! gives. A page that only cares about the newest request takes a [`Ticket`]
//! before each call and hands the result to [`Sequencer::accept`], which
//! drops it if a newer ticket was issued in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Sequencer {
    latest: AtomicU64,
}

impl Sequencer {
    pub const fn new() -> Sequencer {
        Sequencer {
            latest: AtomicU64::new(0),
        }
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// `Some(value)` if `ticket` is still the newest, `None` if stale.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            log::debug!("dropping stale response #{}", ticket.0);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_increase() {
        let seq = Sequencer::new();
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert_eq!(b.number(), a.number() + 1);
    }

    #[test]
    fn only_the_newest_ticket_is_accepted() {
        let seq = Sequencer::new();
        let first = seq.issue();
        let second = seq.issue();

        // second resolves first, then the older response arrives
        assert_eq!(seq.accept(second, "new"), Some("new"));
        assert_eq!(seq.accept(first, "old"), None);
    }

    #[tokio::test]
    async fn stale_responses_lose_races() {
        use std::time::Duration;

        let seq = Sequencer::new();
        let slow = async {
            let t = seq.issue();
            tokio::time::sleep(Duration::from_millis(30)).await;
            seq.accept(t, "slow")
        };
        let fast = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            let t = seq.issue();
            seq.accept(t, "fast")
        };
        let (slow, fast) = tokio::join!(slow, fast);
        assert_eq!(slow, None);
        assert_eq!(fast, Some("fast"));
    }
}
