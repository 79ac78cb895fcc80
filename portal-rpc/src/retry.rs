//! Retrying calls from the caller's side.
//!
//! [`RpcClient`][crate::RpcClient] sends every call exactly once. Pages that
//! want to try again after a network hiccup wrap the call with [`attempt`].
//! Only transport failures are retried: a backend that said no will say no
//! again.

use std::{ops::RangeInclusive, time::Duration};

use crate::envelope::{ErrorBody, ResponseEnvelope};

pub trait RetryError {
    fn should_retry(&self) -> bool;
}

impl RetryError for ErrorBody {
    fn should_retry(&self) -> bool {
        self.is_transport()
    }
}

pub trait RetryStrategy<E>: Sync {
    fn retry(&self, completed_attempts: usize, last_error: &E) -> Option<Duration>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Retry {
    delay: RangeInclusive<Duration>,
    max_attempts: Option<usize>,
    factor: f64,
}

impl Retry {
    pub const fn never() -> Retry {
        Retry {
            delay: Duration::ZERO..=Duration::ZERO,
            max_attempts: Some(1),
            factor: 1.0,
        }
    }

    pub const fn immediately() -> Retry {
        Retry {
            delay: Duration::ZERO..=Duration::ZERO,
            max_attempts: None,
            factor: 1.0,
        }
    }

    pub const fn delay(dur: Duration) -> Retry {
        Retry {
            delay: dur..=dur,
            max_attempts: None,
            factor: 1.0,
        }
    }

    pub const fn delay_millis(n: u64) -> Retry {
        Self::delay(Duration::from_millis(n))
    }

    pub const fn delay_jitter(dur: RangeInclusive<Duration>) -> Retry {
        Retry {
            delay: dur,
            max_attempts: None,
            factor: 1.0,
        }
    }

    pub const fn delay_jitter_millis(n: RangeInclusive<u64>) -> Retry {
        Self::delay_jitter(Duration::from_millis(*n.start())..=Duration::from_millis(*n.end()))
    }

    pub const fn with_max_attempts(self, n: usize) -> Retry {
        Retry {
            delay: self.delay,
            max_attempts: Some(n),
            factor: self.factor,
        }
    }

    pub const fn with_backoff(self) -> Retry {
        Retry {
            delay: self.delay,
            max_attempts: self.max_attempts,
            factor: 1.5,
        }
    }
}

impl Default for Retry {
    fn default() -> Self {
        Self::never()
    }
}

/// A reasonable policy for interactive pages: 3 attempts, starting 200 to
/// 400 millis apart and backing off.
pub const PAGE_RETRY: Retry = Retry::delay_jitter_millis(200..=400)
    .with_max_attempts(3)
    .with_backoff();

impl<E: RetryError> RetryStrategy<E> for Retry {
    fn retry(&self, completed_attempts: usize, last_error: &E) -> Option<Duration> {
        let attempts_remaining = self
            .max_attempts
            .map(|x| completed_attempts < x)
            .unwrap_or(true);
        if !last_error.should_retry() || !attempts_remaining {
            return None;
        }

        let f = self
            .factor
            .powi(completed_attempts as i32 - 1)
            .clamp(1.0, 50.0);
        let (lo, hi) = (*self.delay.start(), *self.delay.end());
        let base = if lo >= hi {
            lo
        } else {
            rand::random_range(lo..=hi)
        };
        Some(base.mul_f64(f))
    }
}

/// Issue a call until it succeeds, fails for a business reason, or the
/// strategy gives up. Returns the last envelope seen.
pub async fn attempt<S, F, Fut, R>(retry: &S, op: F) -> ResponseEnvelope<R>
where
    S: RetryStrategy<ErrorBody>,
    F: Fn() -> Fut,
    Fut: Future<Output = ResponseEnvelope<R>>,
{
    for attempt in 1.. {
        match op().await {
            ResponseEnvelope::Failure(e) => match retry.retry(attempt, &e) {
                Some(dur) => {
                    log::warn!("retry after {dur:?}: {e}");
                    tokio::time::sleep(dur).await;
                }
                None => {
                    if attempt > 1 {
                        log::error!("giving up after {attempt} attempts: {e}");
                    }
                    return ResponseEnvelope::Failure(e);
                }
            },
            res => return res,
        }
    }
    unreachable!()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::rpc::TransportError;

    fn network_down() -> ErrorBody {
        TransportError::Connect("refused".to_owned()).into()
    }

    #[test]
    fn business_failures_are_final() {
        let retry = Retry::immediately();
        assert_eq!(retry.retry(1, &ErrorBody::new("unauthorized")), None);
        assert_eq!(retry.retry(1, &network_down()), Some(Duration::ZERO));
    }

    #[test]
    fn attempts_are_capped() {
        let retry = Retry::delay_millis(10).with_max_attempts(3);
        assert!(retry.retry(2, &network_down()).is_some());
        assert_eq!(retry.retry(3, &network_down()), None);
        assert_eq!(Retry::never().retry(1, &network_down()), None);
    }

    #[test]
    fn backoff_grows_within_jitter() {
        let retry = Retry::delay_jitter_millis(100..=200).with_backoff();
        let first = retry.retry(1, &network_down()).unwrap();
        assert!(first >= Duration::from_millis(100) && first <= Duration::from_millis(200));
        let third = retry.retry(3, &network_down()).unwrap();
        assert!(third >= Duration::from_millis(225) && third <= Duration::from_millis(450));
    }

    #[tokio::test]
    async fn retries_until_the_network_recovers() {
        let calls = AtomicUsize::new(0);
        let res = attempt(&Retry::immediately().with_max_attempts(5), || async {
            match calls.fetch_add(1, Ordering::Relaxed) {
                0 | 1 => ResponseEnvelope::Failure(network_down()),
                _ => ResponseEnvelope::Success(json!("ok")),
            }
        })
        .await;
        assert_eq!(res, ResponseEnvelope::Success(json!("ok")));
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[tokio::test]
    async fn does_not_retry_rejections() {
        let calls = AtomicUsize::new(0);
        let res: ResponseEnvelope<()> = attempt(&Retry::immediately(), || async {
            calls.fetch_add(1, Ordering::Relaxed);
            ResponseEnvelope::Failure(ErrorBody::new("unauthorized"))
        })
        .await;
        assert_eq!(res.error_message(), Some("unauthorized"));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }
}
