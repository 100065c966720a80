//! State change loop

use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{sleep, sleep_until, timeout_at, Instant};
use tracing::{debug, info};

/// State reported while an operation is still running
pub const STATE_PENDING: &str = "PENDING";

/// State reported once an operation succeeded
pub const STATE_COMPLETED: &str = "COMPLETED";

/// State reported once a resource is gone
pub const STATE_DELETED: &str = "DELETED";

/// Outcome of one poll
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshResult {
    /// Reported state
    pub state: String,
    /// Response body of the poll, if any
    pub value: Option<JsonValue>,
}

impl RefreshResult {
    /// Create a result carrying a response body
    pub fn new(state: impl Into<String>, value: JsonValue) -> Self {
        Self {
            state: state.into(),
            value: Some(value),
        }
    }

    /// Create a result without a body
    pub fn state(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            value: None,
        }
    }
}

/// One poll of a remote status
#[async_trait]
pub trait StateRefresh: Send + Sync {
    /// Fetch the current state
    async fn refresh(&self) -> Result<RefreshResult>;
}

/// Fixed-interval wait for a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChangeConf {
    /// States that keep the loop polling
    pub pending: Vec<String>,
    /// States that end the loop successfully
    pub target: Vec<String>,
    /// Overall deadline, counted from the start of the wait
    pub timeout: Duration,
    /// Wait before the first poll
    pub delay: Duration,
    /// Wait between polls
    pub poll_interval: Duration,
}

impl Default for StateChangeConf {
    fn default() -> Self {
        Self {
            pending: vec![STATE_PENDING.to_string()],
            target: vec![STATE_COMPLETED.to_string()],
            timeout: Duration::from_secs(20 * 60),
            delay: Duration::from_secs(10),
            poll_interval: Duration::from_secs(5),
        }
    }
}

impl StateChangeConf {
    /// Create a wait between explicit pending and target states
    pub fn new<P, T>(pending: P, target: T) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            pending: pending.into_iter().map(Into::into).collect(),
            target: target.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the initial delay
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the poll interval
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Poll until a target state is reached.
    ///
    /// Errors from the refresh end the wait immediately. A state outside
    /// both sets is an [`Error::UnexpectedState`]; running past the timeout
    /// is an [`Error::WaitTimeout`] carrying the last observed state.
    pub async fn wait_for_state(&self, refresh: &dyn StateRefresh) -> Result<RefreshResult> {
        let deadline = Instant::now() + self.timeout;
        let mut last_state = String::new();

        debug!(
            "Waiting for state {:?} (delay {:?}, interval {:?}, timeout {:?})",
            self.target, self.delay, self.poll_interval, self.timeout
        );
        sleep(self.delay.min(self.timeout)).await;

        loop {
            let Ok(result) = timeout_at(deadline, refresh.refresh()).await else {
                return Err(self.timeout_error(last_state));
            };
            let result = result?;

            if result.state != last_state {
                info!("State changed to '{}'", result.state);
                last_state.clone_from(&result.state);
            }

            if self.target.contains(&result.state) {
                return Ok(result);
            }

            if !self.pending.contains(&result.state) {
                return Err(Error::UnexpectedState {
                    state: result.state,
                    target: self.target.join(", "),
                });
            }

            let next_poll = Instant::now() + self.poll_interval;
            if next_poll >= deadline {
                sleep_until(deadline).await;
                return Err(self.timeout_error(last_state));
            }
            sleep_until(next_poll).await;
        }
    }

    fn timeout_error(&self, last_state: String) -> Error {
        Error::WaitTimeout {
            target: self.target.join(", "),
            last_state,
            timeout_secs: self.timeout.as_secs(),
        }
    }
}
