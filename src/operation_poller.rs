/*!
 * Long-running operation polling.
 *
 * The poller owns the operation lifecycle between submission and terminal
 * observation: it re-reads the operation status at a fixed interval, treats
 * a running operation as ordinary state rather than a failure, and stops
 * querying the moment a terminal status is observed. There is no iteration
 * bound and no cancellation hook; termination depends on the service
 * reaching a terminal state. A caller that needs an upper bound imposes it
 * externally.
 */

use log::{debug, warn};
use std::time::Duration;
use tokio::time::sleep;

use crate::app_config::PollingConfig;
use crate::errors::ApiError;
use crate::service::{Operation, TranslationApi};

/// How the poll loop paces itself and reacts to transport failures
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    /// Delay between consecutive status reads
    pub interval: Duration,

    /// Consecutive transport failures tolerated before the loop gives up.
    ///
    /// 0 aborts on the first transport failure while still waiting
    /// indefinitely for a running operation to finish. The counter resets
    /// after every successful status read.
    pub transport_retries: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            transport_retries: 0,
        }
    }
}

impl From<&PollingConfig> for PollPolicy {
    fn from(config: &PollingConfig) -> Self {
        Self {
            interval: config.interval(),
            transport_retries: config.transport_retries,
        }
    }
}

/// Polls a long-running operation until it reaches a terminal state
pub struct OperationPoller<'a> {
    api: &'a dyn TranslationApi,
    policy: PollPolicy,
}

impl<'a> OperationPoller<'a> {
    /// Create a poller over the given service client
    pub fn new(api: &'a dyn TranslationApi, policy: PollPolicy) -> Self {
        Self { api, policy }
    }

    /// Poll until the operation is terminal and return its final status.
    ///
    /// No further status reads are issued once a terminal state has been
    /// observed.
    pub async fn wait(&self, name: &str) -> Result<Operation, ApiError> {
        self.wait_with_progress(name, |_| {}).await
    }

    /// Like [`wait`](Self::wait), invoking `on_pending` with the number of
    /// non-terminal observations so far after each one. Lets the caller tick
    /// a spinner without the poller knowing how progress is displayed.
    pub async fn wait_with_progress<F>(&self, name: &str, mut on_pending: F) -> Result<Operation, ApiError>
    where
        F: FnMut(u64) + Send,
    {
        let mut pending_polls: u64 = 0;
        let mut transport_failures: u32 = 0;

        loop {
            match self.api.get_operation(name).await {
                Ok(operation) => {
                    transport_failures = 0;
                    if operation.is_done() {
                        debug!("Operation {} reached a terminal state after {} pending polls",
                            name, pending_polls);
                        return Ok(operation);
                    }
                    pending_polls += 1;
                    on_pending(pending_polls);
                    debug!("Operation {} still running, next check in {:?}", name, self.policy.interval);
                }
                Err(ApiError::Transport(message)) if transport_failures < self.policy.transport_retries => {
                    transport_failures += 1;
                    warn!("Transport failure while polling {} ({}/{}): {}",
                        name, transport_failures, self.policy.transport_retries, message);
                }
                Err(e) => return Err(e),
            }

            sleep(self.policy.interval).await;
        }
    }
}
