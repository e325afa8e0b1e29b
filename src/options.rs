use std::time::Duration;

/// Configures connection timeouts, retry count and connection reuse.
///
/// Options are fixed when the client is built and never change afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Maximum time to establish a connection, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Deadline for one attempt once its connection is up, in milliseconds.
    ///
    /// Applies per attempt, on top of the connect timeout. Pooled connections
    /// do not expire by age. Also bounds draining a caller's body stream.
    pub timeout_ms: u64,
    /// Total attempts per call, including the first one.
    pub max_attempts: usize,
    /// Reuse pooled connections across calls to the same host.
    pub keep_alive: bool,
}

impl ClientOptions {
    pub(crate) fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Whole-attempt bound: connect budget plus the post-connect deadline.
    pub(crate) fn attempt_timeout(&self) -> Duration {
        self.connect_timeout() + self.timeout()
    }

    /// Attempt limit with a floor of one.
    pub(crate) fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            timeout_ms: 10_000,
            max_attempts: 3,
            keep_alive: true,
        }
    }
}
