use crate::error::TailError;
use std::time::Duration;

/// What the tail loop does when reading a batch fails.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    #[default]
    FailFast,
    /// Transport errors only. Shape and decode errors stay fatal.
    Reconnect { delay: Duration },
}

impl FailurePolicy {
    pub fn retry_delay(&self, error: &TailError) -> Option<Duration> {
        match self {
            FailurePolicy::FailFast => None,
            FailurePolicy::Reconnect { delay } if error.is_transport() => Some(*delay),
            FailurePolicy::Reconnect { .. } => None,
        }
    }
}
