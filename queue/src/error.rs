//! Error types for queue operations.

use std::time::Duration;

/// Result type alias for queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;

/// Queue operation error.
///
/// Short reads and short writes are not errors: they are how capacity
/// pressure reaches the caller. Everything here is either invalid input,
/// a resource problem at creation or teardown, or an expired deadline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// Queue created with a capacity of zero.
    #[error("queue: capacity must be greater than 0")]
    ZeroCapacity,

    /// The sentinel slot does not fit in `usize`.
    #[error("queue: capacity {capacity} overflows slot count")]
    CapacityOverflow { capacity: usize },

    /// Storage for the ring could not be allocated.
    #[error("queue: failed to allocate {capacity} byte slots")]
    AllocationFailed { capacity: usize },

    /// `put` called with no data.
    #[error("queue: empty input")]
    EmptyInput,

    /// A dequeue called with a zero-length output buffer.
    #[error("queue: empty output buffer")]
    EmptyOutput,

    /// No data arrived before the deadline of a timed dequeue.
    #[error("queue: no data within {0:?}")]
    Timeout(Duration),

    /// Teardown requested while other handles still share the queue.
    #[error("queue: busy, {handles} other handle(s) still live")]
    Busy { handles: usize },

    /// Invalid configuration.
    #[error("queue: invalid config: {0}")]
    InvalidConfig(String),
}

impl QueueError {
    /// Returns true if this is the expected "nothing arrived in time" outcome
    /// of a timed dequeue rather than a caller or resource error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, QueueError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_error_display() {
        assert_eq!(
            QueueError::ZeroCapacity.to_string(),
            "queue: capacity must be greater than 0"
        );
        assert_eq!(QueueError::EmptyInput.to_string(), "queue: empty input");

        let err = QueueError::Busy { handles: 2 };
        assert!(err.to_string().contains("2 other handle(s)"));

        let err = QueueError::InvalidConfig("capacity".into());
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn test_is_timeout() {
        assert!(QueueError::Timeout(Duration::from_millis(5)).is_timeout());
        assert!(!QueueError::EmptyOutput.is_timeout());
        assert!(!QueueError::Busy { handles: 1 }.is_timeout());
    }
}
