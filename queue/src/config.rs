//! Queue configuration and preset constructors.

use serde::{Deserialize, Serialize};

use crate::Queue;
use crate::error::{QueueError, Result};

/// Default queue capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Queue configuration.
///
/// Deserializable so an application can carry it in its own config file.
/// Missing fields fall back to [`QueueConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Usable capacity in bytes. Must be greater than 0.
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl QueueConfig {
    /// Creates a config with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Checks the config before any storage is allocated.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(QueueError::InvalidConfig(
                "capacity must be greater than 0".into(),
            ));
        }
        if self.capacity == usize::MAX {
            return Err(QueueError::InvalidConfig(format!(
                "capacity {} leaves no room for the sentinel slot",
                self.capacity
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Preset constructors
// ============================================================================

/// Creates a 256B queue.
pub fn queue_256b() -> Result<Queue> {
    Queue::new(256)
}

/// Creates a 1KB queue.
pub fn queue_1kb() -> Result<Queue> {
    Queue::new(1024)
}

/// Creates a 4KB queue.
pub fn queue_4kb() -> Result<Queue> {
    Queue::new(4096)
}

/// Creates a 16KB queue.
pub fn queue_16kb() -> Result<Queue> {
    Queue::new(16384)
}

/// Creates a 64KB queue.
pub fn queue_64kb() -> Result<Queue> {
    Queue::new(65536)
}

/// Creates a default 1KB queue.
pub fn queue() -> Result<Queue> {
    queue_1kb()
}
