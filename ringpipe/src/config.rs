//! Pipe configuration.

/// Capacity used by [`PipeConfig::default`], in bytes.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Configuration for a [`RingPipe`](crate::RingPipe).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeConfig {
    /// Size of the backing store in bytes. Fixed for the pipe's lifetime.
    pub capacity: usize,
    /// Label attached to the pipe's log events.
    pub name: Option<String>,
}

impl PipeConfig {
    /// Create a new pipe config with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            name: None,
        }
    }

    /// Set the label used in log events.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
