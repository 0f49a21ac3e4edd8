//! Convenience constructors for common pipe sizes.

use crate::config::DEFAULT_CAPACITY;
use crate::RingPipe;

/// Creates a 256B pipe.
pub fn pipe_256b() -> RingPipe {
    RingPipe::with_capacity(256)
}

/// Creates a 1KB pipe.
pub fn pipe_1kb() -> RingPipe {
    RingPipe::with_capacity(1024)
}

/// Creates a 4KB pipe.
pub fn pipe_4kb() -> RingPipe {
    RingPipe::with_capacity(4096)
}

/// Creates a 16KB pipe.
pub fn pipe_16kb() -> RingPipe {
    RingPipe::with_capacity(16384)
}

/// Creates a 64KB pipe.
pub fn pipe_64kb() -> RingPipe {
    RingPipe::with_capacity(65536)
}

/// Creates a pipe with the default capacity.
pub fn pipe() -> RingPipe {
    RingPipe::with_capacity(DEFAULT_CAPACITY)
}

/// Creates a pipe with the specified capacity.
pub fn pipe_with_size(size: usize) -> RingPipe {
    RingPipe::with_capacity(size)
}
