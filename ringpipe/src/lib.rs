//! Fixed-capacity ring buffer used as a blocking in-process byte pipe.
//!
//! [`RingPipe`] carries a byte stream from producer threads to consumer
//! threads through a circular store whose size is fixed when the pipe is
//! created.
//!
//! - **Write** blocks until the whole payload fits. Payloads longer than the
//!   capacity are truncated and reported as [`PipeError::ShortWrite`].
//! - **Read** never blocks. An empty, open pipe reads `Ok(0)`; a closed and
//!   drained pipe reads [`PipeError::EndOfStream`]. Use
//!   [`RingPipe::read_blocking`] to park until data arrives.
//! - **Close** fails every pending and future write with
//!   [`PipeError::Closed`] while leaving buffered bytes readable.
//!
//! ```
//! use giztoy_ringpipe::{PipeError, RingPipe};
//! use std::thread;
//!
//! let pipe = RingPipe::with_capacity(4);
//! let writer = pipe.clone();
//!
//! let producer = thread::spawn(move || {
//!     for chunk in [&b"hel"[..], &b"lo "[..], &b"wor"[..], &b"ld"[..]] {
//!         writer.write(chunk).unwrap();
//!     }
//!     writer.close();
//! });
//!
//! let mut out = Vec::new();
//! let mut buf = [0u8; 4];
//! loop {
//!     match pipe.read_blocking(&mut buf) {
//!         Ok(n) => out.extend_from_slice(&buf[..n]),
//!         Err(PipeError::EndOfStream) => break,
//!         Err(e) => panic!("unexpected error: {e}"),
//!     }
//! }
//!
//! producer.join().unwrap();
//! assert_eq!(out, b"hello world");
//! ```
//!
//! # Storage
//!
//! The pipe keeps two [`Region`]s over its store: the bytes written but not
//! yet read, and the bytes free for writing. Their lengths always add up to
//! the capacity. Both may wrap past the end of the store, in which case a
//! copy touches two contiguous segments.
//!
//! # Thread Safety
//!
//! [`RingPipe`] is `Send + Sync`. `Clone` shares the same pipe via `Arc`, so
//! each thread keeps its own handle.

mod bytes;
mod config;
mod error;
mod pipe;
mod region;

pub use bytes::*;
pub use config::{DEFAULT_CAPACITY, PipeConfig};
pub use error::PipeError;
pub use pipe::RingPipe;
pub use region::{Region, wrap_add};
