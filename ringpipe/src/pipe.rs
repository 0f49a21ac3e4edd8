//! Blocking byte pipe over a fixed-size ring.

use std::fmt;
use std::io;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::config::PipeConfig;
use crate::error::PipeError;
use crate::region::Region;

/// A thread-safe fixed-capacity byte pipe.
///
/// `RingPipe` moves bytes from writer threads to reader threads through a
/// circular store whose size never changes. Reads never block; writes block
/// until the whole payload fits.
///
/// # Semantics
///
/// - **Read**: Never blocks, returns `Ok(0)` when empty and still open
/// - **Write**: Blocks until enough space is free, truncates payloads larger
///   than the capacity and reports [`PipeError::ShortWrite`]
/// - **Close**: Fails pending and future writes, buffered bytes stay readable
///
/// # Example
///
/// ```
/// use giztoy_ringpipe::{PipeError, RingPipe};
///
/// let pipe = RingPipe::with_capacity(8);
/// pipe.write(b"hello").unwrap();
///
/// let mut buf = [0u8; 8];
/// let n = pipe.read(&mut buf).unwrap();
/// assert_eq!(&buf[..n], b"hello");
///
/// // Nothing buffered yet, but the stream is not over either.
/// assert_eq!(pipe.read(&mut buf), Ok(0));
///
/// pipe.close();
/// assert_eq!(pipe.read(&mut buf), Err(PipeError::EndOfStream));
/// ```
pub struct RingPipe {
    inner: Arc<PipeInner>,
}

struct PipeInner {
    name: Option<String>,
    capacity: usize,
    state: Mutex<PipeState>,
    // Writers waiting for free bytes.
    space: Condvar,
    // Blocking readers waiting for used bytes.
    data: Condvar,
}

struct PipeState {
    store: Box<[u8]>,
    used: Region,
    free: Region,
    open: bool,
}

impl PipeState {
    fn new(store: Box<[u8]>) -> Self {
        let capacity = store.len();
        PipeState {
            store,
            used: Region::new(0, 0),
            free: Region::new(0, capacity),
            open: true,
        }
    }

    /// Copies used bytes into `buf` and hands their slots back to `free`.
    fn drain(&mut self, buf: &mut [u8]) -> usize {
        let capacity = self.store.len();
        let (primary, wrapped) = self.used.segments(&self.store);
        let mut n = copy_into(buf, primary);
        if let Some(wrapped) = wrapped {
            n += copy_into(&mut buf[n..], wrapped);
        }

        self.used.consume(n, capacity);
        self.free.extend(n, capacity);
        self.check_invariants();
        n
    }

    /// Copies `data` into free slots and marks them used.
    ///
    /// The caller guarantees `data` fits in the free region.
    fn fill(&mut self, data: &[u8]) -> usize {
        let capacity = self.store.len();
        let (primary, wrapped) = self.free.segments_mut(&mut self.store);
        let mut n = copy_into(primary, data);
        if let Some(wrapped) = wrapped {
            n += copy_into(wrapped, &data[n..]);
        }

        self.free.consume(n, capacity);
        self.used.extend(n, capacity);
        self.check_invariants();
        n
    }

    fn check_invariants(&self) {
        let capacity = self.store.len();
        debug_assert_eq!(
            self.used.len() + self.free.len(),
            capacity,
            "used and free regions must cover the store"
        );
        debug_assert_eq!(
            self.used.end(capacity),
            self.free.start(),
            "free region must start where used region ends"
        );
    }
}

fn copy_into(dst: &mut [u8], src: &[u8]) -> usize {
    let n = dst.len().min(src.len());
    dst[..n].copy_from_slice(&src[..n]);
    n
}

impl Clone for RingPipe {
    fn clone(&self) -> Self {
        RingPipe {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl RingPipe {
    /// Creates a pipe that takes ownership of `storage`.
    ///
    /// The storage length becomes the capacity. Whatever bytes it holds are
    /// ignored; the pipe starts empty.
    ///
    /// # Panics
    ///
    /// Panics if the storage is empty.
    pub fn new(storage: impl Into<Box<[u8]>>) -> Self {
        Self::build(storage.into(), None)
    }

    /// Creates a pipe with a zeroed store of `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::build(vec![0u8; capacity].into_boxed_slice(), None)
    }

    /// Creates a pipe from a [`PipeConfig`].
    ///
    /// # Panics
    ///
    /// Panics if the configured capacity is 0.
    pub fn with_config(config: PipeConfig) -> Self {
        Self::build(vec![0u8; config.capacity].into_boxed_slice(), config.name)
    }

    fn build(store: Box<[u8]>, name: Option<String>) -> Self {
        let capacity = store.len();
        assert!(capacity > 0, "capacity must be greater than 0");

        RingPipe {
            inner: Arc::new(PipeInner {
                name,
                capacity,
                state: Mutex::new(PipeState::new(store)),
                space: Condvar::new(),
                data: Condvar::new(),
            }),
        }
    }

    /// Returns the label given in the pipe's config, if any.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Returns the number of bytes waiting to be read.
    ///
    /// This is a snapshot; other threads may change it right away.
    pub fn len(&self) -> usize {
        self.inner.state.lock().used.len()
    }

    /// Returns the number of bytes that can be written without blocking.
    pub fn free(&self) -> usize {
        self.inner.state.lock().free.len()
    }

    /// Returns the fixed size of the backing store.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Returns true if no bytes are waiting to be read.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        !self.inner.state.lock().open
    }

    /// Reads buffered bytes into `buf` without blocking.
    ///
    /// Copies as many bytes as are buffered, up to `buf.len()`, and returns
    /// how many were copied. `Ok(0)` means nothing is buffered yet and the
    /// caller should try again later.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::EndOfStream`] once the pipe is closed and drained.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, PipeError> {
        let mut state = self.inner.state.lock();

        if state.used.is_empty() {
            return if state.open {
                Ok(0)
            } else {
                Err(PipeError::EndOfStream)
            };
        }

        let n = state.drain(buf);
        if n > 0 {
            self.inner.space.notify_all();
        }
        Ok(n)
    }

    /// Reads buffered bytes into `buf`, waiting for data if none is buffered.
    ///
    /// Behaves like [`read`](Self::read) except that an empty, open pipe parks
    /// the caller until a writer stores bytes or the pipe is closed. An empty
    /// `buf` returns `Ok(0)` immediately.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::EndOfStream`] once the pipe is closed and drained.
    pub fn read_blocking(&self, buf: &mut [u8]) -> Result<usize, PipeError> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut state = self.inner.state.lock();
        while state.used.is_empty() {
            if !state.open {
                return Err(PipeError::EndOfStream);
            }
            self.inner.data.wait(&mut state);
        }

        let n = state.drain(buf);
        self.inner.space.notify_all();
        if !state.used.is_empty() {
            // Leftover bytes belong to the next parked reader.
            self.inner.data.notify_one();
        }
        Ok(n)
    }

    /// Writes `data` into the pipe, blocking until all of it fits.
    ///
    /// Payloads longer than the capacity are cut down to exactly `capacity`
    /// bytes before waiting; the remainder is dropped and never written.
    ///
    /// # Errors
    ///
    /// - [`PipeError::Closed`] if the pipe is closed before or while waiting.
    ///   No bytes are stored in that case.
    /// - [`PipeError::ShortWrite`] if the payload was truncated. The stored
    ///   prefix is readable as usual.
    pub fn write(&self, data: &[u8]) -> Result<usize, PipeError> {
        let mut state = self.inner.state.lock();
        if !state.open {
            return Err(PipeError::Closed);
        }

        let requested = data.len();
        let data = &data[..requested.min(self.inner.capacity)];

        while state.free.len() < data.len() {
            trace!(
                "pipe {}: writer waiting for {} bytes, {} free",
                self.label(),
                data.len(),
                state.free.len()
            );
            self.inner.space.wait(&mut state);
            if !state.open {
                trace!("pipe {}: blocked writer released by close", self.label());
                return Err(PipeError::Closed);
            }
        }

        let n = state.fill(data);
        if n > 0 {
            self.inner.data.notify_one();
        }

        if n < requested {
            debug!(
                "pipe {}: short write, stored {} of {} bytes",
                self.label(),
                n,
                requested
            );
            return Err(PipeError::ShortWrite {
                written: n,
                requested,
            });
        }
        Ok(n)
    }

    /// Closes the pipe.
    ///
    /// Writers blocked in [`write`](Self::write) wake up and fail with
    /// [`PipeError::Closed`], as does every later write. Bytes already
    /// buffered stay readable. Closing twice has no further effect.
    pub fn close(&self) {
        let mut state = self.inner.state.lock();
        if !state.open {
            return;
        }
        state.open = false;
        debug!(
            "pipe {}: closed with {} bytes buffered",
            self.label(),
            state.used.len()
        );
        self.inner.space.notify_all();
        self.inner.data.notify_all();
    }

    fn label(&self) -> &str {
        self.inner.name.as_deref().unwrap_or("-")
    }

    #[cfg(test)]
    fn store_snapshot(&self) -> Vec<u8> {
        self.inner.state.lock().store.to_vec()
    }

    #[cfg(test)]
    fn regions(&self) -> (Region, Region) {
        let state = self.inner.state.lock();
        (state.used, state.free)
    }
}

impl fmt::Debug for RingPipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("RingPipe")
            .field("name", &self.inner.name)
            .field("capacity", &self.inner.capacity)
            .field("len", &state.used.len())
            .field("closed", &!state.open)
            .finish()
    }
}

/// Blocking reads; end of stream is reported as `Ok(0)`.
impl io::Read for RingPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match RingPipe::read_blocking(self, buf) {
            Ok(n) => Ok(n),
            Err(PipeError::EndOfStream) => Ok(0),
            Err(err) => Err(err.into()),
        }
    }
}

/// Truncated payloads are reported as partial writes, so `write_all`
/// resubmits the remainder.
impl io::Write for RingPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match RingPipe::write(self, buf) {
            Ok(n) => Ok(n),
            Err(PipeError::ShortWrite { written, .. }) => Ok(written),
            Err(err) => Err(err.into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
