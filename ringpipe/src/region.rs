//! Region arithmetic over a fixed-size byte store.
//!
//! A [`Region`] names the logical span `[start, start + len)` of a store,
//! taken modulo the store length. The span is never kept as a slice; every
//! copy asks the region for its one or two physically contiguous segments.

/// Adds `b` to index `a`, wrapping at `capacity`.
///
/// `a` must be below `capacity` and `b` must not exceed it, so a single
/// subtraction is enough to bring the sum back into range.
#[inline]
pub fn wrap_add(capacity: usize, a: usize, b: usize) -> usize {
    let sum = a + b;
    if sum >= capacity { sum - capacity } else { sum }
}

/// A contiguous-or-wrapped span of a fixed-size store.
///
/// # Example
///
/// ```
/// use giztoy_ringpipe::Region;
///
/// let store = *b"CDE...AB";
/// let region = Region::new(6, 5);
///
/// let (primary, wrapped) = region.segments(&store);
/// assert_eq!(primary, b"AB");
/// assert_eq!(wrapped, Some(&b"CDE"[..]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    start: usize,
    len: usize,
}

impl Region {
    /// Creates a region starting at `start` spanning `len` bytes.
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Index of the first byte of the region.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Number of bytes covered by the region.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the region covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index one past the last byte, wrapped into `[0, capacity)`.
    pub fn end(&self, capacity: usize) -> usize {
        wrap_add(capacity, self.start, self.len)
    }

    /// Splits the region into its primary segment and, when the span wraps,
    /// the segment continuing at index 0.
    ///
    /// # Panics
    ///
    /// Panics if the region does not fit inside `store`.
    pub fn segments<'a>(&self, store: &'a [u8]) -> (&'a [u8], Option<&'a [u8]>) {
        if self.len == 0 {
            return (&[], None);
        }
        let capacity = store.len();
        self.check_bounds(capacity);

        let end = self.end(capacity);
        if end == 0 {
            (&store[self.start..], None)
        } else if end > self.start {
            (&store[self.start..end], None)
        } else {
            (&store[self.start..], Some(&store[..end]))
        }
    }

    /// Mutable counterpart of [`segments`](Self::segments).
    ///
    /// The two segments never overlap, so both can be written at once.
    ///
    /// # Panics
    ///
    /// Panics if the region does not fit inside `store`.
    pub fn segments_mut<'a>(&self, store: &'a mut [u8]) -> (&'a mut [u8], Option<&'a mut [u8]>) {
        if self.len == 0 {
            return (&mut [], None);
        }
        let capacity = store.len();
        self.check_bounds(capacity);

        let end = self.end(capacity);
        if end == 0 {
            (&mut store[self.start..], None)
        } else if end > self.start {
            (&mut store[self.start..end], None)
        } else {
            let (head, tail) = store.split_at_mut(self.start);
            (tail, Some(&mut head[..end]))
        }
    }

    /// Drops `n` bytes from the front of the region.
    pub(crate) fn consume(&mut self, n: usize, capacity: usize) {
        assert!(n <= self.len, "consume {} from region of {} bytes", n, self.len);
        self.start = wrap_add(capacity, self.start, n);
        self.len -= n;
    }

    /// Grows the region by `n` bytes at its end.
    pub(crate) fn extend(&mut self, n: usize, capacity: usize) {
        assert!(
            self.len + n <= capacity,
            "extend region of {} bytes by {} past capacity {}",
            self.len,
            n,
            capacity
        );
        self.len += n;
    }

    fn check_bounds(&self, capacity: usize) {
        assert!(
            self.start < capacity && self.len <= capacity,
            "region {:?} out of bounds for capacity {}",
            self,
            capacity
        );
    }
}
