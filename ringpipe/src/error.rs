//! Error types for pipe operations.

use std::io;

/// Pipe operation error.
///
/// Every variant is reported to the caller that triggered it. None of them
/// indicate a broken pipe state; internal bookkeeping faults panic instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PipeError {
    /// The pipe is closed and every buffered byte has been read.
    #[error("ringpipe: end of stream")]
    EndOfStream,

    /// The payload was larger than the pipe capacity.
    ///
    /// The first `written` bytes were stored; the rest were discarded.
    #[error("ringpipe: short write, stored {written} of {requested} bytes")]
    ShortWrite { written: usize, requested: usize },

    /// The pipe was closed before the write could store anything.
    #[error("ringpipe: closed")]
    Closed,
}

impl PipeError {
    /// Returns the number of bytes the failing call still stored.
    pub fn written(&self) -> usize {
        match self {
            PipeError::ShortWrite { written, .. } => *written,
            _ => 0,
        }
    }
}

impl From<PipeError> for io::Error {
    fn from(err: PipeError) -> Self {
        let kind = match err {
            PipeError::EndOfStream => io::ErrorKind::UnexpectedEof,
            PipeError::ShortWrite { .. } => io::ErrorKind::WriteZero,
            PipeError::Closed => io::ErrorKind::BrokenPipe,
        };
        io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_error_display() {
        assert_eq!(PipeError::EndOfStream.to_string(), "ringpipe: end of stream");
        assert_eq!(PipeError::Closed.to_string(), "ringpipe: closed");

        let err = PipeError::ShortWrite {
            written: 8,
            requested: 10,
        };
        assert_eq!(err.to_string(), "ringpipe: short write, stored 8 of 10 bytes");
    }

    #[test]
    fn test_written() {
        assert_eq!(PipeError::Closed.written(), 0);
        assert_eq!(PipeError::EndOfStream.written(), 0);
        assert_eq!(
            PipeError::ShortWrite {
                written: 4,
                requested: 9
            }
            .written(),
            4
        );
    }

    #[test]
    fn test_into_io_error() {
        let err: io::Error = PipeError::Closed.into();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let inner = err.get_ref().and_then(|e| e.downcast_ref::<PipeError>());
        assert_eq!(inner, Some(&PipeError::Closed));

        let err: io::Error = PipeError::EndOfStream.into();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
