//! Bit buffer errors.

/// Errors thrown while persisting or reviving a [`crate::BitBuffer`].
#[derive(Debug)]
pub enum BitBufferError {
    /// The underlying file system operation failed.
    Io(std::io::Error),
}

impl std::fmt::Display for BitBufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BitBufferError::Io(err) => write!(f, "bit buffer I/O error: {}", err),
        }
    }
}

impl std::error::Error for BitBufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BitBufferError::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BitBufferError {
    fn from(err: std::io::Error) -> Self {
        BitBufferError::Io(err)
    }
}
