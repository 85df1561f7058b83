use crate::base64::decode;
use std::io;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Malformed,
    Truncated,
    Corruption,
    Serialization,
    Io,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Decode(#[from] decode::Error),
    #[error("Corrupt compressed payload: {0}")]
    Corruption(#[source] io::Error),
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode(error) if error.is_truncated() => ErrorKind::Truncated,
            Self::Decode(_) => ErrorKind::Malformed,
            Self::Corruption(_) => ErrorKind::Corruption,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Recovers a codec error that travelled through an `io::Write` boundary.
    pub fn from_io(error: io::Error) -> Self {
        if error.get_ref().is_none() {
            return Self::Io(error);
        }
        let kind = error.kind();
        match error.into_inner().map(|inner| inner.downcast::<Error>()) {
            Some(Ok(inner)) => *inner,
            Some(Err(inner)) => Self::Io(io::Error::new(kind, inner)),
            None => Self::Io(io::Error::from(kind)),
        }
    }

    pub(crate) fn into_io(self) -> io::Error {
        match self {
            Self::Io(error) => error,
            error => io::Error::new(io::ErrorKind::InvalidData, error),
        }
    }

    /// Corruption inside the gzip layer, or a genuine I/O failure of the sink.
    pub(crate) fn from_gzip(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof | io::ErrorKind::WriteZero => {
                Self::Corruption(error)
            }
            _ => Self::Io(error),
        }
    }
}
