use elb_core::MessageId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Invalid frame: {0}")]
    Frame(#[from] FrameError),

    #[error("{0}")]
    Custom(String),
}

/// Reasons a datagram is not a well-formed frame of the expected kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("datagram of {len} bytes is shorter than the frame header")]
    Truncated { len: usize },

    #[error("unknown message id {0}")]
    UnknownTag(i32),

    #[error("expected {expected}, got {actual}")]
    UnexpectedTag {
        expected: MessageId,
        actual: MessageId,
    },

    #[error("header declares {declared} body bytes, datagram carries {actual}")]
    LengthMismatch { declared: i32, actual: usize },

    #[error("body of {len} bytes does not fit in a datagram")]
    BodyTooLarge { len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
