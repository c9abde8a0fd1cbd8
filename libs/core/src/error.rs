use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown message id: {0}")]
    UnknownMessageId(i32),
}
