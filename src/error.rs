//! Error types for register operations.

use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandError {
    #[error("Unknown register: {0:?}")]
    UnknownRegister(String),

    #[error("Too many values: got {count}, at most {max} can be written")]
    TooManyValues { count: usize, max: usize },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type HandResult<T> = Result<T, HandError>;
