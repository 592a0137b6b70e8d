//! Error types for the wire codecs

use thiserror::Error;

/// Errors that can occur while decoding or encoding wire payloads
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("digit stream exhausted after {words} words")]
    StreamExhausted { words: usize },

    #[error("empty solution payload")]
    EmptySolution,

    #[error("solution declares {declared} moves, limit is {limit}")]
    TooManyMoves { declared: u16, limit: u16 },

    #[error("digit {0} does not name a move kind")]
    InvalidMoveKind(u8),

    #[error("digit {0} does not name a direction")]
    InvalidDirection(u8),
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
