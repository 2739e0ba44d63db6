use std::io;

use crate::position::Position;

#[derive(Debug, thiserror::Error)]
pub enum SokobanError {
    #[error("{0}")]
    Io(#[from] io::Error),

    /// A cell outside of the grid was accessed. The engine never does this for legal input, so
    /// seeing this error means a bug in the caller.
    #[error("OutOfBounds{0}")]
    OutOfBounds(Position),

    #[error("NoLevel")]
    NoLevel,

    #[error("NoWorker")]
    NoWorker,

    #[error("TwoWorkers({0})")]
    TwoWorkers(usize),

    #[error("InvalidCharacter({0:?})")]
    InvalidCharacter(char),

    #[error("InvalidLevelIndex({index}, {count})")]
    InvalidLevelIndex { index: usize, count: usize },

    #[error("UnparseableSequence({0:?})")]
    UnparseableSequence(String),

    #[error("NoPathFound({from} -> {to})")]
    NoPathFound { from: Position, to: Position },

    #[error("InvalidMove({0:?})")]
    InvalidMove(char),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SokobanError {
    fn from(err: serde_json::Error) -> SokobanError {
        SokobanError::Config(err.to_string())
    }
}
