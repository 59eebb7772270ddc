//! Error types in cinelearn
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("malformed example {example}: {reason}")]
    MalformedExample { example: usize, reason: String },
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error("all deviations are equal, the spread is degenerate")]
    DegenerateSpread,
}
