//! An error when modeling a Linear algorithm
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinearError>;

/// An error when modeling a Linear algorithm
#[derive(Error, Debug)]
pub enum LinearError {
    #[error(transparent)]
    BaseCrate(#[from] cinelearn::Error),
    /// The system is underdetermined, fewer samples than coefficients
    #[error("not enough samples, {rows} rows cannot determine {cols} coefficients")]
    NotEnoughSamples { rows: usize, cols: usize },
    #[error(transparent)]
    Linalg(#[from] linfa_linalg::LinalgError),
}
