//! An error when fitting or scoring a model tree
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelTreeError>;

/// An error when fitting or scoring a model tree
#[derive(Error, Debug)]
pub enum ModelTreeError {
    #[error(transparent)]
    BaseCrate(#[from] cinelearn::Error),
    /// A leaf equation could not be fitted, the whole build fails
    #[error("leaf regression failed: {0}")]
    Linear(#[from] cinelearn_linear::LinearError),
    /// The example holds a discrete value the tree never observed while
    /// fitting
    #[error("feature {feature} has no child for value {value}")]
    MissingChild { feature: String, value: String },
    /// A leaf solver returned a coefficient vector of the wrong length
    #[error("expected {expected} raw coefficients, got {got}")]
    CoefficientLength { expected: usize, got: usize },
    /// The dataset does not match the catalog the tree was fitted on
    #[error("dataset incompatible with the fitted tree: {0}")]
    IncompatibleDataset(String),
}
