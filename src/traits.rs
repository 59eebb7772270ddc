//! Provide the trait implemented by every learning algorithm in the
//! workspace.

/// Fit a model on a whole dataset at once.
///
/// Implemented on checked hyperparameter sets; the blanket implementation in
/// [`crate::hyperparams`] extends it to the unchecked sets with the
/// validation step done automatically.
pub trait Fit<D, E: std::error::Error> {
    type Object;

    fn fit(&self, dataset: &D) -> Result<Self::Object, E>;
}
