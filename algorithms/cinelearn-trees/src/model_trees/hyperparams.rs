use cinelearn::{error::Error, Float, ParamGuard};

use crate::ModelTree;

/// The set of hyperparameters that can be specified for fitting a
/// [model tree](crate::ModelTree).
///
/// ### Example
///
/// ```rust
/// use cinelearn_trees::ModelTree;
/// use cinelearn::prelude::*;
///
/// // Initialize the default set of parameters
/// let params = ModelTree::params();
/// // Set the parameters to the desired values
/// let params = params.min_subset_size(8).min_deviation(0.1);
///
/// // Load the data
/// let (train, _test) = cinelearn_datasets::movies().split_with_ratio(0.8);
/// // Fit the model tree on the training data
/// let tree = params.fit(&train).unwrap();
/// // Score the training set
/// let evaluation = tree.evaluate(&train).unwrap();
/// println!("rms: {}", evaluation.rms());
/// ```
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTreeValidParams<F> {
    min_subset_size: usize,
    min_deviation: F,
}

impl<F: Float> ModelTreeValidParams<F> {
    pub fn min_subset_size(&self) -> usize {
        self.min_subset_size
    }

    pub fn min_deviation(&self) -> F {
        self.min_deviation
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTreeParams<F>(ModelTreeValidParams<F>);

impl<F: Float> ModelTreeParams<F> {
    pub fn new() -> Self {
        Self(ModelTreeValidParams {
            min_subset_size: 10,
            min_deviation: F::cast(0.05),
        })
    }

    /// Sets the number of examples below which a branch value becomes a leaf
    /// instead of splitting further.
    pub fn min_subset_size(mut self, min_subset_size: usize) -> Self {
        self.0.min_subset_size = min_subset_size;
        self
    }

    /// Sets the deviation score under which a node stops splitting and all
    /// of its branch values become leaves.
    pub fn min_deviation(mut self, min_deviation: F) -> Self {
        self.0.min_deviation = min_deviation;
        self
    }
}

impl<F: Float> Default for ModelTreeParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> ModelTree<F> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `min_subset_size = 10`
    /// * `min_deviation = 0.05`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> ModelTreeParams<F> {
        ModelTreeParams::new()
    }
}

impl<F: Float> ParamGuard for ModelTreeParams<F> {
    type Checked = ModelTreeValidParams<F>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked, Error> {
        if self.0.min_deviation < F::zero() || !self.0.min_deviation.is_finite() {
            Err(Error::Parameters(format!(
                "Minimum deviation must be finite and non-negative, but was {}",
                self.0.min_deviation
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelearn::ParamGuard;

    #[test]
    fn default_thresholds() {
        let params = ModelTree::<f64>::params().check().unwrap();

        assert_eq!(params.min_subset_size(), 10);
        assert!((params.min_deviation() - 0.05).abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    /// Check that a negative minimum deviation panics
    fn panic_min_deviation() {
        ModelTree::<f64>::params()
            .min_deviation(-0.5)
            .check()
            .unwrap();
    }

    #[test]
    fn rejects_non_finite_min_deviation() {
        assert!(ModelTree::<f64>::params()
            .min_deviation(f64::NAN)
            .check()
            .is_err());
        assert!(ModelTree::<f64>::params()
            .min_deviation(f64::INFINITY)
            .check()
            .is_err());
    }
}
