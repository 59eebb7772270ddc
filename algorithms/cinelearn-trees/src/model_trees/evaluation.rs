//! Whole dataset scoring for fitted model trees
//!
use cinelearn::{dataset::Dataset, Float};

use super::ModelTree;
use crate::error::{ModelTreeError, Result};

/// One leaf visit while scoring an example
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord<F> {
    /// The known target of the example
    pub target: F,
    /// The value of the leaf equation over the continuous attributes
    pub prediction: F,
    /// `target - prediction`
    pub residual: F,
}

/// Scores every example of a dataset against a fitted tree.
///
/// Examples holding a discrete value the tree never observed are recorded
/// as failures instead of aborting the run; every other error is fatal. The
/// aggregate statistics run over the scored examples only.
#[derive(Debug, Clone, Default)]
pub struct TreeEvaluator {
    collect_predictions: bool,
}

impl TreeEvaluator {
    pub fn new() -> Self {
        TreeEvaluator::default()
    }

    /// Keep one [`PredictionRecord`] per leaf visit of every scored example
    pub fn collect_predictions(mut self, collect: bool) -> Self {
        self.collect_predictions = collect;
        self
    }

    /// Score every example of the dataset.
    ///
    /// Fails with [`NotEnoughSamples`](cinelearn::Error::NotEnoughSamples)
    /// when the dataset is empty or no example could be scored, and with
    /// [`DegenerateSpread`](cinelearn::Error::DegenerateSpread) when the
    /// squared errors have no spread to normalize by.
    pub fn evaluate<F: Float>(
        &self,
        tree: &ModelTree<F>,
        data: &Dataset<F>,
    ) -> Result<TreeEvaluation<F>> {
        tree.check_compatible(data)?;
        if data.nsamples() == 0 {
            return Err(cinelearn::Error::NotEnoughSamples.into());
        }

        let mut trace = if self.collect_predictions {
            Some(Vec::new())
        } else {
            None
        };
        let mut failures = Vec::new();
        let mut sum = F::zero();
        let mut min = F::infinity();
        let mut max = F::neg_infinity();
        let mut scored = 0;

        for row in 0..data.nsamples() {
            let mark = trace.as_ref().map_or(0, Vec::len);

            match tree.score_row(data, row, &mut trace) {
                Ok(squared) => {
                    sum += squared;
                    min = min.min(squared);
                    max = max.max(squared);
                    scored += 1;
                }
                Err(err @ ModelTreeError::MissingChild { .. }) => {
                    // drop the records of the partially walked example
                    if let Some(records) = trace.as_mut() {
                        records.truncate(mark);
                    }
                    failures.push((row, err));
                }
                Err(err) => return Err(err),
            }
        }

        if scored == 0 {
            return Err(cinelearn::Error::NotEnoughSamples.into());
        }
        if max <= min {
            return Err(cinelearn::Error::DegenerateSpread.into());
        }

        let rms = (sum / F::cast(scored)).sqrt();
        let norm_rms = rms / (max - min);

        Ok(TreeEvaluation {
            rms,
            norm_rms,
            examples_scored: scored,
            failures,
            predictions: trace.unwrap_or_default(),
        })
    }
}

/// The outcome of scoring a dataset with a fitted tree
#[derive(Debug)]
pub struct TreeEvaluation<F> {
    rms: F,
    norm_rms: F,
    examples_scored: usize,
    failures: Vec<(usize, ModelTreeError)>,
    predictions: Vec<PredictionRecord<F>>,
}

impl<F: Float> TreeEvaluation<F> {
    /// Root of the mean squared error over the scored examples
    pub fn rms(&self) -> F {
        self.rms
    }

    /// The root mean squared error divided by the spread of the squared
    /// errors
    pub fn norm_rms(&self) -> F {
        self.norm_rms
    }

    /// How many examples were scored
    pub fn examples_scored(&self) -> usize {
        self.examples_scored
    }

    /// Row indices that could not be scored, with the error of each
    pub fn failures(&self) -> &[(usize, ModelTreeError)] {
        &self.failures
    }

    /// One record per leaf visit of every scored example, empty unless
    /// [`TreeEvaluator::collect_predictions`] was switched on
    pub fn predictions(&self) -> &[PredictionRecord<F>] {
        &self.predictions
    }
}
