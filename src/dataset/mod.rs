//! Datasets
//!
//! This module implements the example set consumed by the model tree
//! algorithms: a catalog of multi-valued categorical features, a fixed-arity
//! block of continuous attributes and one continuous target per example.
use ndarray::{Array1, Array2, NdFloat};

use num_traits::{FromPrimitive, NumCast, Signed};

use std::fmt;
use std::iter::Sum;
use std::sync::Arc;

use crate::error::{Error, Result};

mod impl_dataset;
mod iter;

pub use iter::{ExampleIter, ExampleView};

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumptions on floating
/// point numbers and implements them for 32bit and 64bit floats. They are
/// used for the continuous attributes of a dataset as well as its targets.
pub trait Float:
    NdFloat + FromPrimitive + Signed + Default + Sum + approx::AbsDiffEq<Epsilon = Self>
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}
impl Float for f64 {}

/// A categorical feature with a fixed vocabulary of values
///
/// Features are immutable once constructed. Everywhere else in the workspace
/// a value is identified by its index into the vocabulary, so that subsets,
/// tree children and error reports stay stable and cheap to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    name: String,
    values: Vec<String>,
}

impl Feature {
    /// Creates a feature from its name and value vocabulary.
    ///
    /// Fails when the vocabulary is empty or contains duplicate values.
    pub fn new(name: String, values: Vec<String>) -> Result<Feature> {
        if values.is_empty() {
            return Err(Error::Parameters(format!(
                "feature {:?} needs at least one value",
                name
            )));
        }
        for (idx, value) in values.iter().enumerate() {
            if values[..idx].contains(value) {
                return Err(Error::Parameters(format!(
                    "feature {:?} lists value {:?} twice",
                    name, value
                )));
            }
        }

        Ok(Feature { name, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value vocabulary in declaration order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn nvalues(&self) -> usize {
        self.values.len()
    }

    /// The value string behind an index
    ///
    /// Panics when the index is outside the vocabulary.
    pub fn value(&self, idx: usize) -> &str {
        &self.values[idx]
    }

    /// Looks up the index of a value string
    pub fn value_index(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} values)", self.name, self.values.len())
    }
}

/// A single labeled example
///
/// `continuous` holds the fixed-arity attribute vector, `discrete` one set of
/// value indices per feature of the catalog (a film can carry several genres
/// at once) and `target` the continuous value to learn.
#[derive(Debug, Clone, PartialEq)]
pub struct Example<F> {
    pub continuous: Array1<F>,
    pub discrete: Vec<Vec<usize>>,
    pub target: F,
}

impl<F: Float> Example<F> {
    pub fn new(continuous: Array1<F>, discrete: Vec<Vec<usize>>, target: F) -> Example<F> {
        Example {
            continuous,
            discrete,
            target,
        }
    }
}

/// An immutable set of examples in columnar form
///
/// The continuous attributes live in a dense `nsamples x nattributes` block,
/// the targets in a vector of the same length and the categorical assignments
/// in one column per feature, each holding a sorted set of value indices per
/// example. The feature catalog is shared behind an [`Arc`] so that splits of
/// a dataset and models fitted on it agree on value identity without copying
/// or re-checking the vocabulary.
///
/// Construction goes through [`Dataset::from_examples`], which validates every
/// assignment up front. Malformed examples are rejected there, before any
/// algorithm gets to divide by a subset size.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<F> {
    records: Array2<F>,
    discrete: Vec<Vec<Vec<usize>>>,
    targets: Array1<F>,
    features: Arc<[Feature]>,
}
