//! `cinelearn` is a toolkit for learning piecewise linear rating models from
//! movie catalogs with Rust.
//!
//! A movie is an awkward fit for the usual fixed-width feature matrix: it has
//! a handful of continuous attributes (runtime, vote counts, budget) next to
//! categorical features like cast or genre where every title holds a whole
//! *set* of values at once. This base crate provides the data structures that
//! represent such examples, the validation that turns a raw example list into
//! a learnable [`Dataset`](crate::dataset::Dataset), and the constant-predictor
//! baselines a fitted model has to beat.
//!
//! The actual learners live in the workspace members:
//!
//! * `cinelearn-linear` fits the least squares equations used in the leaves
//! * `cinelearn-trees` grows the model trees that route examples to them
//! * `cinelearn-datasets` ships a small movie catalog to experiment with
//!
//! ## Conventions
//!
//! All algorithms are generic over the [`Float`](crate::dataset::Float) trait,
//! implemented for `f32` and `f64`. Hyperparameter sets follow the
//! [`ParamGuard`](crate::param_guard::ParamGuard) pattern: a builder collects
//! unchecked values and the checked set is what the
//! [`Fit`](crate::traits::Fit) implementations run on.

pub mod benchmarks;
pub mod dataset;
pub mod error;
mod hyperparams;
mod metrics_baseline;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, Example, Feature, Float};
pub use error::{Error, Result};
pub use param_guard::ParamGuard;

/// Baseline metrics for continuous targets
pub mod metrics {
    pub use crate::metrics_baseline::{
        average, normalized_root_mean_square, root_mean_square, split_list,
    };
}
