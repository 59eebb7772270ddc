//!
//! # Model tree learning
//! `cinelearn-trees` provides a pure Rust implementation
//! of model tree learning for rating regression.
//!
//! # The big picture
//!
//! `cinelearn-trees` is a crate in the `cinelearn` workspace, a toolkit for
//! learning piecewise linear rating models from movie catalogs.
//!
//! Model trees are regression trees whose leaves hold fitted linear equations
//! instead of constant predictions. Internal nodes split on the discrete
//! features of an example; an example holding several values for a feature,
//! say a film crediting three actors, descends into every matching branch and
//! the results are averaged on the way back up.
//!
//! # Current state
//!
//! `cinelearn-trees` currently provides an [implementation](ModelTree) of
//! single-tree fitting for regression, together with a
//! [test set evaluator](TreeEvaluator) for aggregate error metrics.
//!

mod error;
mod model_trees;

// Re-export all core model tree functionality
pub use error::*;
pub use model_trees::*;
