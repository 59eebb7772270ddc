//!
//! `cinelearn-linear` provides the pure Rust least squares solver behind the
//! leaf equations of the `cinelearn` model trees.
//!
//! ## The Big Picture
//!
//! `cinelearn-linear` is a crate in the `cinelearn` workspace, a toolkit for
//! learning piecewise linear rating models from movie catalogs.
//!
//! ## Current state
//!
//! `cinelearn-linear` currently provides an implementation of the following
//! regression algorithms:
//! - Ordinary Least Squares
//!
//! The solver runs on `linfa-linalg`'s QR decomposition and requires no
//! external BLAS/LAPACK backend.

mod error;
mod ols;

pub use error::*;
pub use ols::*;
