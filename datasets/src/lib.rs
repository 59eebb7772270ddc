//! `cinelearn-datasets` provides movie catalog ingestion and a sample catalog ready to be used in tests and examples.
//!
//! ## The Big Picture
//!
//! `cinelearn-datasets` is a crate in the `cinelearn` workspace, a toolkit for learning piecewise linear rating models from movie catalogs.
//!
//! ## Current State
//!
//! The crate provides:
//!
//! * [`TsvReader`] : configurable tab-separated catalog ingestion with multi-valued discrete columns
//! * [`credit_weight`] : the positional weight of a film credit
//! * `["movies"]` : an embedded catalog of rated films
//!
//! Loaded catalogs are returned as a [`cinelearn::Dataset`] with named, multi-valued features.
//!
//! ## Using the sample catalog
//!
//! To use the embedded catalog in your project add the crate to your Cargo.toml with the corresponding feature enabled:
//! ```ignore
//! cinelearn-datasets = { version = "0.1", features = ["movies"] }
//! ```
//! and then use it in your example or tests as
//! ```ignore
//! let (train, valid) = cinelearn_datasets::movies()
//!     .split_with_ratio(0.8);
//! ```

mod credits;
mod tsv;

pub use credits::credit_weight;
pub use tsv::{ReadError, TsvReader};

#[cfg(feature = "movies")]
use flate2::read::GzDecoder;

#[cfg(feature = "movies")]
/// Read in the embedded movie catalog.
///
/// One hundred twenty films with director, actors, writers and genres as
/// discrete features, runtime, release year, log vote count and log budget
/// as continuous attributes and the rating as target.
pub fn movies() -> cinelearn::Dataset<f64> {
    let data = include_bytes!("../data/movies.tsv.gz");
    // unzip file
    let file = GzDecoder::new(&data[..]);

    TsvReader::new(9)
        .discrete_column("director", 1)
        .discrete_column("actors", 2)
        .discrete_column("writers", 3)
        .discrete_column("genres", 4)
        .continuous_column(5)
        .continuous_column(6)
        .continuous_column(7)
        .continuous_column(8)
        .read(file)
        .unwrap()
}
