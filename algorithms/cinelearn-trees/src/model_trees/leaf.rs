//! Leaf payloads and the least squares boundary they are fitted through
use std::fmt;

use ndarray::{s, Array1, ArrayView1, ArrayView2};

use cinelearn::Float;
use cinelearn_linear::{LinearError, LinearRegression};

use crate::error::{ModelTreeError, Result};

/// An affine equation over the continuous attributes of an example
#[derive(Debug, Clone, PartialEq)]
pub struct LinearEquation<F> {
    intercept: F,
    slopes: Array1<F>,
}

impl<F: Float> LinearEquation<F> {
    /// Builds an equation from a raw solver coefficient vector.
    ///
    /// For `arity` continuous attributes the raw vector holds `arity + 2`
    /// entries: index 0 is a structurally zero placeholder and is discarded,
    /// indices `1..=arity` are the slopes in attribute order and the last
    /// entry is the intercept.
    pub fn from_coefficients(raw: ArrayView1<F>, arity: usize) -> Result<LinearEquation<F>> {
        if raw.len() != arity + 2 {
            return Err(ModelTreeError::CoefficientLength {
                expected: arity + 2,
                got: raw.len(),
            });
        }

        Ok(LinearEquation {
            intercept: raw[arity + 1],
            slopes: raw.slice(s![1..=arity]).to_owned(),
        })
    }

    /// Evaluates the equation on one continuous attribute vector, the dot
    /// product of the slopes with `x` plus the intercept.
    pub fn solve(&self, x: ArrayView1<F>) -> F {
        self.intercept + self.slopes.dot(&x)
    }

    /// The fitted intercept
    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// The fitted slopes, one per continuous attribute
    pub fn slopes(&self) -> &Array1<F> {
        &self.slopes
    }
}

impl<F: Float> fmt::Display for LinearEquation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:.3}", self.intercept)?;
        for (i, &slope) in self.slopes.iter().enumerate() {
            if slope.is_negative() {
                write!(f, " - {:.3}*x{}", slope.abs(), i)?;
            } else {
                write!(f, " + {:.3}*x{}", slope, i)?;
            }
        }
        Ok(())
    }
}

/// The payload of one leaf
///
/// Next to the fitted equation the payload records the mean target of the
/// example set the fit ran over, an alternate constant predictor kept for
/// diagnostics. Scoring always goes through the equation.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafModel<F> {
    equation: LinearEquation<F>,
    fallback_average: F,
}

impl<F: Float> LeafModel<F> {
    pub(crate) fn new(equation: LinearEquation<F>, fallback_average: F) -> LeafModel<F> {
        LeafModel {
            equation,
            fallback_average,
        }
    }

    /// The fitted equation
    pub fn equation(&self) -> &LinearEquation<F> {
        &self.equation
    }

    /// Mean target of the example set the leaf was fitted over
    pub fn fallback_average(&self) -> F {
        self.fallback_average
    }

    /// Predicts the target for one continuous attribute vector
    pub fn solve(&self, x: ArrayView1<F>) -> F {
        self.equation.solve(x)
    }
}

/// The least squares backend fitting the raw coefficient vector of a leaf.
///
/// Implementations receive the continuous attribute block and the targets of
/// the example set a leaf covers and return the raw vector in the convention
/// of [`LinearEquation::from_coefficients`]: `arity + 2` entries with a zero
/// placeholder first, the slopes at `1..=arity` and the intercept last.
pub trait LeafSolver<F: Float> {
    fn fit_coefficients(
        &self,
        records: ArrayView2<F>,
        targets: ArrayView1<F>,
    ) -> std::result::Result<Array1<F>, LinearError>;
}

/// The default leaf solver, ordinary least squares from `cinelearn-linear`
#[derive(Debug, Clone, Default)]
pub struct OlsLeafSolver;

impl<F: Float> LeafSolver<F> for OlsLeafSolver {
    fn fit_coefficients(
        &self,
        records: ArrayView2<F>,
        targets: ArrayView1<F>,
    ) -> std::result::Result<Array1<F>, LinearError> {
        let fitted = LinearRegression::new().fit(&records, &targets)?;

        let arity = records.ncols();
        let mut raw = Array1::zeros(arity + 2);
        raw.slice_mut(s![1..=arity]).assign(fitted.params());
        raw[arity + 1] = fitted.intercept();

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn solves_the_affine_form() {
        let raw = array![0.0, 1.0, -0.5, 2.0];
        let equation = LinearEquation::from_coefficients(raw.view(), 2).unwrap();

        assert_abs_diff_eq!(equation.solve(array![4.0, 2.0].view()), 5.0);
        assert_abs_diff_eq!(equation.intercept(), 2.0);
        assert_abs_diff_eq!(equation.slopes(), &array![1.0, -0.5]);
    }

    #[test]
    fn rejects_wrong_coefficient_lengths() {
        let raw = array![0.0, 1.0, 2.0];
        let err = LinearEquation::from_coefficients(raw.view(), 2).unwrap_err();

        assert!(matches!(
            err,
            ModelTreeError::CoefficientLength {
                expected: 4,
                got: 3
            }
        ));
    }

    #[test]
    fn formats_the_equation() {
        let raw = array![0.0, 1.5, -0.5, 2.0];
        let equation = LinearEquation::from_coefficients(raw.view(), 2).unwrap();

        assert_eq!(equation.to_string(), "y = 2.000 + 1.500*x0 - 0.500*x1");
    }

    /// The default solver packs the fit of y = 1 + 2x into the raw
    /// convention: placeholder, slopes, intercept.
    #[test]
    fn ols_solver_returns_the_raw_convention() {
        let records = array![[0.0], [1.0], [2.0]];
        let targets = array![1.0, 3.0, 5.0];

        let raw = OlsLeafSolver
            .fit_coefficients(records.view(), targets.view())
            .unwrap();

        assert_abs_diff_eq!(raw, array![0.0, 2.0, 1.0], epsilon = 1e-10);
    }
}
