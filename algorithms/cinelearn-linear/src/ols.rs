//! Ordinary Least Squares
#![allow(non_snake_case)]
use crate::error::{LinearError, Result};
use cinelearn::Float;
use linfa_linalg::qr::LeastSquaresQrInto;
use ndarray::{concatenate, s, Array, Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};

/// An ordinary least squares linear regression model.
///
/// LinearRegression fits a linear model to minimize the residual sum of
/// squares between the observed targets, and the targets predicted by the
/// linear approximation.
///
/// Ordinary least squares regression solves the overconstrained model
///
/// y = Ax + b
///
/// by finding x and b which minimize the L_2 norm ||y - Ax - b||_2, using the
/// QR decomposition from `linfa-linalg`.
///
/// ## Examples
///
/// ```rust
/// use cinelearn_linear::LinearRegression;
/// use ndarray::array;
///
/// let records = array![[0.0, 1.0], [1.0, 3.0], [2.0, 2.0]];
/// let targets = array![1.0, 4.0, 9.0];
/// let model = LinearRegression::new().fit(&records, &targets).unwrap();
/// println!("slopes: {}, intercept: {}", model.params(), model.intercept());
/// ```
pub struct LinearRegression {
    fit_intercept: bool,
}

/// A fitted linear regression model which can be used for making predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLinearRegression<F> {
    intercept: F,
    params: Array1<F>,
}

impl Default for LinearRegression {
    fn default() -> Self {
        LinearRegression::new()
    }
}

/// Configure and fit a linear regression model
impl LinearRegression {
    /// Create a default linear regression model.
    /// By default, an intercept will be fitted.
    pub fn new() -> LinearRegression {
        LinearRegression {
            fit_intercept: true,
        }
    }

    /// Configure the linear regression model to fit an intercept.
    pub fn with_intercept(mut self, intercept: bool) -> Self {
        self.fit_intercept = intercept;
        self
    }

    /// Fit a linear regression model given a feature matrix `X` and a target
    /// variable `y`.
    ///
    /// The feature matrix `X` must have shape `(n_samples, n_features)`, the
    /// target variable `y` must have shape `(n_samples)`, and `n_samples` has
    /// to be at least the number of coefficients to determine, otherwise the
    /// system is underdetermined and `LinearError::NotEnoughSamples` is
    /// returned.
    ///
    /// Returns a `FittedLinearRegression` object which contains the fitted
    /// parameters and can be used to `predict` values of the target variable
    /// for new feature values.
    pub fn fit<F: Float, D: Data<Elem = F>, T: Data<Elem = F>>(
        &self,
        X: &ArrayBase<D, Ix2>,
        y: &ArrayBase<T, Ix1>,
    ) -> Result<FittedLinearRegression<F>> {
        let (n_samples, n_features) = X.dim();

        // Check that our inputs have compatible shapes
        assert_eq!(y.dim(), n_samples);

        let n_coefficients = n_features + usize::from(self.fit_intercept);
        if n_samples < n_coefficients {
            return Err(LinearError::NotEnoughSamples {
                rows: n_samples,
                cols: n_coefficients,
            });
        }

        if self.fit_intercept {
            let X = concatenate(Axis(1), &[X.view(), Array2::ones((X.nrows(), 1)).view()]).unwrap();
            let params: Array1<F> = solve_least_squares(X, y.to_owned())?;
            let intercept = *params.last().unwrap();
            let params = params.slice(s![..params.len() - 1]).to_owned();
            Ok(FittedLinearRegression { intercept, params })
        } else {
            // `LeastSquaresQrInto` needs a mutable reference to the data and
            // the problem matrix is taken by reference. Therefore copy the
            // problem matrix and target vector.
            let (X, y) = (X.to_owned(), y.to_owned());

            Ok(FittedLinearRegression {
                intercept: F::cast(0),
                params: solve_least_squares(X, y)?,
            })
        }
    }
}

/// Find the b that minimizes the 2-norm of X b - y
/// by using the least_squares solver from linfa-linalg
fn solve_least_squares<F>(mut X: Array<F, Ix2>, mut y: Array<F, Ix1>) -> Result<Array1<F>>
where
    F: Float,
{
    // ensure that the matrix and target views carry the same storage type
    let (X, y) = (X.view_mut(), y.view_mut());

    let out = X
        .least_squares_into(y.insert_axis(Axis(1)))?
        .remove_axis(Axis(1));
    Ok(out)
}

/// View the fitted parameters and make predictions with a fitted
/// linear regresssion model.
impl<F: Float> FittedLinearRegression<F> {
    /// Get the fitted parameters
    pub fn params(&self) -> &Array1<F> {
        &self.params
    }

    /// Get the fitted intercept, 0. if no intercept was fitted
    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// Given an input matrix `X`, with shape `(n_samples, n_features)`,
    /// `predict` returns the target variable according to the linear model
    /// learned from the training data distribution.
    pub fn predict<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        x.dot(&self.params) + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn fits_a_line_through_two_dots() {
        let lin_reg = LinearRegression::new();
        let model = lin_reg.fit(&array![[0f64], [1.]], &array![1., 2.]).unwrap();
        let result = model.predict(&array![[0f64], [1.]]);

        assert_abs_diff_eq!(result, &array![1., 2.], epsilon = 1e-12);
    }

    /// When `with_intercept` is set to false, the
    /// fitted line runs through the origin. For a perfect
    /// fit we only need to provide one point.
    #[test]
    fn without_intercept_fits_line_through_origin() {
        let lin_reg = LinearRegression::new().with_intercept(false);
        let model = lin_reg.fit(&array![[1.]], &array![1.]).unwrap();
        let result = model.predict(&array![[0.], [1.]]);

        assert_abs_diff_eq!(result, &array![0., 1.], epsilon = 1e-12);
    }

    /// We can't fit a line through two points without fitting the
    /// intercept in general. In this case we should find the solution
    /// that minimizes the squares. Fitting a line with intercept through
    /// the points (-1, 1), (1, 1) has the least-squares solution
    /// f(x) = 0
    #[test]
    fn fits_least_squares_line_through_two_dots() {
        let lin_reg = LinearRegression::new().with_intercept(false);
        let model = lin_reg.fit(&array![[-1.], [1.]], &array![1., 1.]).unwrap();
        let result = model.predict(&array![[-1.], [1.]]);

        assert_abs_diff_eq!(result, &array![0., 0.], epsilon = 1e-12);
    }

    /// We can't fit a line through three points in general
    /// - in this case we should find the solution that minimizes
    /// the squares. Fitting a line with intercept through the
    /// points (0, 0), (1, 0), (2, 2) has the least-squares solution
    /// f(x) = -1./3. + x
    #[test]
    fn fits_least_squares_line_through_three_dots() {
        let lin_reg = LinearRegression::new();
        let model = lin_reg
            .fit(&array![[0.], [1.], [2.]], &array![0., 0., 2.])
            .unwrap();
        let actual = model.predict(&array![[0.], [1.], [2.]]);

        assert_abs_diff_eq!(actual, array![-1. / 3., 2. / 3., 5. / 3.], epsilon = 1e-12);
    }

    /// Check that the linear regression perfectly fits three datapoints for
    /// the model
    /// f(x) = (x + 1)^2 = x^2 + 2x + 1
    #[test]
    fn fits_three_parameters_through_three_dots() {
        let lin_reg = LinearRegression::new();
        let model = lin_reg
            .fit(&array![[0f64, 0.], [1., 1.], [2., 4.]], &array![1., 4., 9.])
            .unwrap();

        assert_abs_diff_eq!(model.params(), &array![2., 1.], epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept(), 1., epsilon = 1e-12);
    }

    /// Check that the linear regression perfectly fits four datapoints for
    /// the model
    /// f(x) = (x + 1)^3 = x^3 + 3x^2 + 3x + 1
    #[test]
    fn fits_four_parameters_through_four_dots() {
        let lin_reg = LinearRegression::new();
        let model = lin_reg
            .fit(
                &array![[0f64, 0., 0.], [1., 1., 1.], [2., 4., 8.], [3., 9., 27.]],
                &array![1., 8., 27., 64.],
            )
            .unwrap();

        assert_abs_diff_eq!(model.params(), &array![3., 3., 1.], epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept(), 1., epsilon = 1e-12);
    }

    /// Check that the linear regression perfectly fits three datapoints for
    /// the model
    /// f(x) = (x + 1)^2 = x^2 + 2x + 1
    #[test]
    fn fits_three_parameters_through_three_dots_f32() {
        let lin_reg = LinearRegression::new();
        let model = lin_reg
            .fit(&array![[0f32, 0.], [1., 1.], [2., 4.]], &array![1., 4., 9.])
            .unwrap();

        assert_abs_diff_eq!(model.params(), &array![2., 1.], epsilon = 1e-4);
        assert_abs_diff_eq!(model.intercept(), 1., epsilon = 1e-6);
    }

    /// Two samples cannot determine two slopes and an intercept.
    #[test]
    fn rejects_underdetermined_systems() {
        let lin_reg = LinearRegression::new();
        let err = lin_reg
            .fit(&array![[0f64, 0.], [1., 1.]], &array![1., 4.])
            .unwrap_err();

        assert!(matches!(
            err,
            LinearError::NotEnoughSamples { rows: 2, cols: 3 }
        ));
    }
}
