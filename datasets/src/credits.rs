//! Billing position weights for film credits
//!

/// Weight of one film credit by billing position.
///
/// The people listed first dominate a credit profile: positions zero through
/// four carry the coefficients 10, 5, 1, 0.5 and 0.3, later positions carry
/// none. The weight is `1 + coefficient * rating`, so even an unweighted
/// position still counts the appearance itself.
///
/// ```
/// use cinelearn_datasets::credit_weight;
///
/// // the lead of an 8.0 film outweighs the fifth name by far
/// assert_eq!(credit_weight(0, 8.0), 81.0);
/// assert_eq!(credit_weight(4, 8.0), 3.4);
/// assert_eq!(credit_weight(7, 8.0), 1.0);
/// ```
pub fn credit_weight(position: usize, rating: f64) -> f64 {
    let coefficient = match position {
        0 => 10.0,
        1 => 5.0,
        2 => 1.0,
        3 => 0.5,
        4 => 0.3,
        _ => 0.0,
    };

    1.0 + coefficient * rating
}
