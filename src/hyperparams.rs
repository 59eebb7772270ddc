use std::error::Error;

use crate::{traits::Fit, ParamGuard};

/// Performs the checking step and calls `fit` on the checked hyperparameters.
/// If checking failed, the checking error is converted to the original error
/// type of `Fit` and returned.
impl<D, E, P: ParamGuard> Fit<D, E> for P
where
    P::Checked: Fit<D, E>,
    E: Error + From<P::Error>,
{
    type Object = <<P as ParamGuard>::Checked as Fit<D, E>>::Object;

    fn fit(&self, dataset: &D) -> Result<Self::Object, E> {
        let checked = self.check_ref()?;
        checked.fit(dataset)
    }
}
