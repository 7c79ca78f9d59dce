use ndarray::{Array, IxDyn};

use crate::shared::MlNumber;

/// A probabilistic model able to score observed data.
///
/// `log_likelihood` returns one value per sample for batched data, or a
/// 0-d array for a single scalar score.
pub trait LogLikelihood<A: MlNumber> {
    type Input: ?Sized;
    type Error;

    fn log_likelihood(&self, x: &Self::Input) -> Result<Array<A, IxDyn>, Self::Error>;

    fn input_var(&self) -> &[String] {
        &[]
    }

    fn prob_text(&self) -> String {
        String::from("p(x)")
    }
}

impl<A: MlNumber, M: LogLikelihood<A> + ?Sized> LogLikelihood<A> for &M {
    type Input = M::Input;
    type Error = M::Error;

    fn log_likelihood(&self, x: &Self::Input) -> Result<Array<A, IxDyn>, Self::Error> {
        (**self).log_likelihood(x)
    }

    fn input_var(&self) -> &[String] {
        (**self).input_var()
    }

    fn prob_text(&self) -> String {
        (**self).prob_text()
    }
}
