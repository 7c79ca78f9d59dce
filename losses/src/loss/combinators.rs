use log::debug;
use ndarray::{Array, IxDyn};

use crate::error::{IntoLossError, LossError};
use crate::shared::MlNumber;

use super::Loss;

/// `coefficient * inner`. Negation is a scale by `-1`.
#[derive(Debug, Clone)]
pub struct Scaled<A, L> {
    inner: L,
    coefficient: A,
}

impl<A: MlNumber, L: Loss<A>> Scaled<A, L> {
    pub fn new(inner: L, coefficient: A) -> Self {
        Self { inner, coefficient }
    }

    pub fn coefficient(&self) -> A {
        self.coefficient
    }
}

impl<A: MlNumber, L: Loss<A>> Loss<A> for Scaled<A, L> {
    type Input = L::Input;
    type ModelError = L::ModelError;
    type Error = L::Error;

    fn estimate(&self, x: &Self::Input) -> Result<Array<A, IxDyn>, Self::Error> {
        Ok(self.inner.estimate(x)? * self.coefficient)
    }

    fn input_var(&self) -> &[String] {
        self.inner.input_var()
    }

    fn loss_text(&self) -> String {
        format!("{} * ({})", self.coefficient, self.inner.loss_text())
    }
}

/// Element-wise sum of two losses over the same input.
///
/// Both outputs must have the same shape; nothing is broadcast.
#[derive(Debug, Clone)]
pub struct Summed<L, R> {
    left: L,
    right: R,
    input_var: Vec<String>,
}

impl<L, R> Summed<L, R> {
    pub fn new<A>(left: L, right: R) -> Self
    where
        A: MlNumber,
        L: Loss<A>,
        R: Loss<A, Input = L::Input, ModelError = L::ModelError>,
    {
        let mut input_var = left.input_var().to_vec();
        for name in right.input_var() {
            if !input_var.contains(name) {
                input_var.push(name.clone());
            }
        }
        Self {
            left,
            right,
            input_var,
        }
    }
}

impl<A, L, R> Loss<A> for Summed<L, R>
where
    A: MlNumber,
    L: Loss<A>,
    R: Loss<A, Input = L::Input, ModelError = L::ModelError>,
{
    type Input = L::Input;
    type ModelError = L::ModelError;
    type Error = LossError<L::ModelError>;

    fn estimate(&self, x: &Self::Input) -> Result<Array<A, IxDyn>, Self::Error> {
        let left = match self.left.estimate(x) {
            Ok(left) => left,
            Err(err) => return Err(err.into_loss_error()),
        };
        let right = match self.right.estimate(x) {
            Ok(right) => right,
            Err(err) => return Err(err.into_loss_error()),
        };
        if left.shape() != right.shape() {
            debug!(
                "cannot add {} to {}: shapes {:?} and {:?}",
                self.right.loss_text(),
                self.left.loss_text(),
                right.shape(),
                left.shape()
            );
            return Err(LossError::ShapeMismatch {
                left: left.shape().to_vec(),
                right: right.shape().to_vec(),
            });
        }
        Ok(left + &right)
    }

    fn input_var(&self) -> &[String] {
        &self.input_var
    }

    fn loss_text(&self) -> String {
        format!("{} + {}", self.left.loss_text(), self.right.loss_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::negative_log_likelihood::NegativeLogLikelihood;
    use crate::loss::LossExt;
    use crate::model::LogLikelihood;
    use ndarray::{array, Array1};

    /// Bernoulli over a single binary observation per sample.
    struct Bernoulli {
        prob: f64,
        var: Vec<String>,
    }

    impl Bernoulli {
        fn new(prob: f64, var: &str) -> Self {
            Self {
                prob,
                var: vec![var.to_string()],
            }
        }
    }

    impl LogLikelihood<f64> for Bernoulli {
        type Input = Array1<f64>;
        type Error = &'static str;

        fn log_likelihood(&self, x: &Array1<f64>) -> Result<Array<f64, IxDyn>, &'static str> {
            if x.iter().any(|&v| v != 0.0 && v != 1.0) {
                return Err("observations must be 0 or 1");
            }
            Ok(x.mapv(|v| v * self.prob.ln() + (1.0 - v) * (1.0 - self.prob).ln())
                .into_dyn())
        }

        fn input_var(&self) -> &[String] {
            &self.var
        }
    }

    /// Always yields a 0-d log-likelihood.
    struct Scalar;

    impl LogLikelihood<f64> for Scalar {
        type Input = Array1<f64>;
        type Error = &'static str;

        fn log_likelihood(&self, _x: &Array1<f64>) -> Result<Array<f64, IxDyn>, &'static str> {
            Ok(ndarray::arr0(-1.0).into_dyn())
        }
    }

    #[test]
    fn test_scale() {
        let nll = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x"));
        let x = array![1.0, 0.0];
        let plain = nll.estimate(&x).unwrap();
        let scaled = (&nll).scale(2.0);
        assert_eq!(scaled.coefficient(), 2.0);
        assert_eq!(scaled.estimate(&x).unwrap(), plain * 2.0);
    }

    #[test]
    fn test_double_negation_is_identity() {
        let nll = NegativeLogLikelihood::new(Bernoulli::new(0.3, "x"));
        let x = array![1.0, 0.0, 1.0];
        let output = (&nll).neg().neg().estimate(&x).unwrap();
        assert_eq!(output, nll.estimate(&x).unwrap());
    }

    #[test]
    fn test_scale_passes_errors_through() {
        let loss = NegativeLogLikelihood::new(Bernoulli::new(0.3, "x")).neg();
        assert_eq!(
            loss.estimate(&array![0.5]),
            Err("observations must be 0 or 1")
        );
    }

    #[test]
    fn test_add() {
        let first = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x"));
        let second = NegativeLogLikelihood::new(Bernoulli::new(0.25, "x"));
        let x = array![1.0, 0.0];
        let expected = first.estimate(&x).unwrap() + second.estimate(&x).unwrap();
        let total = (&first).add(&second).estimate(&x).unwrap();
        assert_eq!(total.shape(), &[2]);
        for (got, want) in total.iter().zip(expected.iter()) {
            approx::assert_abs_diff_eq!(*got, *want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_add_shape_mismatch() {
        let batched = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x"));
        let scalar = NegativeLogLikelihood::new(Scalar);
        let err = batched.add(scalar).estimate(&array![1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            LossError::ShapeMismatch {
                left: vec![2],
                right: vec![],
            }
        );
    }

    #[test]
    fn test_add_wraps_model_error() {
        let first = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x"));
        let second = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x"));
        assert_eq!(
            first.add(second).estimate(&array![2.0]),
            Err(LossError::Model("observations must be 0 or 1"))
        );
    }

    #[test]
    fn test_chained_add_keeps_error_flat() {
        let first = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x"));
        let second = NegativeLogLikelihood::new(Bernoulli::new(0.25, "x"));
        let third = NegativeLogLikelihood::new(Bernoulli::new(0.75, "x"));
        let x = array![1.0, 0.0];
        let expected = first.estimate(&x).unwrap()
            + second.estimate(&x).unwrap()
            + third.estimate(&x).unwrap();

        let total = (&first).add(&second).add(&third);
        let output = total.estimate(&x).unwrap();
        for (got, want) in output.iter().zip(expected.iter()) {
            approx::assert_abs_diff_eq!(*got, *want, epsilon = 1e-12);
        }
        assert_eq!(
            total.estimate(&array![3.0]),
            Err(LossError::Model("observations must be 0 or 1"))
        );
    }

    #[test]
    fn test_add_reduced_losses_keeps_error_flat() {
        let first = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x")).mean();
        let second = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x")).mean();
        let total = first.add(second).add(NegativeLogLikelihood::new(Scalar).neg());
        assert_eq!(
            total.estimate(&array![0.5]),
            Err(LossError::Model("observations must be 0 or 1"))
        );
        let output = total.estimate(&array![1.0, 0.0]).unwrap();
        approx::assert_abs_diff_eq!(output.sum(), 2.0 * 2.0f64.ln() - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_add_merges_input_var() {
        let first = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x"));
        let second = NegativeLogLikelihood::new(Bernoulli::new(0.5, "z"));
        let third = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x"));
        let fourth = NegativeLogLikelihood::new(Bernoulli::new(0.5, "y"));
        let total = first.add(second).add(third.add(fourth));
        assert_eq!(
            Loss::<f64>::input_var(&total),
            ["x".to_string(), "z".to_string(), "y".to_string()]
        );
    }

    #[test]
    fn test_loss_text() {
        let nll = NegativeLogLikelihood::new(Bernoulli::new(0.5, "x"));
        assert_eq!(Loss::<f64>::loss_text(&(&nll).scale(0.5)), "0.5 * (-log p(x))");
        assert_eq!(
            Loss::<f64>::loss_text(&(&nll).add(&nll)),
            "-log p(x) + -log p(x)"
        );
    }
}
