use conv::errors::UnwrapOk;
use conv::ApproxFrom;
use log::debug;
use ndarray::{arr0, Array, IxDyn};

use crate::error::{IntoLossError, LossError};
use crate::shared::MlNumber;

use super::Loss;

/// How a batch of per-sample losses collapses into the value to minimize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reduction {
    /// Keep one loss per sample.
    None,
    #[default]
    Mean,
    Sum,
}

/// A loss whose output is collapsed with a [`Reduction`].
#[derive(Debug, Clone)]
pub struct Reduced<L> {
    inner: L,
    reduction: Reduction,
}

impl<L> Reduced<L> {
    pub fn new(inner: L, reduction: Reduction) -> Self {
        Self { inner, reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<A: MlNumber, L: Loss<A>> Loss<A> for Reduced<L> {
    type Input = L::Input;
    type ModelError = L::ModelError;
    type Error = LossError<L::ModelError>;

    fn estimate(&self, x: &Self::Input) -> Result<Array<A, IxDyn>, Self::Error> {
        let losses = match self.inner.estimate(x) {
            Ok(losses) => losses,
            Err(err) => return Err(err.into_loss_error()),
        };
        match self.reduction {
            Reduction::None => Ok(losses),
            Reduction::Sum => Ok(arr0(losses.sum()).into_dyn()),
            Reduction::Mean => {
                if losses.is_empty() {
                    debug!("mean requested over empty output of {}", self.inner.loss_text());
                    return Err(LossError::EmptyBatch);
                }
                // Rounds to nearest for batches past the element type's exact range.
                let n = A::approx_from(losses.len()).unwrap_ok();
                Ok(arr0(losses.sum() / n).into_dyn())
            }
        }
    }

    fn input_var(&self) -> &[String] {
        self.inner.input_var()
    }

    fn loss_text(&self) -> String {
        match self.reduction {
            Reduction::None => self.inner.loss_text(),
            Reduction::Mean => format!("mean({})", self.inner.loss_text()),
            Reduction::Sum => format!("sum({})", self.inner.loss_text()),
        }
    }
}
