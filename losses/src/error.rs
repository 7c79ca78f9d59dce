use thiserror::Error;

/// Failures raised by losses that post-process another loss's output.
///
/// Errors coming from the wrapped model are carried in `Model` untouched.
#[derive(Debug, Error, PartialEq)]
pub enum LossError<E> {
    #[error(transparent)]
    Model(E),

    #[error("cannot take the mean of an empty batch")]
    EmptyBatch,

    #[error("loss shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },
}

/// Lifts an operand's error into `LossError<E>` without nesting.
pub trait IntoLossError<E> {
    fn into_loss_error(self) -> LossError<E>;
}

impl<E> IntoLossError<E> for E {
    fn into_loss_error(self) -> LossError<E> {
        LossError::Model(self)
    }
}

impl<E> IntoLossError<E> for LossError<E> {
    fn into_loss_error(self) -> LossError<E> {
        self
    }
}
