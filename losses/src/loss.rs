use ndarray::{Array, IxDyn};

use crate::error::IntoLossError;
use crate::shared::MlNumber;

pub mod combinators;
pub mod negative_log_likelihood;
pub mod reduction;

use combinators::{Scaled, Summed};
use reduction::{Reduced, Reduction};

pub trait Loss<A: MlNumber> {
    type Input: ?Sized;
    /// Error raised by the underlying model.
    type ModelError;
    type Error: IntoLossError<Self::ModelError>;

    fn estimate(&self, x: &Self::Input) -> Result<Array<A, IxDyn>, Self::Error>;

    fn input_var(&self) -> &[String];

    fn loss_text(&self) -> String;
}

impl<A: MlNumber, L: Loss<A> + ?Sized> Loss<A> for &L {
    type Input = L::Input;
    type ModelError = L::ModelError;
    type Error = L::Error;

    fn estimate(&self, x: &Self::Input) -> Result<Array<A, IxDyn>, Self::Error> {
        (**self).estimate(x)
    }

    fn input_var(&self) -> &[String] {
        (**self).input_var()
    }

    fn loss_text(&self) -> String {
        (**self).loss_text()
    }
}

impl<A: MlNumber, L: Loss<A> + ?Sized> Loss<A> for Box<L> {
    type Input = L::Input;
    type ModelError = L::ModelError;
    type Error = L::Error;

    fn estimate(&self, x: &Self::Input) -> Result<Array<A, IxDyn>, Self::Error> {
        (**self).estimate(x)
    }

    fn input_var(&self) -> &[String] {
        (**self).input_var()
    }

    fn loss_text(&self) -> String {
        (**self).loss_text()
    }
}

pub trait LossExt<A: MlNumber>: Loss<A> + Sized {
    fn reduce(self, reduction: Reduction) -> Reduced<Self> {
        Reduced::new(self, reduction)
    }

    fn mean(self) -> Reduced<Self> {
        self.reduce(Reduction::Mean)
    }

    fn sum(self) -> Reduced<Self> {
        self.reduce(Reduction::Sum)
    }

    fn scale(self, coefficient: A) -> Scaled<A, Self> {
        Scaled::new(self, coefficient)
    }

    fn neg(self) -> Scaled<A, Self> {
        self.scale(-A::one())
    }

    fn add<R>(self, rhs: R) -> Summed<Self, R>
    where
        R: Loss<A, Input = Self::Input, ModelError = Self::ModelError>,
    {
        Summed::new::<A>(self, rhs)
    }
}

impl<A: MlNumber, L: Loss<A>> LossExt<A> for L {}
