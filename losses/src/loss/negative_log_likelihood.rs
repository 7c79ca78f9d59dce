use derive_builder::Builder;
use log::trace;
use ndarray::{Array, IxDyn};

use crate::model::LogLikelihood;
use crate::shared::MlNumber;

use super::Loss;

/// Negative log-likelihood of a probabilistic model: `-log p(x)`.
///
/// The loss is a pass-through over [`LogLikelihood::log_likelihood`]. It
/// performs no validation; whatever the model returns, including its
/// errors, comes back unchanged apart from the sign of the values.
///
/// The model may be owned or borrowed (`NegativeLogLikelihood<&M>`).
#[derive(Debug, Clone, Builder)]
#[builder(pattern = "owned")]
pub struct NegativeLogLikelihood<M> {
    model: M,
    /// Overrides the model's input variables when non-empty.
    #[builder(default, setter(into))]
    input_var: Vec<String>,
}

impl<M> NegativeLogLikelihood<M> {
    pub fn new(model: M) -> Self {
        Self::with_input_var(model, Vec::new())
    }

    pub fn with_input_var(model: M, input_var: impl Into<Vec<String>>) -> Self {
        Self {
            model,
            input_var: input_var.into(),
        }
    }

    pub fn builder() -> NegativeLogLikelihoodBuilder<M> {
        NegativeLogLikelihoodBuilder::default()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }
}

impl<A: MlNumber, M: LogLikelihood<A>> Loss<A> for NegativeLogLikelihood<M> {
    type Input = M::Input;
    type ModelError = M::Error;
    type Error = M::Error;

    fn estimate(&self, x: &Self::Input) -> Result<Array<A, IxDyn>, Self::Error> {
        let log_likelihood = self.model.log_likelihood(x)?;
        trace!(
            "-log {} evaluated over shape {:?}",
            self.model.prob_text(),
            log_likelihood.shape()
        );
        Ok(-log_likelihood)
    }

    fn input_var(&self) -> &[String] {
        if self.input_var.is_empty() {
            self.model.input_var()
        } else {
            &self.input_var
        }
    }

    fn loss_text(&self) -> String {
        format!("-log {}", self.model.prob_text())
    }
}
