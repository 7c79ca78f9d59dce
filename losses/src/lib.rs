pub mod error;
pub mod loss;
pub mod model;
pub mod shared;

pub use error::{IntoLossError, LossError};
pub use loss::combinators::{Scaled, Summed};
pub use loss::negative_log_likelihood::{
    NegativeLogLikelihood, NegativeLogLikelihoodBuilder, NegativeLogLikelihoodBuilderError,
};
pub use loss::reduction::{Reduced, Reduction};
pub use loss::{Loss, LossExt};
pub use model::LogLikelihood;
pub use shared::MlNumber;
