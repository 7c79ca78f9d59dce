use conv::errors::NoError;
use conv::ApproxFrom;
use ndarray::NdFloat;

pub trait MlNumber: NdFloat + ApproxFrom<usize, Err = NoError> {}

impl MlNumber for f32 {}
impl MlNumber for f64 {}
