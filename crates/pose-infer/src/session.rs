use crate::InferError;
use pose_base::Tensor;
use std::collections::HashMap;

/// A loaded model. `run` takes `&mut self`, so one session serves one inference at a time.
pub trait Session {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
