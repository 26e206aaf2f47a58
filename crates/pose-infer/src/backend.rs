use crate::{InferError, ModelSource, Session};

/// Loads models into runnable sessions. Device selection belongs to the backend instance.
pub trait Backend {
    fn name(&self) -> &str;
    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError>;
}
