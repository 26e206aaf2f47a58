use crate::Device;
use std::fmt;

/// Failure reported by an inference backend or session.
#[derive(Debug, Clone, PartialEq)]
pub enum InferError {
    ModelLoad(String),
    Backend(String),
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    UnsupportedDtype(String),
    UnsupportedDevice(Device),
    ShapeMismatch {
        expected: String,
        got: String,
    },
    Io(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(f, "invalid input '{name}', expected one of {expected_names:?}"),
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<pose_base::TensorError> for InferError {
    fn from(err: pose_base::TensorError) -> Self {
        InferError::Backend(format!("failed to create tensor: {err}"))
    }
}
