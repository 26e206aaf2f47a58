use crate::InferError;
use pose_base::TensorError;
use std::fmt;

/// Crop/scale geometry that cannot be mapped without producing NaN or infinite coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    EmptyFrame { width: usize, height: usize },
    EmptyModelInput { width: usize, height: usize },
    DegenerateTarget,
    TargetOutsideFrame,
    EmptyOverlay,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::EmptyFrame { width, height } => {
                write!(f, "frame has zero area ({width}x{height})")
            }
            GeometryError::EmptyModelInput { width, height } => {
                write!(f, "model input has zero area ({width}x{height})")
            }
            GeometryError::DegenerateTarget => write!(f, "target rectangle has zero area"),
            GeometryError::TargetOutsideFrame => {
                write!(f, "target rectangle does not overlap the frame")
            }
            GeometryError::EmptyOverlay => write!(f, "overlay has zero area"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// The frame could not be turned into the tensor the engine expects.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    Geometry(GeometryError),
    UnsupportedFormat { channels: usize },
    Shape(String),
    Tensor(TensorError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Geometry(err) => write!(f, "invalid geometry: {err}"),
            InputError::UnsupportedFormat { channels } => {
                write!(f, "unsupported pixel format with {channels} channels")
            }
            InputError::Shape(msg) => write!(f, "invalid frame shape: {msg}"),
            InputError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Geometry(err) => Some(err),
            InputError::Tensor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeometryError> for InputError {
    fn from(err: GeometryError) -> Self {
        InputError::Geometry(err)
    }
}

impl From<TensorError> for InputError {
    fn from(err: TensorError) -> Self {
        InputError::Tensor(err)
    }
}

/// Why a frame produced no output. Both kinds are terminal for that frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PoseEstimationError {
    InputConstructionFailed(InputError),
    EngineInferenceFailed(InferError),
}

impl fmt::Display for PoseEstimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoseEstimationError::InputConstructionFailed(err) => {
                write!(f, "failed to create input data: {err}")
            }
            PoseEstimationError::EngineInferenceFailed(err) => {
                write!(f, "failed to run inference: {err}")
            }
        }
    }
}

impl std::error::Error for PoseEstimationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoseEstimationError::InputConstructionFailed(err) => Some(err),
            PoseEstimationError::EngineInferenceFailed(err) => Some(err),
        }
    }
}

impl From<InputError> for PoseEstimationError {
    fn from(err: InputError) -> Self {
        PoseEstimationError::InputConstructionFailed(err)
    }
}

impl From<InferError> for PoseEstimationError {
    fn from(err: InferError) -> Self {
        PoseEstimationError::EngineInferenceFailed(err)
    }
}
