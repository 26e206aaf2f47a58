pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod pose;
pub mod session;

pub use backend::Backend;
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use session::Session;

#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;

pub use pose::{
    BodyPart, CPM_SKELETON, CropArea, GeometryError, GeometryMapper, HeatmapPoseEstimator, Human,
    HumanType, InputError, InputSpec, Keypoint, Line, MergeConflictPolicy, MultiPersonOptions,
    OPENPOSE_SKELETON, OpenPoseEstimator, PoseEstimationError, PoseEstimationInput,
    PoseEstimationOutput, PoseEstimator, PostprocessOptions, PreprocessOptions, Skeleton,
    TensorLayout,
};
