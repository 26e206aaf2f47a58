mod affinity;
mod assemble;
mod error;
mod estimator;
mod featuremap;
mod geometry;
mod heatmap;
mod options;
mod peaks;
mod postprocess;
mod preprocess;
mod skeleton;
mod types;

pub use affinity::{AFFINITY_SAMPLES, Connection, PeakRef, affinity_score, match_parts};
pub use assemble::{MergeConflictPolicy, assemble};
pub use error::{GeometryError, InputError, PoseEstimationError};
pub use estimator::{HeatmapPoseEstimator, OpenPoseEstimator, PoseEstimationInput, PoseEstimator};
pub use featuremap::FeatureMap;
pub use geometry::{GeometryMapper, aspect_fill_crop};
pub use heatmap::{cell_center, decode_single};
pub use options::{
    CropArea, HumanType, InputSpec, MultiPersonOptions, PostprocessOptions, PreprocessOptions,
    TensorLayout,
};
pub use peaks::{DEFAULT_PEAK_FLOOR, Peak, extract_peaks};
pub use postprocess::postprocess;
pub use preprocess::preprocess;
pub use skeleton::{AffinityEdge, BodyPart, CPM_SKELETON, OPENPOSE_SKELETON, Skeleton};
pub use types::{Human, Keypoint, Line, PoseEstimationOutput};
