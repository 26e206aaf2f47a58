use crate::{Backend, InferError, ModelSource, Session};
use log::{debug, warn};
use pose_base::Tensor;
use std::collections::HashMap;

use super::affinity::match_parts;
use super::assemble::{MergeConflictPolicy, assemble};
use super::error::PoseEstimationError;
use super::featuremap::FeatureMap;
use super::heatmap::decode_single;
use super::options::{HumanType, InputSpec, PostprocessOptions, PreprocessOptions};
use super::peaks::{DEFAULT_PEAK_FLOOR, extract_peaks};
use super::postprocess::postprocess;
use super::preprocess::preprocess;
use super::skeleton::{CPM_SKELETON, OPENPOSE_SKELETON, Skeleton};
use super::types::PoseEstimationOutput;

/// One frame plus the options that govern how it is cropped and decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseEstimationInput {
    /// 8-bit `[H, W, 3]` RGB or `[H, W, 4]` RGBA frame.
    pub frame: Tensor<u8>,
    pub preprocess: PreprocessOptions,
    pub postprocess: PostprocessOptions,
}

impl PoseEstimationInput {
    pub fn new(frame: Tensor<u8>) -> Self {
        Self {
            frame,
            preprocess: PreprocessOptions::default(),
            postprocess: PostprocessOptions::default(),
        }
    }

    pub fn with_preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess = options;
        self
    }

    pub fn with_postprocess(mut self, options: PostprocessOptions) -> Self {
        self.postprocess = options;
        self
    }
}

/// A pose model behind an inference session.
///
/// `inference` takes `&mut self`, so one estimator runs one frame at a time.
/// Callers that cannot keep up should drop frames rather than queue them.
pub trait PoseEstimator {
    fn inference(
        &mut self,
        input: &PoseEstimationInput,
    ) -> Result<PoseEstimationOutput, PoseEstimationError>;

    /// Part order and lines of every `Human` this estimator returns.
    fn skeleton(&self) -> &'static Skeleton;
}

/// Preprocess the frame, run the session and return its outputs in
/// `output_names` order.
fn run_model(
    session: &mut dyn Session,
    spec: &InputSpec,
    input: &PoseEstimationInput,
) -> Result<Vec<Tensor<f32>>, PoseEstimationError> {
    let (tensor, geometry) = preprocess(&input.frame, &input.preprocess, spec).map_err(|err| {
        warn!("pose input construction failed: {err}");
        PoseEstimationError::InputConstructionFailed(err)
    })?;
    debug!(
        "pose input {:?} from crop {:?}",
        tensor.shape,
        geometry.crop_rect()
    );

    infer_outputs(session, tensor).map_err(|err| {
        warn!("pose inference failed: {err}");
        PoseEstimationError::EngineInferenceFailed(err)
    })
}

fn infer_outputs(
    session: &mut dyn Session,
    tensor: Tensor<f32>,
) -> Result<Vec<Tensor<f32>>, InferError> {
    let input_name = session
        .input_names()
        .first()
        .ok_or_else(|| InferError::Backend("model has no inputs".to_string()))?
        .clone();
    let mut outputs: HashMap<String, Tensor<f32>> = session.run(&[(input_name.as_str(), tensor)])?;
    let ordered: Vec<Tensor<f32>> = session
        .output_names()
        .iter()
        .filter_map(|name| outputs.remove(name))
        .collect();
    if ordered.is_empty() {
        return Err(InferError::Backend("model produced no outputs".to_string()));
    }
    Ok(ordered)
}

fn channel_count(tensor: &Tensor<f32>) -> usize {
    tensor.shape.last().copied().unwrap_or(0)
}

fn engine_error(err: InferError) -> PoseEstimationError {
    warn!("pose model output rejected: {err}");
    PoseEstimationError::EngineInferenceFailed(err)
}

/// Heatmap-only estimator for convolutional pose machine style models.
///
/// Always decodes a single person; a multi-person request is served by the
/// single-person path.
pub struct HeatmapPoseEstimator {
    session: Box<dyn Session>,
    skeleton: &'static Skeleton,
    input_spec: InputSpec,
}

impl HeatmapPoseEstimator {
    /// Load `model` through `backend` with the CPM skeleton and input spec.
    pub fn new(model: ModelSource, backend: &dyn Backend) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;
        Ok(Self::from_session(session))
    }

    /// Wrap an already loaded session.
    pub fn from_session(session: Box<dyn Session>) -> Self {
        Self {
            session,
            skeleton: &CPM_SKELETON,
            input_spec: InputSpec::CPM,
        }
    }

    pub fn with_input_spec(mut self, spec: InputSpec) -> Self {
        self.input_spec = spec;
        self
    }

    /// Decode with another heatmap skeleton (affinity edges are ignored).
    pub fn with_skeleton(mut self, skeleton: &'static Skeleton) -> Self {
        self.skeleton = skeleton;
        self
    }

    pub fn input_spec(&self) -> &InputSpec {
        &self.input_spec
    }
}

impl PoseEstimator for HeatmapPoseEstimator {
    fn inference(
        &mut self,
        input: &PoseEstimationInput,
    ) -> Result<PoseEstimationOutput, PoseEstimationError> {
        let outputs = run_model(self.session.as_mut(), &self.input_spec, input)?;
        let part_count = self.skeleton.part_count();
        let heatmap = outputs
            .iter()
            .find(|tensor| channel_count(tensor) >= part_count)
            .ok_or_else(|| {
                engine_error(InferError::ShapeMismatch {
                    expected: format!("[1, H, W, >={part_count}]"),
                    got: format!("{:?}", outputs[0].shape),
                })
            })?;
        let heatmaps = FeatureMap::from_tensor(heatmap).map_err(engine_error)?;

        if let HumanType::MultiPerson(_) = input.postprocess.human_type {
            debug!("heatmap model has no affinity fields, decoding a single person");
        }
        let keypoints = decode_single(&heatmaps, part_count);
        debug!(
            "decoded single person from {}x{} heatmap",
            heatmaps.width(),
            heatmaps.height()
        );
        Ok(postprocess(self.skeleton, vec![keypoints], &input.postprocess))
    }

    fn skeleton(&self) -> &'static Skeleton {
        self.skeleton
    }
}

/// Estimator for models emitting part heatmaps and part affinity fields.
///
/// Accepts either one combined output (heatmap channels followed by the field
/// channels) or separate heatmap and field outputs, told apart by channel count.
pub struct OpenPoseEstimator {
    session: Box<dyn Session>,
    skeleton: &'static Skeleton,
    input_spec: InputSpec,
    peak_floor: f32,
    merge_policy: MergeConflictPolicy,
}

impl OpenPoseEstimator {
    pub fn new(model: ModelSource, backend: &dyn Backend) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;
        Ok(Self::from_session(session))
    }

    pub fn from_session(session: Box<dyn Session>) -> Self {
        Self {
            session,
            skeleton: &OPENPOSE_SKELETON,
            input_spec: InputSpec::OPENPOSE,
            peak_floor: DEFAULT_PEAK_FLOOR,
            merge_policy: MergeConflictPolicy::default(),
        }
    }

    pub fn with_input_spec(mut self, spec: InputSpec) -> Self {
        self.input_spec = spec;
        self
    }

    /// Minimum activation a multi-person peak must exceed.
    ///
    /// A non-finite floor is ignored and the current one kept.
    pub fn with_peak_floor(mut self, floor: f32) -> Self {
        if floor.is_finite() {
            self.peak_floor = floor;
        } else {
            warn!("ignoring non-finite peak floor {floor}, keeping {}", self.peak_floor);
        }
        self
    }

    pub fn with_merge_conflict_policy(mut self, policy: MergeConflictPolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    pub fn input_spec(&self) -> &InputSpec {
        &self.input_spec
    }

    pub fn peak_floor(&self) -> f32 {
        self.peak_floor
    }

    pub fn merge_conflict_policy(&self) -> MergeConflictPolicy {
        self.merge_policy
    }

    /// Locate the heatmap and field channels among the model outputs.
    fn split_outputs<'a>(
        &self,
        outputs: &'a [Tensor<f32>],
    ) -> Result<(FeatureMap<'a>, FeatureMap<'a>), InferError> {
        let part_count = self.skeleton.part_count();
        let field_count = self.skeleton.field_channel_count();
        let shapes = || {
            outputs
                .iter()
                .map(|tensor| format!("{:?}", tensor.shape))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let (heatmaps, fields) = if let [combined] = outputs {
            let map = FeatureMap::from_tensor(combined)?;
            let total = map.channel_count();
            if total < part_count + field_count {
                return Err(InferError::ShapeMismatch {
                    expected: format!("[1, H, W, >={}]", part_count + field_count),
                    got: shapes(),
                });
            }
            let heat_count = total - field_count;
            match (map.channels(0, heat_count), map.channels(heat_count, field_count)) {
                (Some(heatmaps), Some(fields)) => (heatmaps, fields),
                _ => {
                    return Err(InferError::ShapeMismatch {
                        expected: format!("[1, H, W, >={}]", part_count + field_count),
                        got: shapes(),
                    });
                }
            }
        } else {
            let fields_index = outputs
                .iter()
                .position(|tensor| channel_count(tensor) == field_count);
            let heat_index = outputs.iter().enumerate().position(|(index, tensor)| {
                Some(index) != fields_index && channel_count(tensor) >= part_count
            });
            match (heat_index, fields_index) {
                (Some(heat), Some(field)) => (
                    FeatureMap::from_tensor(&outputs[heat])?,
                    FeatureMap::from_tensor(&outputs[field])?,
                ),
                _ => {
                    return Err(InferError::ShapeMismatch {
                        expected: format!(
                            "heatmaps [1, H, W, >={part_count}] and fields [1, H, W, {field_count}]"
                        ),
                        got: shapes(),
                    });
                }
            }
        };

        if heatmaps.height() != fields.height() || heatmaps.width() != fields.width() {
            return Err(InferError::ShapeMismatch {
                expected: format!("fields of {}x{}", heatmaps.width(), heatmaps.height()),
                got: shapes(),
            });
        }
        Ok((heatmaps, fields))
    }
}

impl PoseEstimator for OpenPoseEstimator {
    fn inference(
        &mut self,
        input: &PoseEstimationInput,
    ) -> Result<PoseEstimationOutput, PoseEstimationError> {
        let outputs = run_model(self.session.as_mut(), &self.input_spec, input)?;
        let (heatmaps, fields) = self.split_outputs(&outputs).map_err(engine_error)?;
        let part_count = self.skeleton.part_count();

        let people = match input.postprocess.human_type {
            HumanType::SinglePerson => vec![decode_single(&heatmaps, part_count)],
            HumanType::MultiPerson(options) => {
                let peaks = extract_peaks(
                    &heatmaps,
                    part_count,
                    options.nms_filter_size,
                    self.peak_floor,
                );
                let connections =
                    match_parts(&fields, self.skeleton, &peaks, options.pair_threshold);
                let people = assemble(
                    &peaks,
                    &connections,
                    self.merge_policy,
                    options.max_human_number,
                );
                debug!(
                    "multi-person decode: {} peaks, {} connections, {} people",
                    peaks.iter().map(Vec::len).sum::<usize>(),
                    connections.len(),
                    people.len()
                );
                people
            }
        };
        Ok(postprocess(self.skeleton, people, &input.postprocess))
    }

    fn skeleton(&self) -> &'static Skeleton {
        self.skeleton
    }
}
