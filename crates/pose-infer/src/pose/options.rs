use super::skeleton::BodyPart;
use pose_base::Rect;
use serde::{Deserialize, Serialize};

/// Which part of the frame feeds the model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropArea {
    /// The whole frame, center-cropped to the model aspect ratio.
    #[default]
    Full,
    /// An overlay rectangle in frame pixels, center-cropped to the model aspect ratio.
    AspectFill(Rect<f32>),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    pub crop_area: CropArea,
}

/// Knobs of the multi-person path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiPersonOptions {
    /// Minimum affinity cost for a candidate pair. `None` keeps every pair.
    pub pair_threshold: Option<f32>,
    /// Half-width `k` of the `(2k+1)x(2k+1)` suppression window.
    pub nms_filter_size: usize,
    /// Maximum number of people returned. `None` returns everyone.
    pub max_human_number: Option<usize>,
}

impl Default for MultiPersonOptions {
    fn default() -> Self {
        Self {
            pair_threshold: Some(3.4),
            nms_filter_size: 3,
            max_human_number: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanType {
    #[default]
    SinglePerson,
    MultiPerson(MultiPersonOptions),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostprocessOptions {
    /// Keypoints scoring below this are dropped. `None` keeps every keypoint.
    pub part_threshold: Option<f32>,
    /// Restrict the output to one part of every human, without lines.
    pub body_part: Option<BodyPart>,
    pub human_type: HumanType,
}

impl Default for PostprocessOptions {
    fn default() -> Self {
        Self {
            part_threshold: Some(0.1),
            body_part: None,
            human_type: HumanType::SinglePerson,
        }
    }
}

impl PostprocessOptions {
    pub fn single_person() -> Self {
        Self::default()
    }

    pub fn multi_person(options: MultiPersonOptions) -> Self {
        Self {
            human_type: HumanType::MultiPerson(options),
            ..Self::default()
        }
    }

    pub fn with_part_threshold(mut self, threshold: Option<f32>) -> Self {
        self.part_threshold = threshold;
        self
    }

    pub fn with_body_part(mut self, part: Option<BodyPart>) -> Self {
        self.body_part = part;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensorLayout {
    Nhwc,
    Nchw,
}

/// Fixed input geometry and pixel encoding of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    pub width: usize,
    pub height: usize,
    pub layout: TensorLayout,
    /// Feed a single luma channel instead of RGB.
    pub grayscale: bool,
    /// Scale pixel values from [0, 255] to [0, 1].
    pub normalize: bool,
}

impl InputSpec {
    pub const CPM: InputSpec = InputSpec {
        width: 192,
        height: 192,
        layout: TensorLayout::Nhwc,
        grayscale: false,
        normalize: false,
    };

    pub const OPENPOSE: InputSpec = InputSpec {
        width: 368,
        height: 368,
        layout: TensorLayout::Nhwc,
        grayscale: false,
        normalize: false,
    };

    pub fn channels(&self) -> usize {
        if self.grayscale { 1 } else { 3 }
    }
}
