use serde::{Deserialize, Serialize};
use std::fmt;

/// Every anatomical part a supported model can emit.
///
/// A model only uses a subset; the order of that subset is given by its [`Skeleton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Top,
    Nose,
    Neck,
    RightShoulder,
    RightElbow,
    RightWrist,
    LeftShoulder,
    LeftElbow,
    LeftWrist,
    RightHip,
    RightKnee,
    RightAnkle,
    LeftHip,
    LeftKnee,
    LeftAnkle,
    RightEye,
    LeftEye,
    RightEar,
    LeftEar,
}

impl BodyPart {
    pub fn name(self) -> &'static str {
        match self {
            BodyPart::Top => "top",
            BodyPart::Nose => "nose",
            BodyPart::Neck => "neck",
            BodyPart::RightShoulder => "right shoulder",
            BodyPart::RightElbow => "right elbow",
            BodyPart::RightWrist => "right wrist",
            BodyPart::LeftShoulder => "left shoulder",
            BodyPart::LeftElbow => "left elbow",
            BodyPart::LeftWrist => "left wrist",
            BodyPart::RightHip => "right hip",
            BodyPart::RightKnee => "right knee",
            BodyPart::RightAnkle => "right ankle",
            BodyPart::LeftHip => "left hip",
            BodyPart::LeftKnee => "left knee",
            BodyPart::LeftAnkle => "left ankle",
            BodyPart::RightEye => "right eye",
            BodyPart::LeftEye => "left eye",
            BodyPart::RightEar => "right ear",
            BodyPart::LeftEar => "left ear",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A limb scored by an affinity field: the field's x and y components live in
/// channels `field_x` and `field_y` of the field tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffinityEdge {
    pub from: BodyPart,
    pub to: BodyPart,
    pub field_x: usize,
    pub field_y: usize,
}

/// Static description of one model family's output.
///
/// `parts` order is the heatmap channel order and the index of every keypoint
/// array produced for this skeleton.
#[derive(Debug, PartialEq, Eq)]
pub struct Skeleton {
    pub name: &'static str,
    pub parts: &'static [BodyPart],
    pub lines: &'static [(BodyPart, BodyPart)],
    pub affinity_edges: &'static [AffinityEdge],
}

impl Skeleton {
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn index_of(&self, part: BodyPart) -> Option<usize> {
        self.parts.iter().position(|&p| p == part)
    }

    /// Number of channels the affinity field tensor must carry.
    pub fn field_channel_count(&self) -> usize {
        self.affinity_edges
            .iter()
            .map(|edge| edge.field_x.max(edge.field_y) + 1)
            .max()
            .unwrap_or(0)
    }

    /// Skeleton lines as index pairs into `parts`, skipping lines naming parts
    /// this skeleton lacks.
    pub fn line_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.lines
            .iter()
            .filter_map(|&(from, to)| Some((self.index_of(from)?, self.index_of(to)?)))
    }
}

/// Convolutional pose machine layout, 14 parts.
pub static CPM_SKELETON: Skeleton = Skeleton {
    name: "cpm",
    parts: &[
        BodyPart::Top,
        BodyPart::Neck,
        BodyPart::RightShoulder,
        BodyPart::RightElbow,
        BodyPart::RightWrist,
        BodyPart::LeftShoulder,
        BodyPart::LeftElbow,
        BodyPart::LeftWrist,
        BodyPart::RightHip,
        BodyPart::RightKnee,
        BodyPart::RightAnkle,
        BodyPart::LeftHip,
        BodyPart::LeftKnee,
        BodyPart::LeftAnkle,
    ],
    lines: &[
        (BodyPart::Top, BodyPart::Neck),
        (BodyPart::Neck, BodyPart::RightShoulder),
        (BodyPart::Neck, BodyPart::LeftShoulder),
        (BodyPart::LeftWrist, BodyPart::LeftElbow),
        (BodyPart::LeftElbow, BodyPart::LeftShoulder),
        (BodyPart::LeftShoulder, BodyPart::RightShoulder),
        (BodyPart::RightShoulder, BodyPart::RightElbow),
        (BodyPart::RightElbow, BodyPart::RightWrist),
        (BodyPart::LeftShoulder, BodyPart::LeftHip),
        (BodyPart::LeftHip, BodyPart::RightHip),
        (BodyPart::RightHip, BodyPart::RightShoulder),
        (BodyPart::LeftHip, BodyPart::LeftKnee),
        (BodyPart::LeftKnee, BodyPart::LeftAnkle),
        (BodyPart::RightHip, BodyPart::RightKnee),
        (BodyPart::RightKnee, BodyPart::RightAnkle),
    ],
    affinity_edges: &[],
};

const fn edge(from: BodyPart, to: BodyPart, field_x: usize, field_y: usize) -> AffinityEdge {
    AffinityEdge {
        from,
        to,
        field_x,
        field_y,
    }
}

/// COCO layout with 18 parts and 19 affinity edges (38 field channels).
/// The heatmap tensor may carry a trailing background channel, which is ignored.
pub static OPENPOSE_SKELETON: Skeleton = Skeleton {
    name: "openpose",
    parts: &[
        BodyPart::Nose,
        BodyPart::Neck,
        BodyPart::RightShoulder,
        BodyPart::RightElbow,
        BodyPart::RightWrist,
        BodyPart::LeftShoulder,
        BodyPart::LeftElbow,
        BodyPart::LeftWrist,
        BodyPart::RightHip,
        BodyPart::RightKnee,
        BodyPart::RightAnkle,
        BodyPart::LeftHip,
        BodyPart::LeftKnee,
        BodyPart::LeftAnkle,
        BodyPart::RightEye,
        BodyPart::LeftEye,
        BodyPart::RightEar,
        BodyPart::LeftEar,
    ],
    // the two ear-shoulder edges are matched but not drawn
    lines: &[
        (BodyPart::Neck, BodyPart::RightShoulder),
        (BodyPart::Neck, BodyPart::LeftShoulder),
        (BodyPart::RightShoulder, BodyPart::RightElbow),
        (BodyPart::RightElbow, BodyPart::RightWrist),
        (BodyPart::LeftShoulder, BodyPart::LeftElbow),
        (BodyPart::LeftElbow, BodyPart::LeftWrist),
        (BodyPart::Neck, BodyPart::RightHip),
        (BodyPart::RightHip, BodyPart::RightKnee),
        (BodyPart::RightKnee, BodyPart::RightAnkle),
        (BodyPart::Neck, BodyPart::LeftHip),
        (BodyPart::LeftHip, BodyPart::LeftKnee),
        (BodyPart::LeftKnee, BodyPart::LeftAnkle),
        (BodyPart::Neck, BodyPart::Nose),
        (BodyPart::Nose, BodyPart::RightEye),
        (BodyPart::RightEye, BodyPart::RightEar),
        (BodyPart::Nose, BodyPart::LeftEye),
        (BodyPart::LeftEye, BodyPart::LeftEar),
    ],
    affinity_edges: &[
        edge(BodyPart::Neck, BodyPart::RightShoulder, 12, 13),
        edge(BodyPart::Neck, BodyPart::LeftShoulder, 20, 21),
        edge(BodyPart::RightShoulder, BodyPart::RightElbow, 14, 15),
        edge(BodyPart::RightElbow, BodyPart::RightWrist, 16, 17),
        edge(BodyPart::LeftShoulder, BodyPart::LeftElbow, 22, 23),
        edge(BodyPart::LeftElbow, BodyPart::LeftWrist, 24, 25),
        edge(BodyPart::Neck, BodyPart::RightHip, 0, 1),
        edge(BodyPart::RightHip, BodyPart::RightKnee, 2, 3),
        edge(BodyPart::RightKnee, BodyPart::RightAnkle, 4, 5),
        edge(BodyPart::Neck, BodyPart::LeftHip, 6, 7),
        edge(BodyPart::LeftHip, BodyPart::LeftKnee, 8, 9),
        edge(BodyPart::LeftKnee, BodyPart::LeftAnkle, 10, 11),
        edge(BodyPart::Neck, BodyPart::Nose, 28, 29),
        edge(BodyPart::Nose, BodyPart::RightEye, 30, 31),
        edge(BodyPart::RightEye, BodyPart::RightEar, 34, 35),
        edge(BodyPart::Nose, BodyPart::LeftEye, 32, 33),
        edge(BodyPart::LeftEye, BodyPart::LeftEar, 36, 37),
        edge(BodyPart::RightShoulder, BodyPart::RightEar, 18, 19),
        edge(BodyPart::LeftShoulder, BodyPart::LeftEar, 26, 27),
    ],
};
