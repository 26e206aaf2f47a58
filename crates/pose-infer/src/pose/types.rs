use super::skeleton::{BodyPart, Skeleton};
use pose_base::Vec2;

/// A decoded part location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    /// Normalized position in the model input, (0,0) top-left to (1,1) bottom-right.
    pub position: Vec2<f32>,
    /// Raw heatmap activation, not rescaled to a probability.
    pub score: f32,
}

/// A skeleton line realized for one person.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Keypoint,
    pub to: Keypoint,
}

/// One decoded person.
#[derive(Debug, Clone, PartialEq)]
pub struct Human {
    skeleton: &'static Skeleton,
    /// One slot per skeleton part, in skeleton order. `None` means the part was
    /// not found or was filtered out.
    pub keypoints: Vec<Option<Keypoint>>,
    /// Lines whose two endpoints are both present.
    pub lines: Vec<Line>,
}

impl Human {
    /// Build a human from per-part keypoints, deriving its lines.
    pub fn new(skeleton: &'static Skeleton, keypoints: Vec<Option<Keypoint>>) -> Self {
        let lines = skeleton
            .line_indices()
            .filter_map(|(from, to)| {
                Some(Line {
                    from: (*keypoints.get(from)?)?,
                    to: (*keypoints.get(to)?)?,
                })
            })
            .collect();
        Self {
            skeleton,
            keypoints,
            lines,
        }
    }

    /// Build a human that exposes keypoints only, with no lines.
    pub fn without_lines(skeleton: &'static Skeleton, keypoints: Vec<Option<Keypoint>>) -> Self {
        Self {
            skeleton,
            keypoints,
            lines: Vec::new(),
        }
    }

    pub fn skeleton(&self) -> &'static Skeleton {
        self.skeleton
    }

    pub fn keypoint(&self, part: BodyPart) -> Option<&Keypoint> {
        self.keypoints
            .get(self.skeleton.index_of(part)?)
            .and_then(Option::as_ref)
    }

    /// Present keypoints with their parts.
    pub fn parts(&self) -> impl Iterator<Item = (BodyPart, &Keypoint)> + '_ {
        self.skeleton
            .parts
            .iter()
            .zip(&self.keypoints)
            .filter_map(|(&part, keypoint)| Some((part, keypoint.as_ref()?)))
    }

    pub fn present_count(&self) -> usize {
        self.keypoints.iter().flatten().count()
    }

    /// Sum of the scores of present keypoints.
    pub fn total_score(&self) -> f32 {
        self.keypoints.iter().flatten().map(|kp| kp.score).sum()
    }
}

/// Result of one inference call: people in discovery order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoseEstimationOutput {
    pub humans: Vec<Human>,
}

impl PoseEstimationOutput {
    pub fn is_empty(&self) -> bool {
        self.humans.is_empty()
    }

    pub fn len(&self) -> usize {
        self.humans.len()
    }

    /// Every present keypoint of every human, for overlay drawing.
    pub fn keypoints(&self) -> impl Iterator<Item = &Keypoint> + '_ {
        self.humans
            .iter()
            .flat_map(|human| human.keypoints.iter().flatten())
    }

    /// Every line of every human, for overlay drawing.
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.humans.iter().flat_map(|human| human.lines.iter())
    }
}
