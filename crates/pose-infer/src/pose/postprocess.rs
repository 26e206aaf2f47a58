use super::options::PostprocessOptions;
use super::skeleton::Skeleton;
use super::types::{Human, Keypoint, PoseEstimationOutput};

/// Apply the caller's filters to decoded keypoint arrays and build the output.
///
/// Keypoints scoring below `part_threshold` become `None` (a NaN score never
/// passes a threshold). With `body_part` set only that slot survives and no
/// lines are produced. People are kept even when every slot ends up empty, so
/// the person count does not depend on the filters.
pub fn postprocess(
    skeleton: &'static Skeleton,
    people: Vec<Vec<Option<Keypoint>>>,
    options: &PostprocessOptions,
) -> PoseEstimationOutput {
    let only = options.body_part.map(|part| skeleton.index_of(part));
    let humans = people
        .into_iter()
        .map(|mut keypoints| {
            keypoints.resize(skeleton.part_count(), None);
            for (index, slot) in keypoints.iter_mut().enumerate() {
                let passes = slot.is_some_and(|kp| {
                    options
                        .part_threshold
                        .is_none_or(|threshold| kp.score >= threshold)
                });
                let selected = only.is_none_or(|part| part == Some(index));
                if !passes || !selected {
                    *slot = None;
                }
            }
            if only.is_some() {
                Human::without_lines(skeleton, keypoints)
            } else {
                Human::new(skeleton, keypoints)
            }
        })
        .collect();
    PoseEstimationOutput { humans }
}
