use super::featuremap::FeatureMap;
use super::types::Keypoint;
use pose_base::Vec2;

/// Normalized center of heatmap cell `(row, col)`.
pub fn cell_center(row: usize, col: usize, height: usize, width: usize) -> Vec2<f32> {
    Vec2::new(
        (col as f32 + 0.5) / width as f32,
        (row as f32 + 0.5) / height as f32,
    )
}

/// Single-person decode: the global maximum of each of the first `part_count`
/// channels, first occurrence in row-major order on ties.
///
/// Always yields exactly `part_count` keypoints; thresholding happens later.
pub fn decode_single(heatmaps: &FeatureMap<'_>, part_count: usize) -> Vec<Option<Keypoint>> {
    let (height, width) = (heatmaps.height(), heatmaps.width());
    (0..part_count.min(heatmaps.channel_count()))
        .map(|channel| {
            let mut best = (0, 0, heatmaps.get(0, 0, channel));
            for row in 0..height {
                for col in 0..width {
                    let value = heatmaps.get(row, col, channel);
                    if value > best.2 {
                        best = (row, col, value);
                    }
                }
            }
            let (row, col, score) = best;
            Some(Keypoint {
                position: cell_center(row, col, height, width),
                score,
            })
        })
        .collect()
}
