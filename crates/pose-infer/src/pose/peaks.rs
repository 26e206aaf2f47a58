use super::featuremap::FeatureMap;
use super::heatmap::cell_center;
use pose_base::Vec2;

/// Activation floor a multi-person candidate must exceed.
pub const DEFAULT_PEAK_FLOOR: f32 = 0.1;

/// A local maximum of one part's heatmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Index into the skeleton parts.
    pub part: usize,
    pub row: usize,
    pub col: usize,
    /// Normalized cell center.
    pub position: Vec2<f32>,
    pub score: f32,
}

/// Candidate peaks for every part, indexed `[part][candidate]` with
/// candidates in row-major order.
///
/// A cell qualifies when it exceeds `floor` and is strictly greater than every
/// other in-bounds cell of the `(2k+1)x(2k+1)` window around it, `k` being
/// `nms_filter_size`. Plateaus therefore produce no peak. `floor` must be
/// finite; `OpenPoseEstimator::with_peak_floor` refuses anything else.
pub fn extract_peaks(
    heatmaps: &FeatureMap<'_>,
    part_count: usize,
    nms_filter_size: usize,
    floor: f32,
) -> Vec<Vec<Peak>> {
    let (height, width) = (heatmaps.height(), heatmaps.width());
    let k = nms_filter_size;
    (0..part_count.min(heatmaps.channel_count()))
        .map(|part| {
            let mut peaks = Vec::new();
            for row in 0..height {
                for col in 0..width {
                    let score = heatmaps.get(row, col, part);
                    if score.is_nan() || score <= floor {
                        continue;
                    }
                    let mut rows = row.saturating_sub(k)..=row.saturating_add(k).min(height - 1);
                    let dominates = rows.all(|r| {
                        (col.saturating_sub(k)..=col.saturating_add(k).min(width - 1)).all(|c| {
                            let other = heatmaps.get(r, c, part);
                            (r == row && c == col) || other < score || other.is_nan()
                        })
                    });
                    if dominates {
                        peaks.push(Peak {
                            part,
                            row,
                            col,
                            position: cell_center(row, col, height, width),
                            score,
                        });
                    }
                }
            }
            peaks
        })
        .collect()
}
