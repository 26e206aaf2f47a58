use super::featuremap::FeatureMap;
use super::peaks::Peak;
use super::skeleton::Skeleton;
use pose_base::Vec2;

/// Samples taken along a candidate limb, endpoints included.
pub const AFFINITY_SAMPLES: usize = 10;

/// A peak addressed as `[part][index]` in the output of `extract_peaks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeakRef {
    pub part: usize,
    pub index: usize,
}

/// An accepted limb between two peaks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index into the skeleton affinity edges.
    pub edge: usize,
    pub from: PeakRef,
    pub to: PeakRef,
    pub score: f32,
}

/// Line integral of the field along `from -> to`, approximated by summing the
/// projection of the field on the limb direction at evenly spaced samples.
///
/// Each sample reads the nearest cell. A zero-length limb scores 0.
pub fn affinity_score(
    fields: &FeatureMap<'_>,
    field_x: usize,
    field_y: usize,
    from: &Peak,
    to: &Peak,
) -> f32 {
    let start = Vec2::new(from.col as f32, from.row as f32);
    let end = Vec2::new(to.col as f32, to.row as f32);
    let Some(direction) = (end - start).try_normalized() else {
        return 0.0;
    };

    let max_row = (fields.height() - 1) as f32;
    let max_col = (fields.width() - 1) as f32;
    (0..AFFINITY_SAMPLES)
        .map(|i| {
            let t = i as f32 / (AFFINITY_SAMPLES - 1) as f32;
            let sample = start.lerp(end, t);
            let row = sample.y.round().clamp(0.0, max_row) as usize;
            let col = sample.x.round().clamp(0.0, max_col) as usize;
            let field = Vec2::new(
                fields.get(row, col, field_x),
                fields.get(row, col, field_y),
            );
            field.dot(direction)
        })
        .sum()
}

/// Greedy one-to-one matching of candidate peaks along every affinity edge.
///
/// Edges are visited in skeleton order. For each edge every pair of candidates
/// is scored, pairs below `pair_threshold` (when set) or with a non-finite
/// score are dropped, and the rest are taken best first (stable, so ties keep
/// row-major pair order) while neither endpoint has been used for that edge.
pub fn match_parts(
    fields: &FeatureMap<'_>,
    skeleton: &Skeleton,
    peaks: &[Vec<Peak>],
    pair_threshold: Option<f32>,
) -> Vec<Connection> {
    let mut connections = Vec::new();
    for (edge_index, edge) in skeleton.affinity_edges.iter().enumerate() {
        let (Some(from_part), Some(to_part)) =
            (skeleton.index_of(edge.from), skeleton.index_of(edge.to))
        else {
            continue;
        };
        let (Some(from_peaks), Some(to_peaks)) = (peaks.get(from_part), peaks.get(to_part))
        else {
            continue;
        };
        if edge.field_x >= fields.channel_count() || edge.field_y >= fields.channel_count() {
            continue;
        }

        let mut candidates = Vec::with_capacity(from_peaks.len() * to_peaks.len());
        for (a, from) in from_peaks.iter().enumerate() {
            for (b, to) in to_peaks.iter().enumerate() {
                let score = affinity_score(fields, edge.field_x, edge.field_y, from, to);
                if !score.is_finite() || pair_threshold.is_some_and(|t| score < t) {
                    continue;
                }
                candidates.push((a, b, score));
            }
        }
        candidates.sort_by(|x, y| y.2.total_cmp(&x.2));

        let mut from_used = vec![false; from_peaks.len()];
        let mut to_used = vec![false; to_peaks.len()];
        for (a, b, score) in candidates {
            if from_used[a] || to_used[b] {
                continue;
            }
            from_used[a] = true;
            to_used[b] = true;
            connections.push(Connection {
                edge: edge_index,
                from: PeakRef {
                    part: from_part,
                    index: a,
                },
                to: PeakRef {
                    part: to_part,
                    index: b,
                },
                score,
            });
        }
    }
    connections
}
