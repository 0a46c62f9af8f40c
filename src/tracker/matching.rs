//! Association scoring and assignment between tracked identities and detections.

use ndarray::Array2;

use crate::tracker::config::{FrameSize, TrackerConfig};
use crate::tracker::rect::Rect;
use crate::tracker::track_state::TrackState;

/// Detection input for the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box
    pub bbox: Rect,
    /// Detection confidence score in `[0, 1]`
    pub score: f32,
}

impl Detection {
    /// Build from corner coordinates (x1, y1, x2, y2).
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            score,
        }
    }

    pub fn from_rect(bbox: Rect, score: f32) -> Self {
        Self { bbox, score }
    }
}

/// The individual association signals for one (state, detection) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub horizontal: f32,
    pub vertical: f32,
    pub iou: f32,
    pub size: f32,
    /// Weighted sum of the four signals.
    pub combined: f32,
}

/// `1 - clamp(distance / gate, 0, 1)`
#[inline]
fn proximity(distance: f32, gate: f32) -> f32 {
    1.0 - (distance / gate).clamp(0.0, 1.0)
}

/// Score how well `detection` continues `state`.
pub fn score_pair(
    config: &TrackerConfig,
    state: &TrackState,
    detection: &Detection,
    frame: FrameSize,
) -> MatchScore {
    let (cx, cy) = detection.bbox.center();
    let horizontal = proximity(
        (state.smoothed.x - cx).abs(),
        frame.width() as f32 * config.horizontal_gate_ratio,
    );
    let vertical = proximity(
        (state.smoothed.y - cy).abs(),
        frame.height() as f32 * config.vertical_gate_ratio,
    );
    let iou = state.last_box.iou(&detection.bbox);
    let size = state.last_box.area_similarity(&detection.bbox);

    let w = &config.weights;
    let combined = w.horizontal * horizontal + w.vertical * vertical + w.iou * iou + w.size * size;

    MatchScore {
        horizontal,
        vertical,
        iou,
        size,
        combined,
    }
}

/// Combined score for every pair, shaped (states, detections). Rows follow the
/// iteration order of `states`.
pub fn score_matrix<'a>(
    config: &TrackerConfig,
    states: impl ExactSizeIterator<Item = &'a TrackState>,
    detections: &[Detection],
    frame: FrameSize,
) -> Array2<f32> {
    let mut scores = Array2::zeros((states.len(), detections.len()));
    for (i, state) in states.enumerate() {
        for (j, det) in detections.iter().enumerate() {
            scores[[i, j]] = score_pair(config, state, det, frame).combined;
        }
    }
    scores
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// (row, col) pairs in the order they were accepted.
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

impl AssignmentResult {
    fn from_matches(matches: Vec<(usize, usize)>, num_rows: usize, num_cols: usize) -> Self {
        let mut row_used = vec![false; num_rows];
        let mut col_used = vec![false; num_cols];
        for &(r, c) in &matches {
            row_used[r] = true;
            col_used[c] = true;
        }
        Self {
            matches,
            unmatched_tracks: (0..num_rows).filter(|&r| !row_used[r]).collect(),
            unmatched_detections: (0..num_cols).filter(|&c| !col_used[c]).collect(),
        }
    }
}

/// Best-first greedy assignment over a score matrix.
///
/// Pairs below `min_score` are discarded. The rest are sorted by score,
/// highest first, with a stable sort so equal scores keep row-major order.
/// A pair is accepted only if neither its row nor its column is taken.
pub fn greedy_assignment(scores: &Array2<f32>, min_score: f32) -> AssignmentResult {
    let (num_rows, num_cols) = scores.dim();

    let mut candidates: Vec<(usize, usize, f32)> = scores
        .indexed_iter()
        .filter(|(_, s)| **s >= min_score)
        .map(|((i, j), s)| (i, j, *s))
        .collect();
    candidates.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut row_taken = vec![false; num_rows];
    let mut col_taken = vec![false; num_cols];
    let mut matches = Vec::new();

    for (i, j, _) in candidates {
        if row_taken[i] || col_taken[j] {
            continue;
        }
        row_taken[i] = true;
        col_taken[j] = true;
        matches.push((i, j));
    }

    AssignmentResult::from_matches(matches, num_rows, num_cols)
}

/// Maximum-total-score assignment using the Jonker-Volgenant solver.
///
/// Accepted pairs must still reach `min_score`. Matches are reported in
/// descending score order to line up with [`greedy_assignment`].
pub fn linear_assignment(scores: &Array2<f32>, min_score: f32) -> AssignmentResult {
    let (num_rows, num_cols) = scores.dim();

    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::from_matches(Vec::new(), num_rows, num_cols);
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), 1e6);

    for ((i, j), s) in scores.indexed_iter() {
        padded[[i, j]] = if *s >= min_score {
            1.0 - *s as f64
        } else {
            1e6
        };
    }

    let mut matches = Vec::new();
    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
                if col_idx < num_cols && scores[[row_idx, col_idx]] >= min_score {
                    matches.push((row_idx, col_idx));
                }
            }
        }
        Err(_) => {
            tracing::warn!("optimal assignment failed, falling back to greedy");
            return greedy_assignment(scores, min_score);
        }
    }

    matches.sort_by(|a, b| scores[[b.0, b.1]].total_cmp(&scores[[a.0, a.1]]));
    AssignmentResult::from_matches(matches, num_rows, num_cols)
}
