use crate::models::{BoundingBox, Detection};

/// Whether `candidate` is mostly inside one of the `accepted` boxes.
///
/// The ratio is intersection over the candidate's own area, so a small box
/// inside a large one is redundant but not the other way round.
pub fn is_redundant(candidate: &BoundingBox, accepted: &[Detection], max_overlap: f32) -> bool {
    accepted
        .iter()
        .any(|d| candidate.covered_fraction(&d.bbox) > max_overlap)
}

/// Append `candidate` unless it is empty or redundant. Returns whether it was kept.
pub fn accept(accepted: &mut Vec<Detection>, candidate: Detection, max_overlap: f32) -> bool {
    if candidate.bbox.is_empty() || is_redundant(&candidate.bbox, accepted, max_overlap) {
        return false;
    }
    accepted.push(candidate);
    true
}
