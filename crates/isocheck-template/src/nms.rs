//! Greedy IoU suppression.

use isocheck_core::BoundingBox;

/// Default IoU above which a later box is dropped.
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.3;

/// Intersection over union; `0` for disjoint or degenerate boxes.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let ix = a.right().min(b.right()).saturating_sub(a.x.max(b.x));
    let iy = a.bottom().min(b.bottom()).saturating_sub(a.y.max(b.y));
    let inter = ix * iy;
    let union = a.area() + b.area() - inter;
    if union == 0 {
        return 0.0;
    }
    inter as f32 / union as f32
}

/// Keep each box whose IoU with every previously kept box is at most
/// `iou_threshold`, scanning in input order.
///
/// Ordering is the caller's job: sort by descending score first when scores
/// are meaningful.
pub fn nms(boxes: &[BoundingBox], iou_threshold: f32) -> Vec<BoundingBox> {
    let mut kept: Vec<BoundingBox> = Vec::new();
    for b in boxes {
        if kept.iter().all(|k| iou(k, b) <= iou_threshold) {
            kept.push(*b);
        }
    }
    kept
}

/// Stable sort by descending score; unscored boxes go last.
pub fn sort_by_score_desc(boxes: &mut [BoundingBox]) {
    boxes.sort_by(|a, b| {
        let sa = a.score.unwrap_or(f32::NEG_INFINITY);
        let sb = b.score.unwrap_or(f32::NEG_INFINITY);
        sb.total_cmp(&sa)
    });
}
