use serde::{Deserialize, Serialize};

/// Integer pixel coordinate (top-left origin).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    pub x: usize,
    pub y: usize,
}

impl PixelCoord {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// How a segment was traced.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SegmentKind {
    /// Row run, scanned left to right.
    Horizontal,
    /// Column run, scanned top to bottom.
    Vertical,
    /// Traced along the step `(dx, dy)`.
    Isometric { dx: i32, dy: i32 },
}

impl SegmentKind {
    #[inline]
    pub fn is_isometric(self) -> bool {
        matches!(self, SegmentKind::Isometric { .. })
    }
}

/// Ordered run of line pixels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub points: Vec<PixelCoord>,
}

impl Segment {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Trace origin.
    pub fn start(&self) -> Option<PixelCoord> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<PixelCoord> {
        self.points.last().copied()
    }
}

/// Axis-aligned detection window.
///
/// `score` is present only for correlation matches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl BoundingBox {
    /// Unscored box.
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            score: None,
        }
    }

    pub const fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscored_boxes_omit_the_score_field() {
        let json = serde_json::to_string(&BoundingBox::new(3, 4, 5, 6)).expect("serialize");
        assert!(!json.contains("score"));

        let scored: BoundingBox =
            serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4,"score":0.5}"#)
                .expect("deserialize");
        assert_eq!(scored.score, Some(0.5));
        assert_eq!(scored.right(), 4);
        assert_eq!(scored.bottom(), 6);
    }

    #[test]
    fn segment_kind_is_tagged() {
        let json =
            serde_json::to_string(&SegmentKind::Isometric { dx: 2, dy: -1 }).expect("serialize");
        assert_eq!(json, r#"{"kind":"isometric","dx":2,"dy":-1}"#);
    }
}
