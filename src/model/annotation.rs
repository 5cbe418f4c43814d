//! Annotation geometry and passthrough metadata.
//!
//! All coordinates are in source-image pixel space.

use std::collections::BTreeMap;

/// Unique identifier for an annotation, stable across renders.
pub type AnnotationId = u64;

/// Minimum number of vertices required for a renderable polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Top-left corner X coordinate
    pub x: f32,
    /// Top-left corner Y coordinate
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a normalized bounding box from two corner points.
    ///
    /// Width and height are never negative, whichever corner comes first.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            x: p1.x.min(p2.x),
            y: p1.y.min(p2.y),
            width: (p1.x - p2.x).abs(),
            height: (p1.y - p2.y).abs(),
        }
    }

    /// Build from an `[x, y, width, height]` slice.
    ///
    /// Returns `None` for malformed input (fewer than four values).
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match values {
            [x, y, width, height, ..] => Some(Self::new(*x, *y, *width, *height)),
            _ => None,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

}

/// Segmentation mask as a set of polygons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mask {
    pub has_segmentation: bool,
    /// Polygons in their original vertex order. Polygons with fewer than
    /// three points are kept here and skipped at render time.
    pub polygons: Vec<Vec<Point>>,
}

impl Mask {
    pub fn new(polygons: Vec<Vec<Point>>) -> Self {
        Self {
            has_segmentation: true,
            polygons,
        }
    }

    /// Polygons that can actually be drawn.
    pub fn renderable_polygons(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.polygons
            .iter()
            .filter(|p| p.len() >= MIN_POLYGON_VERTICES)
            .map(Vec::as_slice)
    }
}

/// A single annotation on an image.
///
/// Read-only to the overlay engine. `status`, `category_id`, `score`, and
/// `metadata` are carried through for display only.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: AnnotationId,
    pub bbox: Option<BoundingBox>,
    pub mask: Option<Mask>,
    pub category_id: Option<u32>,
    pub status: Option<String>,
    /// Model confidence in `0.0..=1.0`
    pub score: Option<f32>,
    /// Any other fields from the source record
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Annotation {
    /// Create an annotation with no geometry.
    pub fn new(id: AnnotationId) -> Self {
        Self {
            id,
            bbox: None,
            mask: None,
            category_id: None,
            status: None,
            score: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_category(mut self, category_id: u32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// The mask, if it carries segmentation data.
    pub fn segmentation(&self) -> Option<&Mask> {
        self.mask.as_ref().filter(|mask| mask.has_segmentation)
    }
}
