//! Conversion of annotation geometry into surface-space draw primitives.

use segview_draw::{PathSpec, RectSpec};

use crate::model::{BoundingBox, MIN_POLYGON_VERTICES, Point};
use crate::viewport::Viewport;

/// Build a closed surface-space path from an image-space polygon.
///
/// Returns `None` for fewer than three points; callers skip the polygon.
/// Vertex order is preserved exactly (no sorting, no deduplication), which
/// concave outlines depend on.
pub fn polygon_to_path(points: &[Point], viewport: &Viewport) -> Option<PathSpec> {
    let (first, rest) = points.split_first()?;
    if points.len() < MIN_POLYGON_VERTICES {
        return None;
    }

    let mut path = PathSpec::with_capacity(points.len() + 1);
    let start = viewport.to_surface(*first);
    path.move_to(start.x, start.y);
    for point in rest {
        let p = viewport.to_surface(*point);
        path.line_to(p.x, p.y);
    }
    path.close();
    Some(path)
}

/// Map an image-space box to a surface rectangle.
///
/// Boxes are assumed normalized by their producer; negative sizes pass through.
pub fn bbox_to_rect(bbox: &BoundingBox, viewport: &Viewport) -> RectSpec {
    let b = viewport.box_to_surface(bbox);
    RectSpec::new(b.x, b.y, b.width, b.height)
}
