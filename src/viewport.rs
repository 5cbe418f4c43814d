//! Image-to-surface coordinate mapping.
//!
//! A [`Viewport`] maps source-image pixels onto the displayed surface with a
//! single isotropic scale (`zoom`) and a translation (`pan`, in surface
//! pixels): `surface = image * zoom + pan`. The fixed-container layouts are
//! special cases of the same mapping with a derived zoom and zero pan.
//!
//! Preconditions: the source size must be non-zero. A zero-sized source
//! yields non-finite coordinates rather than an error.

use crate::model::{BoundingBox, Point, Size};

/// Zoom/pan mapping from source-image space to surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Native pixel size of the image annotations are defined against
    pub source: Size,
    /// Displayed size of the rendering surface
    pub surface: Size,
    pub zoom: f32,
    /// Translation in surface pixels
    pub pan: Point,
}

impl Viewport {
    /// Zoom/pan layout with an explicit transform.
    pub fn new(source: Size, surface: Size, zoom: f32, pan: Point) -> Self {
        Self {
            source,
            surface,
            zoom,
            pan,
        }
    }

    /// Fixed-width container: the surface height is derived from the source
    /// aspect ratio, so both axes share the scale `surface_width / source.width`.
    pub fn fit_width(source: Size, surface_width: f32) -> Self {
        let zoom = surface_width / source.width;
        Self {
            source,
            surface: Size::new(surface_width, source.height * zoom),
            zoom,
            pan: Point::new(0.0, 0.0),
        }
    }

    /// Fill the whole surface, cropping overflow equally on both sides.
    pub fn cover(source: Size, surface: Size) -> Self {
        let zoom = (surface.width / source.width).max(surface.height / source.height);
        Self::centered(source, surface, zoom)
    }

    /// Fit the whole image inside the surface, letterboxing the remainder.
    pub fn contain(source: Size, surface: Size) -> Self {
        let zoom = (surface.width / source.width).min(surface.height / source.height);
        Self::centered(source, surface, zoom)
    }

    fn centered(source: Size, surface: Size, zoom: f32) -> Self {
        let pan = Point::new(
            (surface.width - source.width * zoom) / 2.0,
            (surface.height - source.height * zoom) / 2.0,
        );
        Self::new(source, surface, zoom, pan)
    }

    /// Per-axis scale factors. Always equal: the mapping is isotropic.
    pub fn scale(&self) -> (f32, f32) {
        (self.zoom, self.zoom)
    }

    /// Map an image-space point to the surface. Off-surface results are valid.
    pub fn to_surface(&self, point: Point) -> Point {
        Point::new(
            point.x * self.zoom + self.pan.x,
            point.y * self.zoom + self.pan.y,
        )
    }

    /// Map a surface point (e.g. a pointer position) back to image space.
    pub fn to_image(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.pan.x) / self.zoom,
            (point.y - self.pan.y) / self.zoom,
        )
    }

    /// Map an image-space box to the surface.
    pub fn box_to_surface(&self, bbox: &BoundingBox) -> BoundingBox {
        let top_left = self.to_surface(bbox.top_left());
        BoundingBox::new(
            top_left.x,
            top_left.y,
            bbox.width * self.zoom,
            bbox.height * self.zoom,
        )
    }

    /// Change zoom while keeping the image point under `cursor` fixed.
    pub fn zoom_at(&self, cursor: Point, new_zoom: f32) -> Viewport {
        let anchor = self.to_image(cursor);
        Viewport {
            zoom: new_zoom,
            pan: Point::new(cursor.x - anchor.x * new_zoom, cursor.y - anchor.y * new_zoom),
            ..*self
        }
    }

    /// Apply a pan delta in surface pixels.
    pub fn pan_by(&self, dx: f32, dy: f32) -> Viewport {
        Viewport {
            pan: Point::new(self.pan.x + dx, self.pan.y + dy),
            ..*self
        }
    }

    /// Zoom in by a factor (e.g. 1.2 for 20%), capped at `max_zoom`.
    pub fn zoom_in(&self, factor: f32, max_zoom: f32) -> Viewport {
        Viewport {
            zoom: (self.zoom * factor).min(max_zoom),
            ..*self
        }
    }

    /// Zoom out by a factor, floored at `min_zoom`.
    pub fn zoom_out(&self, factor: f32, min_zoom: f32) -> Viewport {
        Viewport {
            zoom: (self.zoom / factor).max(min_zoom),
            ..*self
        }
    }
}

/// Map one image-space point to the surface for the given layout.
pub fn to_surface(point: Point, source: Size, surface: Size, zoom: f32, pan: Point) -> Point {
    Viewport::new(source, surface, zoom, pan).to_surface(point)
}
