//! Data models for the overlay engine.

mod annotation;
mod record;

pub use annotation::{
    Annotation, AnnotationId, BoundingBox, MIN_POLYGON_VERTICES, Mask, Point, Size,
};
pub use record::{parse_record, parse_records};
