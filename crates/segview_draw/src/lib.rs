//! segview_draw - surface-space drawing primitives for image overlays
//!
//! Shapes, paint, ordered draw lists with hit testing, SVG output, and the
//! callback wrapper used for pointer events. Nothing here knows about
//! annotations; the `segview` crate builds draw lists from them.

mod callback;
mod color;
mod draw_list;
mod shape;
mod svg;

pub use callback::Callback;
pub use color::{Color, ColorError};
pub use draw_list::{DrawItem, DrawList, Fill, Filter, ItemRole, Stroke};
pub use shape::{CircleSpec, PathCommand, PathSpec, Primitive, RectSpec, TextAnchor, TextSpec};
