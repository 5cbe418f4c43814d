//! segview - annotation overlay engine
//!
//! Turns segmentation masks and bounding boxes defined in source-image pixel
//! space into a scaled, interactive vector overlay for a displayed image.
//!
//! A host supplies the annotation snapshot, a [`Viewport`] (surface size,
//! zoom, pan), and its [`SelectionContext`]; [`OverlayRenderer::render`]
//! returns a [`DrawList`] in surface coordinates. Pointer events go through
//! [`OverlayInteraction`], which resolves them to annotation ids and reports
//! them back as host messages. [`BoxSketchSession`] handles click-drag box
//! drawing for viewers that allow it.

mod config;
mod constants;
mod error;
mod interaction;
mod model;
mod palette;
mod path_builder;
mod press;
mod render;
mod sketch;
mod viewport;
mod visual_state;

pub use config::{CONFIG_VERSION, ConfigError, LogLevel, OverlayConfig, PolicyKind};
pub use constants::{MIN_STROKE_WIDTH, PRESS_DURATION_MS};
pub use error::{RecordError, Result};
pub use interaction::OverlayInteraction;
pub use model::{
    Annotation, AnnotationId, BoundingBox, MIN_POLYGON_VERTICES, Mask, Point, Size, parse_record,
    parse_records,
};
pub use palette::{
    ColorAssigner, ColorPolicy, DEFAULT_PALETTE, HIGHLIGHT_COLOR, LABEL_PALETTE, LabelColors,
    OTHER_COLOR, color_for, contrast_text_color,
};
pub use path_builder::{bbox_to_rect, polygon_to_path};
pub use press::{PressTicket, PressTracker};
pub use render::{DisplayOptions, OverlayRenderer, SelectionContext, render};
pub use sketch::{BoxSketchSession, SketchBox, SketchError, SketchState};
pub use viewport::{Viewport, to_surface};
pub use visual_state::{Emphasis, EmphasisFlags, StyleParams, VisualStyle, compute_style};

pub use segview_draw::{
    CircleSpec, Color, DrawItem, DrawList, Fill, Filter, ItemRole, PathCommand, PathSpec,
    Primitive, RectSpec, Stroke, TextAnchor, TextSpec,
};

#[cfg(test)]
mod tests;
