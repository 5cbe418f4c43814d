//! Per-annotation visual state.
//!
//! Styles are recomputed from scratch on every render from the annotation's
//! base color and its emphasis flags. Nothing is cached between renders.

use segview_draw::{Color, Filter};
use serde::Serialize;

use crate::constants::{MIN_STROKE_WIDTH, display, emphasis};
use crate::model::AnnotationId;
use crate::render::SelectionContext;

/// Visual emphasis class of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Emphasis {
    #[default]
    None,
    Hover,
    Selected,
}

/// Emphasis inputs for one annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmphasisFlags {
    pub selected: bool,
    pub hovered: bool,
    pub pressed: bool,
    /// Whether any annotation at all is selected
    pub selection_active: bool,
}

impl EmphasisFlags {
    /// Resolve the flags of annotation `id` against the host's selection.
    pub fn resolve(id: AnnotationId, selection: &SelectionContext) -> Self {
        Self {
            selected: selection.selected.contains(&id),
            hovered: selection.hovered == Some(id),
            pressed: selection.pressed == Some(id),
            selection_active: !selection.selected.is_empty(),
        }
    }

    /// Neither selected nor hovered while something else is selected.
    pub fn is_dimmed(&self) -> bool {
        self.selection_active && !self.selected && !self.hovered
    }
}

/// Inputs shared by every annotation in one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleParams {
    /// Stroke width before emphasis, in image pixels
    pub base_stroke_width: f32,
    pub zoom: f32,
    pub min_stroke_width: f32,
    /// Multiplier for fill opacity, derived from the mask opacity option
    pub opacity_scale: f32,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            base_stroke_width: display::STROKE_WIDTH,
            zoom: 1.0,
            min_stroke_width: MIN_STROKE_WIDTH,
            opacity_scale: 1.0,
        }
    }
}

impl StyleParams {
    /// Largest on-screen stroke width: the pressed width at zoom 1.
    pub fn max_stroke_width(&self) -> f32 {
        (self.base_stroke_width * emphasis::PRESSED_STROKE_SCALE).max(self.min_stroke_width)
    }

    /// Convert an image-space stroke width to surface pixels.
    ///
    /// A NaN minimum is ignored rather than propagated.
    pub fn surface_stroke_width(&self, image_width: f32) -> f32 {
        (image_width / self.zoom)
            .max(self.min_stroke_width)
            .min(self.max_stroke_width())
    }
}

/// Final style of one annotation for one render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualStyle {
    pub fill_color: Color,
    pub fill_opacity: f32,
    pub stroke_color: Color,
    pub stroke_opacity: f32,
    /// On-screen width in surface pixels
    pub stroke_width: f32,
    pub emphasis: Emphasis,
    pub filter: Option<Filter>,
}

/// Compute the style for an annotation of base `color` in the given state.
///
/// Rules apply in order: base, selected or else hovered, pressed, dimming.
pub fn compute_style(color: Color, flags: EmphasisFlags, params: &StyleParams) -> VisualStyle {
    let base = params.base_stroke_width;

    let (mut fill_opacity, mut stroke_opacity, mut width) = if flags.selected {
        (
            emphasis::SELECTED_FILL_OPACITY,
            emphasis::SELECTED_STROKE_OPACITY,
            base * emphasis::SELECTED_STROKE_SCALE,
        )
    } else if flags.hovered {
        (
            emphasis::HOVER_FILL_OPACITY,
            emphasis::HOVER_STROKE_OPACITY,
            base * emphasis::HOVER_STROKE_SCALE,
        )
    } else {
        (
            emphasis::BASE_FILL_OPACITY,
            emphasis::BASE_STROKE_OPACITY,
            base,
        )
    };

    if flags.pressed {
        fill_opacity = emphasis::PRESSED_FILL_OPACITY;
        stroke_opacity = emphasis::PRESSED_STROKE_OPACITY;
        width = base * emphasis::PRESSED_STROKE_SCALE;
    }

    if flags.is_dimmed() {
        fill_opacity *= emphasis::DIM_FILL_FACTOR;
        stroke_opacity *= emphasis::DIM_STROKE_FACTOR;
    }

    let (emphasis, filter) = if flags.selected {
        (Emphasis::Selected, Some(Filter::SelectedGlow))
    } else if flags.hovered {
        (Emphasis::Hover, Some(Filter::HoverGlow))
    } else {
        (Emphasis::None, None)
    };

    VisualStyle {
        fill_color: color,
        fill_opacity: (fill_opacity * params.opacity_scale).clamp(0.0, 1.0),
        stroke_color: color,
        stroke_opacity,
        stroke_width: params.surface_stroke_width(width),
        emphasis,
        filter,
    }
}
