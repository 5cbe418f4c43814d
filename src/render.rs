//! Overlay rendering.
//!
//! [`OverlayRenderer::render`] is a pure function of its inputs: the
//! annotation snapshot, the viewport, the host's selection, and the display
//! options. It produces one [`DrawList`] in surface coordinates; the host
//! draws it (or serializes it with [`DrawList::to_svg`]) and routes pointer
//! events through [`crate::OverlayInteraction`].

use std::collections::BTreeSet;

use segview_draw::{
    CircleSpec, Color, DrawItem, DrawList, Fill, ItemRole, PathSpec, Primitive, RectSpec,
    Stroke, TextAnchor, TextSpec,
};
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_STROKE_WIDTH, decoration, display};
use crate::model::{Annotation, AnnotationId};
use crate::palette::{ColorAssigner, ColorPolicy, contrast_text_color};
use crate::path_builder::{bbox_to_rect, polygon_to_path};
use crate::viewport::Viewport;
use crate::visual_state::{EmphasisFlags, StyleParams, VisualStyle, compute_style};

/// Which overlay layers to draw.
///
/// Deserializes from camelCase keys; missing keys take their defaults and
/// unknown keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayOptions {
    pub show_masks: bool,
    pub show_bounding_boxes: bool,
    pub show_labels: bool,
    /// Mask fill strength; 0.5 leaves the state opacities unchanged
    pub mask_opacity: f32,
    /// Base stroke width in image pixels
    pub stroke_width: f32,
    /// Dashed outline around selected annotations
    pub show_selection_indicators: bool,
    /// Confidence badge on selected annotations that carry a score
    pub show_scores: bool,
    /// Draw the focus annotation of a role policy on top of the others
    pub focus_last: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_masks: true,
            show_bounding_boxes: false,
            show_labels: false,
            mask_opacity: display::MASK_OPACITY,
            stroke_width: display::STROKE_WIDTH,
            show_selection_indicators: false,
            show_scores: false,
            focus_last: false,
        }
    }
}

/// Host-owned selection state, read-only for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionContext {
    pub selected: BTreeSet<AnnotationId>,
    pub hovered: Option<AnnotationId>,
    /// Transient; see [`crate::PressTracker`]
    pub pressed: Option<AnnotationId>,
}

impl SelectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected(mut self, ids: impl IntoIterator<Item = AnnotationId>) -> Self {
        self.selected.extend(ids);
        self
    }

    pub fn with_hovered(mut self, id: Option<AnnotationId>) -> Self {
        self.hovered = id;
        self
    }

    pub fn with_pressed(mut self, id: Option<AnnotationId>) -> Self {
        self.pressed = id;
        self
    }
}

/// Builds overlay draw lists with one palette and color policy.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRenderer {
    assigner: ColorAssigner,
    policy: ColorPolicy,
    min_stroke_width: f32,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self {
            assigner: ColorAssigner::default(),
            policy: ColorPolicy::default(),
            min_stroke_width: MIN_STROKE_WIDTH,
        }
    }
}

impl OverlayRenderer {
    pub fn new(assigner: ColorAssigner, policy: ColorPolicy, min_stroke_width: f32) -> Self {
        Self {
            assigner,
            policy,
            min_stroke_width,
        }
    }

    pub fn with_policy(mut self, policy: ColorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ColorPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ColorPolicy) {
        self.policy = policy;
    }

    pub fn assigner(&self) -> &ColorAssigner {
        &self.assigner
    }

    fn style_params(&self, viewport: &Viewport, options: &DisplayOptions) -> StyleParams {
        StyleParams {
            base_stroke_width: options.stroke_width,
            zoom: viewport.zoom,
            min_stroke_width: self.min_stroke_width,
            opacity_scale: options.mask_opacity / display::MASK_OPACITY,
        }
    }

    /// Base color of the annotation at `position` in the rendered list.
    pub fn color_of(&self, position: usize, id: AnnotationId) -> Color {
        self.assigner.assign(self.policy, position, id)
    }

    /// Style the annotation at `position` would get in a render with these inputs.
    pub fn style_for(
        &self,
        position: usize,
        id: AnnotationId,
        viewport: &Viewport,
        selection: &SelectionContext,
        options: &DisplayOptions,
    ) -> VisualStyle {
        compute_style(
            self.color_of(position, id),
            EmphasisFlags::resolve(id, selection),
            &self.style_params(viewport, options),
        )
    }

    /// Positions in draw order. With `focus_last` and a focused role policy,
    /// the focus moves to the end; everything else keeps list order.
    fn draw_order(&self, annotations: &[Annotation], options: &DisplayOptions) -> Vec<usize> {
        let mut order: Vec<usize> = (0..annotations.len()).collect();
        if let (true, Some(focus)) = (options.focus_last, self.policy.focus()) {
            order.sort_by_key(|&position| annotations[position].id == focus);
        }
        order
    }

    /// Render one overlay layer.
    ///
    /// Per annotation, in draw order: mask paths, bounding box, label,
    /// selection indicator, score badge. An empty annotation list yields an
    /// empty list sized to the surface.
    pub fn render(
        &self,
        annotations: &[Annotation],
        viewport: &Viewport,
        selection: &SelectionContext,
        options: &DisplayOptions,
    ) -> DrawList {
        let mut list = DrawList::new(viewport.surface.width, viewport.surface.height);
        let params = self.style_params(viewport, options);
        let mut skipped_polygons = 0usize;

        for position in self.draw_order(annotations, options) {
            let annotation = &annotations[position];
            let id = annotation.id;
            let flags = EmphasisFlags::resolve(id, selection);
            let style = compute_style(self.color_of(position, id), flags, &params);
            log::trace!("Annotation {} at position {}: {:?}", id, position, style);

            if let Some(mask) = annotation.segmentation().filter(|_| options.show_masks) {
                let before = list.len();
                list.extend(
                    mask.renderable_polygons()
                        .filter_map(|polygon| polygon_to_path(polygon, viewport))
                        .map(|path| mask_item(id, path, &style)),
                );
                let skipped = mask.polygons.len() - (list.len() - before);
                if skipped > 0 {
                    log::trace!("Skipping {} degenerate polygons on annotation {}", skipped, id);
                    skipped_polygons += skipped;
                }
            }

            let Some(bbox) = annotation.bbox else {
                continue;
            };
            let rect = bbox_to_rect(&bbox, viewport);

            if options.show_bounding_boxes {
                list.push(box_item(id, rect, &style));
            }
            if options.show_labels {
                list.extend(label_items(id, position, rect, style.stroke_color));
            }
            if options.show_selection_indicators && flags.selected {
                list.push(indicator_item(id, rect));
            }
            if let (true, Some(score)) = (options.show_scores && flags.selected, annotation.score) {
                list.extend(score_items(id, score, rect));
            }
        }

        log::debug!(
            "Rendered {} annotations into {} draw items ({} degenerate polygons skipped)",
            annotations.len(),
            list.len(),
            skipped_polygons
        );
        list
    }
}

/// Render with the default palette and position-based colors.
pub fn render(
    annotations: &[Annotation],
    viewport: &Viewport,
    selection: &SelectionContext,
    options: &DisplayOptions,
) -> DrawList {
    OverlayRenderer::default().render(annotations, viewport, selection, options)
}

fn mask_item(id: AnnotationId, path: PathSpec, style: &VisualStyle) -> DrawItem {
    DrawItem::new(ItemRole::Mask, Primitive::Path(path))
        .key(id)
        .fill(Fill::new(style.fill_color, style.fill_opacity))
        .stroke(Stroke::new(
            style.stroke_color,
            style.stroke_opacity,
            style.stroke_width,
        ))
        .filter(style.filter)
        .interactive(true)
}

fn box_item(id: AnnotationId, rect: RectSpec, style: &VisualStyle) -> DrawItem {
    let (dash, gap) = decoration::BOX_DASH;
    DrawItem::new(ItemRole::BoundingBox, Primitive::Rect(rect))
        .key(id)
        .stroke(
            Stroke::new(style.stroke_color, style.stroke_opacity, style.stroke_width)
                .dashed(dash, gap),
        )
}

fn label_items(id: AnnotationId, position: usize, rect: RectSpec, color: Color) -> [DrawItem; 2] {
    let background = RectSpec::new(
        rect.x,
        rect.y - decoration::LABEL_OFFSET_Y,
        decoration::LABEL_WIDTH,
        decoration::LABEL_HEIGHT,
    )
    .rounded(decoration::LABEL_RADIUS);
    let text = TextSpec {
        x: rect.x + decoration::LABEL_TEXT_INSET_X,
        y: rect.y - decoration::LABEL_TEXT_OFFSET_Y,
        content: format!("#{}", position + 1),
        font_size: decoration::LABEL_FONT_SIZE,
        anchor: TextAnchor::Start,
    };

    [
        DrawItem::new(ItemRole::LabelBackground, Primitive::Rect(background))
            .key(id)
            .fill(Fill::new(color, decoration::LABEL_OPACITY)),
        DrawItem::new(ItemRole::LabelText, Primitive::Text(text))
            .key(id)
            .fill(Fill::new(contrast_text_color(color), 1.0)),
    ]
}

fn indicator_item(id: AnnotationId, rect: RectSpec) -> DrawItem {
    let (dash, gap) = decoration::INDICATOR_DASH;
    let outline = rect
        .padded(decoration::INDICATOR_PADDING)
        .rounded(decoration::INDICATOR_RADIUS);
    DrawItem::new(ItemRole::SelectionIndicator, Primitive::Rect(outline))
        .key(id)
        .stroke(Stroke::new(Color::WHITE, 1.0, decoration::INDICATOR_STROKE_WIDTH).dashed(dash, gap))
}

fn score_items(id: AnnotationId, score: f32, rect: RectSpec) -> [DrawItem; 2] {
    let (cx, cy) = rect.center();
    let badge = CircleSpec {
        cx,
        cy,
        r: decoration::BADGE_RADIUS,
    };
    let text = TextSpec {
        x: cx,
        y: cy + decoration::BADGE_TEXT_OFFSET_Y,
        content: format!("{}", (score * 100.0).round()),
        font_size: decoration::BADGE_FONT_SIZE,
        anchor: TextAnchor::Middle,
    };

    [
        DrawItem::new(ItemRole::ScoreBadge, Primitive::Circle(badge))
            .key(id)
            .fill(Fill::new(Color::BLACK, decoration::BADGE_OPACITY))
            .stroke(Stroke::new(Color::WHITE, 1.0, decoration::BADGE_STROKE_WIDTH)),
        DrawItem::new(ItemRole::ScoreText, Primitive::Text(text))
            .key(id)
            .fill(Fill::new(Color::WHITE, 1.0)),
    ]
}
