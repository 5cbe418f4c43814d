//! Styled draw items and the ordered draw list.

use serde::Serialize;

use crate::color::Color;
use crate::shape::Primitive;

/// Fill paint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fill {
    pub color: Color,
    pub opacity: f32,
}

impl Fill {
    pub fn new(color: Color, opacity: f32) -> Self {
        Self { color, opacity }
    }
}

/// Stroke paint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub opacity: f32,
    /// Width in surface pixels
    pub width: f32,
    /// Dash and gap lengths, `None` for a solid line
    pub dash: Option<(f32, f32)>,
}

impl Stroke {
    pub fn new(color: Color, opacity: f32, width: f32) -> Self {
        Self {
            color,
            opacity,
            width,
            dash: None,
        }
    }

    pub fn dashed(mut self, dash: f32, gap: f32) -> Self {
        self.dash = Some((dash, gap));
        self
    }
}

/// Glow filters applied to emphasized shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Filter {
    SelectedGlow,
    HoverGlow,
}

impl Filter {
    pub fn id(&self) -> &'static str {
        match self {
            Filter::SelectedGlow => "selectedGlow",
            Filter::HoverGlow => "hoverGlow",
        }
    }

    /// Gaussian blur standard deviation.
    pub fn blur(&self) -> f32 {
        match self {
            Filter::SelectedGlow => 3.0,
            Filter::HoverGlow => 2.0,
        }
    }
}

/// What a draw item depicts. Used by hosts and tests to pick items out of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemRole {
    Mask,
    BoundingBox,
    LabelBackground,
    LabelText,
    SelectionIndicator,
    ScoreBadge,
    ScoreText,
    Sketch,
}

/// One styled primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawItem {
    /// Identity of the object this item belongs to, if any
    pub key: Option<u64>,
    pub role: ItemRole,
    pub primitive: Primitive,
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    pub filter: Option<Filter>,
    /// Whether the item captures pointer events
    pub interactive: bool,
}

impl DrawItem {
    pub fn new(role: ItemRole, primitive: Primitive) -> Self {
        Self {
            key: None,
            role,
            primitive,
            fill: None,
            stroke: None,
            filter: None,
            interactive: false,
        }
    }

    pub fn key(mut self, key: u64) -> Self {
        self.key = Some(key);
        self
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn filter(mut self, filter: Option<Filter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

/// An ordered list of draw items for one surface. Later items draw over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    items: Vec<DrawItem>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: DrawItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = DrawItem>) {
        self.items.extend(items);
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items with the given role, in draw order.
    pub fn with_role(&self, role: ItemRole) -> impl Iterator<Item = &DrawItem> + '_ {
        self.items.iter().filter(move |item| item.role == role)
    }

    /// Items belonging to `key`, in draw order.
    pub fn for_key(&self, key: u64) -> impl Iterator<Item = &DrawItem> + '_ {
        self.items.iter().filter(move |item| item.key == Some(key))
    }

    /// Filters referenced by any item, deduplicated, in first-use order.
    pub fn filters(&self) -> Vec<Filter> {
        let mut used = Vec::new();
        for filter in self.items.iter().filter_map(|item| item.filter) {
            if !used.contains(&filter) {
                used.push(filter);
            }
        }
        used
    }

    /// Key of the topmost interactive item under the surface point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<u64> {
        let hit = self
            .items
            .iter()
            .rev()
            .filter(|item| item.interactive)
            .find(|item| item.primitive.contains(x, y))
            .and_then(|item| item.key);
        log::trace!("Hit test at ({}, {}): {:?}", x, y, hit);
        hit
    }
}
