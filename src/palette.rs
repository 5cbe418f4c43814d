//! Color assignment for annotations and sketch labels.
//!
//! Colors are a pure function of (policy, list position, id). Nothing here
//! depends on render history, so repeated renders of the same list agree.

use segview_draw::Color;

use crate::model::AnnotationId;

/// Default palette: eight high-contrast hues readable over photographs.
pub const DEFAULT_PALETTE: [u32; 8] = [
    0x0066FF, // blue
    0x00CC44, // green
    0xFF8800, // orange
    0x9933FF, // purple
    0xFF1177, // pink
    0x00AAFF, // light blue
    0xFFD700, // gold
    0xFF4455, // red
];

/// Color of the annotation in focus under [`ColorPolicy::Role`].
pub const HIGHLIGHT_COLOR: u32 = 0x0066FF;

/// Color of every other annotation under [`ColorPolicy::Role`].
pub const OTHER_COLOR: u32 = 0x8B5A96;

/// Label palette used for sketch labels before falling back to hashed colors.
pub const LABEL_PALETTE: [u32; 20] = [
    0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0x96CEB4, 0xFFEAA7, 0xDDA0DD, 0x98D8C8, 0xF7DC6F, 0xBB8FCE,
    0x85C1E9, 0xF8C471, 0x82E0AA, 0xF1948A, 0x76D7C4, 0xD2B4DE, 0xAED6F1, 0xA9DFBF, 0xF9E79F,
    0xFADBD8, 0xD5DBDB,
];

/// Pick `palette[index mod len]`. The palette must not be empty.
pub fn color_for(index: usize, palette: &[Color]) -> Color {
    palette[index % palette.len()]
}

/// Which rule decides an annotation's base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPolicy {
    /// By position in the rendered list; stable only within one list order.
    #[default]
    Position,
    /// By annotation id; stable across lists.
    Identity,
    /// Highlight the focus annotation, one shared color for the rest.
    Role { focus: Option<AnnotationId> },
}

impl ColorPolicy {
    /// The focus annotation, if this is a role policy with one.
    pub fn focus(&self) -> Option<AnnotationId> {
        match self {
            ColorPolicy::Role { focus } => *focus,
            _ => None,
        }
    }
}

/// Palette plus the two role colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAssigner {
    palette: Vec<Color>,
    highlight: Color,
    other: Color,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().copied().map(Color::from_rgb_u32).collect(),
            highlight: Color::from_rgb_u32(HIGHLIGHT_COLOR),
            other: Color::from_rgb_u32(OTHER_COLOR),
        }
    }
}

impl ColorAssigner {
    /// Build from explicit colors. Returns `None` for an empty palette.
    pub fn new(palette: Vec<Color>, highlight: Color, other: Color) -> Option<Self> {
        if palette.is_empty() {
            return None;
        }
        Some(Self {
            palette,
            highlight,
            other,
        })
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Base color for the annotation at `position` with identity `id`.
    pub fn assign(&self, policy: ColorPolicy, position: usize, id: AnnotationId) -> Color {
        match policy {
            ColorPolicy::Position => color_for(position, &self.palette),
            ColorPolicy::Identity => {
                let index = (id % self.palette.len() as u64) as usize;
                color_for(index, &self.palette)
            }
            ColorPolicy::Role { focus } => {
                if focus == Some(id) {
                    self.highlight
                } else {
                    self.other
                }
            }
        }
    }
}

/// Text color that stays readable on `background`.
pub fn contrast_text_color(background: Color) -> Color {
    if background.brightness() > 155.0 {
        Color::from_rgb_u32(0x333333)
    } else {
        Color::WHITE
    }
}

/// Per-label color registry.
///
/// Labels registered first take [`LABEL_PALETTE`] entries in order; once the
/// palette runs out (or for unregistered labels) the color is derived from a
/// hash of the label text, so it never depends on anything but the label.
#[derive(Debug, Clone, Default)]
pub struct LabelColors {
    entries: Vec<(String, Color)>,
}

impl LabelColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evenly spaced hues, one per label, in the given order.
    pub fn spread<S: AsRef<str>>(labels: &[S]) -> Self {
        let step = 360.0 / labels.len().max(1) as f32;
        let entries = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                (
                    label.as_ref().to_string(),
                    Color::from_hsl(step * i as f32, 0.8, 0.45),
                )
            })
            .collect();
        Self { entries }
    }

    /// Register `label` if it is new and return its color.
    pub fn register(&mut self, label: &str) -> Color {
        if let Some(color) = self.lookup(label) {
            return color;
        }
        let color = match LABEL_PALETTE.get(self.entries.len()) {
            Some(&packed) => Color::from_rgb_u32(packed),
            None => hashed_color(label),
        };
        self.entries.push((label.to_string(), color));
        color
    }

    /// Color for `label`, falling back to the hashed color if unregistered.
    pub fn color(&self, label: &str) -> Color {
        self.lookup(label).unwrap_or_else(|| hashed_color(label))
    }

    /// Registered labels and their colors, in registration order.
    pub fn entries(&self) -> &[(String, Color)] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn lookup(&self, label: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, color)| *color)
    }
}

/// Deterministic color from a label's UTF-16 code units (`h * 31 + c`, wrapping).
fn hashed_color(label: &str) -> Color {
    let hash = label
        .encode_utf16()
        .fold(0i32, |h, c| (c as i32).wrapping_add(h.wrapping_shl(5).wrapping_sub(h)));
    let h = hash.unsigned_abs();
    let hue = (h % 360) as f32;
    let saturation = (65 + h % 25) as f32 / 100.0;
    let lightness = (55 + h % 15) as f32 / 100.0;
    Color::from_hsl(hue, saturation, lightness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_for_wraps() {
        let assigner = ColorAssigner::default();
        let palette = assigner.palette();
        assert_eq!(color_for(0, palette), color_for(8, palette));
        assert_ne!(color_for(0, palette), color_for(1, palette));
    }

    #[test]
    fn test_palette_is_distinct() {
        let assigner = ColorAssigner::default();
        let hexes: Vec<String> = assigner.palette().iter().map(Color::to_hex).collect();
        for (i, a) in hexes.iter().enumerate() {
            assert!(hexes[i + 1..].iter().all(|b| a != b), "duplicate {}", a);
        }
        assert!(hexes.len() >= 8);
    }

    #[test]
    fn test_position_policy_ignores_id() {
        let assigner = ColorAssigner::default();
        assert_eq!(
            assigner.assign(ColorPolicy::Position, 2, 100),
            assigner.assign(ColorPolicy::Position, 2, 5)
        );
    }

    #[test]
    fn test_identity_policy_ignores_position() {
        let assigner = ColorAssigner::default();
        assert_eq!(
            assigner.assign(ColorPolicy::Identity, 0, 11),
            assigner.assign(ColorPolicy::Identity, 7, 11)
        );
        assert_eq!(
            assigner.assign(ColorPolicy::Identity, 0, 11),
            color_for(3, assigner.palette())
        );
    }

    #[test]
    fn test_role_policy_is_binary() {
        let assigner = ColorAssigner::default();
        let policy = ColorPolicy::Role { focus: Some(4) };
        assert_eq!(
            assigner.assign(policy, 0, 4).to_hex(),
            Color::from_rgb_u32(HIGHLIGHT_COLOR).to_hex()
        );
        for id in [1, 2, 3, 5] {
            assert_eq!(
                assigner.assign(policy, id as usize, id).to_hex(),
                Color::from_rgb_u32(OTHER_COLOR).to_hex()
            );
        }
        let no_focus = ColorPolicy::Role { focus: None };
        assert_eq!(
            assigner.assign(no_focus, 0, 4),
            Color::from_rgb_u32(OTHER_COLOR)
        );
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(ColorAssigner::new(vec![], Color::WHITE, Color::BLACK).is_none());
    }

    #[test]
    fn test_contrast_text_color() {
        assert_eq!(contrast_text_color(Color::WHITE).to_hex(), "#333333");
        assert_eq!(contrast_text_color(Color::from_rgb_u32(0x0066FF)), Color::WHITE);
    }

    #[test]
    fn test_label_registry_uses_palette_then_hash() {
        let mut colors = LabelColors::new();
        assert_eq!(colors.register("car"), Color::from_rgb_u32(LABEL_PALETTE[0]));
        assert_eq!(colors.register("person"), Color::from_rgb_u32(LABEL_PALETTE[1]));
        // Re-registering keeps the first color
        assert_eq!(colors.register("car"), Color::from_rgb_u32(LABEL_PALETTE[0]));
        assert_eq!(colors.entries().len(), 2);

        for i in 2..LABEL_PALETTE.len() {
            colors.register(&format!("label-{}", i));
        }
        assert_eq!(colors.register("overflow"), hashed_color("overflow"));
    }

    #[test]
    fn test_unregistered_label_is_stable() {
        let colors = LabelColors::new();
        assert_eq!(colors.color("tree"), colors.color("tree"));
        assert_eq!(colors.color("tree"), hashed_color("tree"));
    }

    #[test]
    fn test_spread_hues() {
        let colors = LabelColors::spread(&["a", "b", "c"]);
        assert_eq!(colors.color("a"), Color::from_hsl(0.0, 0.8, 0.45));
        assert_eq!(colors.color("b"), Color::from_hsl(120.0, 0.8, 0.45));
        assert_eq!(colors.color("c"), Color::from_hsl(240.0, 0.8, 0.45));
    }
}
