//! Drawing primitives in surface coordinates.
//!
//! These are decoupled from application-specific annotation types: a
//! primitive only knows where it is on the surface, not what it depicts.

use serde::Serialize;
use std::fmt::Write;

/// A single path command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    Close,
}

/// An ordered list of path commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathSpec {
    commands: Vec<PathCommand>,
}

impl PathSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the last command closes the path.
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Vertices of the path in command order (close commands are skipped).
    pub fn vertices(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => Some((x, y)),
            PathCommand::Close => None,
        })
    }

    /// SVG path data, e.g. `M 20 40 L 80 40 L 80 120 Z`.
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                data.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match cmd {
                PathCommand::MoveTo { x, y } => write!(data, "M {} {}", x, y),
                PathCommand::LineTo { x, y } => write!(data, "L {} {}", x, y),
                PathCommand::Close => write!(data, "Z"),
            };
        }
        data
    }

    /// Point-in-polygon test using ray casting (even-odd rule).
    ///
    /// Only closed paths have an interior; open paths never contain a point.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if !self.is_closed() {
            return false;
        }
        let vertices: Vec<(f32, f32)> = self.vertices().collect();
        if vertices.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = vertices.len() - 1;
        for i in 0..vertices.len() {
            let (xi, yi) = vertices[i];
            let (xj, yj) = vertices[j];
            if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Corner radius
    pub rx: f32,
}

impl RectSpec {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rx: 0.0,
        }
    }

    pub fn rounded(mut self, rx: f32) -> Self {
        self.rx = rx;
        self
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn padded(&self, amount: f32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
            rx: self.rx,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleSpec {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

impl CircleSpec {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.r * self.r
    }
}

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// A single line of text; `(x, y)` is the baseline anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSpec {
    pub x: f32,
    pub y: f32,
    pub content: String,
    pub font_size: f32,
    pub anchor: TextAnchor,
}

/// Any primitive that can appear in a draw list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Primitive {
    Path(PathSpec),
    Rect(RectSpec),
    Circle(CircleSpec),
    Text(TextSpec),
}

impl Primitive {
    /// Surface-space hit test. Text never captures the pointer.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            Primitive::Path(path) => path.contains(x, y),
            Primitive::Rect(rect) => rect.contains(x, y),
            Primitive::Circle(circle) => circle.contains(x, y),
            Primitive::Text(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PathSpec {
        let mut path = PathSpec::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.line_to(10.0, 10.0);
        path.line_to(0.0, 10.0);
        path.close();
        path
    }

    #[test]
    fn test_svg_data_formatting() {
        assert_eq!(square().to_svg_data(), "M 0 0 L 10 0 L 10 10 L 0 10 Z");
    }

    #[test]
    fn test_fractional_coordinates_are_kept() {
        let mut path = PathSpec::new();
        path.move_to(0.5, 1.25);
        assert_eq!(path.to_svg_data(), "M 0.5 1.25");
    }

    #[test]
    fn test_path_contains() {
        let path = square();
        assert!(path.contains(5.0, 5.0));
        assert!(!path.contains(15.0, 5.0));
        assert!(!path.contains(-1.0, 5.0));
    }

    #[test]
    fn test_concave_path_contains() {
        // U shape: the notch between the arms is outside
        let mut path = PathSpec::new();
        path.move_to(0.0, 0.0);
        path.line_to(3.0, 0.0);
        path.line_to(3.0, 3.0);
        path.line_to(2.0, 3.0);
        path.line_to(2.0, 1.0);
        path.line_to(1.0, 1.0);
        path.line_to(1.0, 3.0);
        path.line_to(0.0, 3.0);
        path.close();

        assert!(path.contains(0.5, 2.0));
        assert!(path.contains(2.5, 2.0));
        assert!(!path.contains(1.5, 2.0));
    }

    #[test]
    fn test_open_path_has_no_interior() {
        let mut path = PathSpec::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.line_to(10.0, 10.0);
        assert!(!path.contains(8.0, 2.0));
    }

    #[test]
    fn test_rect_padding_and_contains() {
        let rect = RectSpec::new(10.0, 10.0, 20.0, 20.0);
        let padded = rect.padded(4.0);
        assert_eq!(padded, RectSpec::new(6.0, 6.0, 28.0, 28.0));
        assert!(rect.contains(10.0, 30.0));
        assert!(!rect.contains(9.9, 15.0));
        assert_eq!(rect.center(), (20.0, 20.0));
    }

    #[test]
    fn test_text_never_hit() {
        let text = Primitive::Text(TextSpec {
            x: 0.0,
            y: 0.0,
            content: "#1".to_string(),
            font_size: 12.0,
            anchor: TextAnchor::Start,
        });
        assert!(!text.contains(0.0, 0.0));
    }
}
