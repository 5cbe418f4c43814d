//! SVG serialization of draw lists.

use std::fmt::Write;

use crate::draw_list::{DrawItem, DrawList, Filter};
use crate::shape::{Primitive, TextAnchor};

impl DrawList {
    /// Serialize the list as a standalone `<svg>` element sized to the surface.
    ///
    /// Output is a pure function of the list, so identical lists produce
    /// identical markup.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) -> std::fmt::Result {
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;

        let filters = self.filters();
        if !filters.is_empty() {
            out.push_str("<defs>");
            for filter in filters {
                write_filter(out, filter)?;
            }
            out.push_str("</defs>");
        }

        for item in self.items() {
            write_item(out, item)?;
        }

        out.push_str("</svg>");
        Ok(())
    }
}

fn write_filter(out: &mut String, filter: Filter) -> std::fmt::Result {
    write!(
        out,
        r#"<filter id="{}" x="-30%" y="-30%" width="160%" height="160%"><feGaussianBlur stdDeviation="{}" result="coloredBlur"/><feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#,
        filter.id(),
        filter.blur()
    )
}

fn write_item(out: &mut String, item: &DrawItem) -> std::fmt::Result {
    match &item.primitive {
        Primitive::Path(path) => write!(out, r#"<path d="{}""#, path.to_svg_data())?,
        Primitive::Rect(rect) => {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                rect.x, rect.y, rect.width, rect.height
            )?;
            if rect.rx > 0.0 {
                write!(out, r#" rx="{}""#, rect.rx)?;
            }
        }
        Primitive::Circle(circle) => write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}""#,
            circle.cx, circle.cy, circle.r
        )?,
        Primitive::Text(text) => {
            let anchor = match text.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
            };
            write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" text-anchor="{}""#,
                text.x, text.y, text.font_size, anchor
            )?;
        }
    }

    write_paint(out, item)?;

    if let Some(key) = item.key {
        write!(out, r#" data-key="{}""#, key)?;
    }
    if !item.interactive {
        out.push_str(r#" pointer-events="none""#);
    }

    match &item.primitive {
        Primitive::Text(text) => write!(out, ">{}</text>", escape(&text.content)),
        _ => {
            out.push_str("/>");
            Ok(())
        }
    }
}

fn write_paint(out: &mut String, item: &DrawItem) -> std::fmt::Result {
    match item.fill {
        Some(fill) => write!(
            out,
            r#" fill="{}" fill-opacity="{}""#,
            fill.color.to_hex(),
            fill.opacity
        )?,
        None => out.push_str(r#" fill="none""#),
    }

    if let Some(stroke) = item.stroke {
        write!(
            out,
            r#" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linejoin="round""#,
            stroke.color.to_hex(),
            stroke.opacity,
            stroke.width
        )?;
        if let Some((dash, gap)) = stroke.dash {
            write!(out, r#" stroke-dasharray="{} {}""#, dash, gap)?;
        }
    }

    if let Some(filter) = item.filter {
        write!(out, r#" filter="url(#{})""#, filter.id())?;
    }
    Ok(())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::draw_list::{Fill, ItemRole, Stroke};
    use crate::shape::{PathSpec, RectSpec, TextSpec};

    #[test]
    fn test_empty_list_is_valid_svg() {
        let svg = DrawList::new(200.0, 100.0).to_svg();
        assert_eq!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100"></svg>"#
        );
    }

    #[test]
    fn test_path_item_markup() {
        let mut path = PathSpec::new();
        path.move_to(0.0, 0.0);
        path.line_to(4.0, 0.0);
        path.line_to(4.0, 4.0);
        path.close();

        let mut list = DrawList::new(10.0, 10.0);
        list.push(
            DrawItem::new(ItemRole::Mask, Primitive::Path(path))
                .key(7)
                .fill(Fill::new(Color::from_rgb_u32(0x0066FF), 0.15))
                .stroke(Stroke::new(Color::from_rgb_u32(0x0066FF), 0.8, 2.5))
                .filter(Some(Filter::SelectedGlow))
                .interactive(true),
        );

        let svg = list.to_svg();
        assert!(svg.contains(r#"<filter id="selectedGlow""#));
        assert!(svg.contains(
            r##"<path d="M 0 0 L 4 0 L 4 4 Z" fill="#0066FF" fill-opacity="0.15" stroke="#0066FF" stroke-opacity="0.8" stroke-width="2.5" stroke-linejoin="round" filter="url(#selectedGlow)" data-key="7"/>"##
        ));
    }

    #[test]
    fn test_dashed_rect_and_escaped_text() {
        let mut list = DrawList::new(10.0, 10.0);
        list.push(
            DrawItem::new(
                ItemRole::BoundingBox,
                Primitive::Rect(RectSpec::new(1.0, 2.0, 3.0, 4.0)),
            )
            .stroke(Stroke::new(Color::WHITE, 1.0, 2.0).dashed(4.0, 4.0)),
        );
        list.push(
            DrawItem::new(
                ItemRole::LabelText,
                Primitive::Text(TextSpec {
                    x: 1.0,
                    y: 2.0,
                    content: "a<b".to_string(),
                    font_size: 12.0,
                    anchor: TextAnchor::Start,
                }),
            )
            .fill(Fill::new(Color::WHITE, 1.0)),
        );

        let svg = list.to_svg();
        assert!(svg.contains(r#"stroke-dasharray="4 4""#));
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(">a&lt;b</text>"));
        assert!(svg.contains(r#"pointer-events="none""#));
    }
}
