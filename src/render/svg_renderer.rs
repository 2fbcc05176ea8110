use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Serializes frames into a standalone SVG document.
///
/// Each `render` call replaces the previous document. Bars are emitted before
/// axis lines and labels so axes paint on top.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    class_name: String,
    document: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            class_name: "bar-chart".to_owned(),
            document: String::new(),
        }
    }

    /// CSS class set on the root `<svg>` element.
    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_frame(&self, frame: &RenderFrame) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        let width = number(frame.size.width);
        let height = number(frame.size.height);
        writeln!(
            out,
            r#"<svg xmlns="{SVG_NAMESPACE}" class="{}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#,
            escape(&self.class_name),
        )?;

        for rect in &frame.rects {
            writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
                number(rect.x),
                number(rect.y),
                number(rect.width),
                number(rect.height),
                paint("fill", rect.fill_color),
            )?;
        }

        for line in &frame.lines {
            writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}"{}/>"#,
                number(line.x1),
                number(line.y1),
                number(line.x2),
                number(line.y2),
                number(line.stroke_width),
                paint("stroke", line.color),
            )?;
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            let transform = if text.rotation_deg == 0.0 {
                String::new()
            } else {
                format!(
                    r#" transform="rotate({} {} {})""#,
                    number(text.rotation_deg),
                    number(text.x),
                    number(text.y)
                )
            };
            writeln!(
                out,
                r#"  <text x="{}" y="{}" font-size="{}" text-anchor="{anchor}"{}{transform}>{}</text>"#,
                number(text.x),
                number(text.y),
                number(text.font_size_px),
                paint("fill", text.color),
                escape(&text.text),
            )?;
        }

        out.push_str("</svg>\n");
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.document = self
            .write_frame(frame)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;
        Ok(())
    }
}

fn paint(attribute: &str, color: Color) -> String {
    let base = format!(r#" {attribute}="{}""#, color.with_opaque_alpha().to_hex());
    if color.alpha < 1.0 {
        format!(r#"{base} {attribute}-opacity="{}""#, number(color.alpha))
    } else {
        base
    }
}

/// Up to three decimals, no trailing zeros, no negative zero.
fn number(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape, number};

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(number(730.0), "730");
        assert_eq!(number(12.5), "12.5");
        assert_eq!(number(1.0 / 3.0), "0.333");
        assert_eq!(number(-0.0001), "0");
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
