//! SVG card writer.

use std::fmt::Write;

use super::card::{self, Shape, HEIGHT, WIDTH};
use crate::stats::WrappedStats;

const FONT_FAMILY: &str = "'JetBrains Mono', 'SFMono-Regular', Menlo, Consolas, monospace";

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn draw(out: &mut String, shape: &Shape) {
    // Writing into a String cannot fail.
    let _ = match shape {
        Shape::Rect {
            x,
            y,
            w,
            h,
            fill,
            radius,
        } => writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"/>"#,
            x,
            y,
            w,
            h,
            radius,
            fill.hex()
        ),
        Shape::Text {
            x,
            y,
            size,
            text,
            fill,
            bold,
        } => writeln!(
            out,
            r#"  <text x="{}" y="{}" font-size="{}" font-weight="{}" fill="{}" dominant-baseline="hanging">{}</text>"#,
            x,
            y,
            size,
            if *bold { 700 } else { 400 },
            fill.hex(),
            escape(text)
        ),
    };
}

/// The whole card as a standalone SVG document.
pub fn render_svg(stats: &WrappedStats) -> String {
    let shapes = card::layout(stats);
    let mut out = String::with_capacity(64 * shapes.len());
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}">"#,
        w = WIDTH,
        h = HEIGHT,
        font = FONT_FAMILY
    );
    let _ = writeln!(
        out,
        "  <title>{}</title>",
        escape(&format!("@{} - {} GitHub Wrapped", stats.login, stats.year))
    );
    for shape in &shapes {
        draw(&mut out, shape);
    }
    out.push_str("</svg>\n");
    out
}
