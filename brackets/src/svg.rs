//! SVG backend: turns a [`BracketLayout`] into a standalone SVG document.
//! Round-header band, connector polylines (highlight-aware), and match boxes
//! via the [`MatchRenderer`] strategy.

use std::fmt::Write;

use crate::hover::HoverState;
use crate::layout::{BracketLayout, PlacedMatch};
use crate::render::{MatchRenderer, render_matches};
use crate::style::BracketStyle;
use crate::view::{MatchView, SideView};
use crate::DoubleElimination;

const BOX_FILL: &str = "#1a202c";
const BOX_STROKE: &str = "#4a5568";
const NAME_COLOR: &str = "#e2e8f0";
const RESULT_COLOR: &str = "#a0aec0";
const WINNER_COLOR: &str = "#68d391";

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Compute the layout and emit the whole document in one call.
pub fn render_svg(bracket: &DoubleElimination, style: &BracketStyle, hover: &HoverState) -> String {
    let layout = BracketLayout::compute(bracket, style, hover);
    document(&layout, style)
}

pub fn document(layout: &BracketLayout, style: &BracketStyle) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        layout.width, layout.height, layout.width, layout.height
    );
    out.push('\n');

    header_band(&mut out, layout, style);
    connectors(&mut out, layout, style);

    let mut boxes = SvgMatchBox::default();
    render_matches(layout, style, &mut boxes);
    out.push_str(&boxes.out);

    out.push_str("</svg>\n");
    out
}

fn header_band(out: &mut String, layout: &BracketLayout, style: &BracketStyle) {
    let header = &style.round_header;
    if !header.is_shown || layout.headers.is_empty() {
        return;
    }
    for h in &layout.headers {
        let cx = h.x + h.width / 2.0;
        let cy = header.height / 2.0;
        let _ = writeln!(
            out,
            r#"<rect x="{:.1}" y="0" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            h.x, h.width, header.height, header.background_color
        );
        let _ = writeln!(
            out,
            r#"<text x="{cx:.1}" y="{cy:.1}" dominant-baseline="central" text-anchor="middle" font-family="{}" font-size="{:.0}" fill="{}">{}</text>"#,
            header.font_family,
            header.font_size,
            header.font_color,
            escape(&h.label)
        );
    }
}

fn connectors(out: &mut String, layout: &BracketLayout, style: &BracketStyle) {
    for c in &layout.connectors {
        let points: Vec<String> = c
            .points
            .iter()
            .map(|p| format!("{:.1},{:.1}", p.x, p.y))
            .collect();
        let (stroke, width) = if c.highlighted {
            (style.connector_color_highlight.as_str(), 2.5)
        } else {
            (style.connector_color.as_str(), 1.5)
        };
        let _ = writeln!(
            out,
            r#"<polyline points="{}" fill="none" stroke="{stroke}" stroke-width="{width}"/>"#,
            points.join(" ")
        );
    }
}

// ---------------------------------------------------------------------------
// Match boxes
// ---------------------------------------------------------------------------

/// [`MatchRenderer`] that appends one `<g>` per match: outer rect, divider,
/// and a name/result line per side.
#[derive(Debug, Default)]
pub struct SvgMatchBox {
    out: String,
}

impl MatchRenderer for SvgMatchBox {
    fn render_match(&mut self, view: &MatchView, placed: &PlacedMatch, style: &BracketStyle) {
        let x = placed.position.x;
        let y = placed.position.y;
        let w = style.width;
        let h = style.box_height;
        let half = h / 2.0;

        let _ = writeln!(self.out, r#"<g data-match-id="{}">"#, view.match_id);
        let _ = writeln!(
            self.out,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" rx="2" fill="{BOX_FILL}" stroke="{BOX_STROKE}"/>"#
        );
        let _ = writeln!(
            self.out,
            r#"<line x1="{x:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{BOX_STROKE}"/>"#,
            y + half,
            x + w,
            y + half
        );
        side_line(&mut self.out, &view.top, x, y + half / 2.0, w, style);
        side_line(&mut self.out, &view.bottom, x, y + half + half / 2.0, w, style);
        let _ = writeln!(self.out, "</g>");
    }
}

fn side_line(out: &mut String, side: &SideView, x: f64, cy: f64, w: f64, style: &BracketStyle) {
    let name_color = if side.is_winner {
        WINNER_COLOR
    } else if side.hovered {
        style.connector_color_highlight.as_str()
    } else {
        NAME_COLOR
    };
    let weight = if side.is_winner { "bold" } else { "normal" };
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{cy:.1}" dominant-baseline="central" font-family="monospace" font-size="13" font-weight="{weight}" fill="{name_color}">{}</text>"#,
        x + 6.0,
        escape(&side.name)
    );
    if !side.result_text.is_empty() {
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{cy:.1}" dominant-baseline="central" text-anchor="end" font-family="monospace" font-size="13" fill="{RESULT_COLOR}">{}</text>"#,
            x + w - 6.0,
            escape(&side.result_text)
        );
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
