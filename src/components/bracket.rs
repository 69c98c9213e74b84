use de_brackets::hover::HoverState;
use de_brackets::layout::{BracketLayout, Connector, PlacedMatch};
use de_brackets::render::{MatchRenderer, render_matches};
use de_brackets::style::BracketStyle;
use de_brackets::view::{MatchView, SideView, Slot};
use de_brackets::{DoubleElimination, MatchId};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

use crate::components::theme::{Theme, UiColor, resolve};

// ---------------------------------------------------------------------------
// Cell-unit layout style
// ---------------------------------------------------------------------------

/// Match cell width in terminal columns.
pub const CELL_W: f64 = 24.0;
/// Rows per match cell: top side, label line, bottom side.
pub const CELL_H: f64 = 3.0;
/// Width of the connector zone between adjacent columns.
pub const CONNECTOR_ZONE: f64 = 4.0;

/// The core layout engine runs in pixels; the terminal feeds it cell units
/// through the same style struct. Every derived distance stays integral so
/// the `f64 -> row/column` casts below are exact.
pub fn cell_style() -> BracketStyle {
    let mut style = BracketStyle::default();
    style.width = CELL_W;
    style.box_height = CELL_H;
    style.canvas_padding = 0.0;
    style.space_between_columns = CONNECTOR_ZONE;
    style.space_between_rows = 1.0;
    style.round_header.height = 1.0;
    style
}

// ---------------------------------------------------------------------------
// DoubleElimView widget
// ---------------------------------------------------------------------------

/// Renders the whole double-elimination bracket: round headers, upper half,
/// lower half stacked below, grand final, and box-drawing connectors with
/// the hovered advancement path in the highlight color.
pub struct DoubleElimView<'a> {
    pub bracket: &'a DoubleElimination,
    pub hover: &'a HoverState,
    pub selected_match: Option<MatchId>,
    pub selected_slot: Slot,
    /// Vertical scroll offset in terminal rows.
    pub scroll_offset: u16,
    pub theme: Theme,
}

impl<'a> Widget for DoubleElimView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CELL_W as u16 + 2 || area.height < CELL_H as u16 {
            return;
        }

        let style = cell_style();
        let layout = BracketLayout::compute(self.bracket, &style, self.hover);

        draw_headers(&layout, area, self.scroll_offset, self.theme, buf);

        // Connectors first; match cells overwrite the junction ends.
        for c in &layout.connectors {
            draw_connector(c, area, self.scroll_offset, self.theme, buf);
        }

        let mut cells = CellMatchRenderer {
            buf,
            area,
            scroll: self.scroll_offset,
            theme: self.theme,
            selected_match: self.selected_match,
            selected_slot: self.selected_slot,
        };
        render_matches(&layout, &style, &mut cells);
    }
}

fn draw_headers(layout: &BracketLayout, area: Rect, scroll: u16, theme: Theme, buf: &mut Buffer) {
    let style = resolve(UiColor::Accent, theme);
    for h in &layout.headers {
        let pad = ((h.width as usize).saturating_sub(h.label.chars().count())) / 2;
        put_string(buf, area, scroll, h.x as i32 + pad as i32, 0, &h.label, style);
    }
}

// ---------------------------------------------------------------------------
// Match cells
// ---------------------------------------------------------------------------

struct CellMatchRenderer<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    scroll: u16,
    theme: Theme,
    selected_match: Option<MatchId>,
    selected_slot: Slot,
}

impl MatchRenderer for CellMatchRenderer<'_> {
    fn render_match(&mut self, view: &MatchView, placed: &PlacedMatch, style: &BracketStyle) {
        let x = placed.position.x as i32;
        let y = placed.position.y as i32;
        let width = style.width as usize;
        let selected = self.selected_match == Some(view.match_id);

        for (dy, slot) in [(0, Slot::Top), (2, Slot::Bottom)] {
            let side = view.side(slot);
            let line = format_side_line(side, width);
            let mut line_style = side_style(side, self.theme);
            if selected && slot == self.selected_slot {
                line_style = line_style.add_modifier(Modifier::REVERSED);
            }
            put_string(self.buf, self.area, self.scroll, x, y + dy, &line, line_style);
        }

        let label = format!(" {}", truncate(&view.name, width.saturating_sub(2)));
        let label_style = if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            resolve(UiColor::Dim, self.theme)
        };
        put_string(
            self.buf,
            self.area,
            self.scroll,
            x,
            y + 1,
            &format!("{label:<width$}"),
            label_style,
        );
    }
}

fn side_style(side: &SideView, theme: Theme) -> Style {
    if side.is_winner {
        resolve(UiColor::Winner, theme)
    } else if side.hovered {
        resolve(UiColor::Highlight, theme).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// `"name        result "` padded to exactly `width` chars.
fn format_side_line(side: &SideView, width: usize) -> String {
    let result = truncate(&side.result_text, width.saturating_sub(4));
    let name_w = width.saturating_sub(result.chars().count() + 2);
    let name = truncate(&side.name, name_w);
    format!(" {name:<name_w$}{result} ")
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

// ---------------------------------------------------------------------------
// Connectors
// ---------------------------------------------------------------------------

/// Draw one winner-edge polyline with box-drawing characters:
///
/// ```text
///  from ──┐
///         │
///         └── to
/// ```
fn draw_connector(c: &Connector, area: Rect, scroll: u16, theme: Theme, buf: &mut Buffer) {
    let style = if c.highlighted {
        resolve(UiColor::Highlight, theme).add_modifier(Modifier::BOLD)
    } else {
        resolve(UiColor::Dim, theme)
    };

    let sx = c.points[0].x as i32;
    let r1 = c.points[0].y as i32;
    let ex = c.points[1].x as i32;
    let endx = c.points[3].x as i32;
    let r2 = c.points[3].y as i32;

    for x in sx..ex {
        put_char(buf, area, scroll, x, r1, '─', style);
    }
    if r1 == r2 {
        for x in ex..endx {
            put_char(buf, area, scroll, x, r1, '─', style);
        }
        return;
    }

    let (corner_start, corner_end) = if r2 > r1 { ('┐', '└') } else { ('┘', '┌') };
    put_char(buf, area, scroll, ex, r1, corner_start, style);
    for row in (r1.min(r2) + 1)..r1.max(r2) {
        put_char(buf, area, scroll, ex, row, '│', style);
    }
    // Both feeds of a parent share this cell; merge into a T-junction.
    let corner_end = match screen_pos(area, scroll, ex, r2)
        .and_then(|pos| buf.cell(pos))
        .map(|cell| cell.symbol())
    {
        Some("└") | Some("┌") | Some("│") => '├',
        _ => corner_end,
    };
    put_char(buf, area, scroll, ex, r2, corner_end, style);
    for x in (ex + 1)..endx {
        put_char(buf, area, scroll, x, r2, '─', style);
    }
}

// ---------------------------------------------------------------------------
// Buffer helpers — bracket-relative coordinates, scroll + clip applied
// ---------------------------------------------------------------------------

fn screen_pos(area: Rect, scroll: u16, x: i32, row: i32) -> Option<(u16, u16)> {
    if x < 0 || row < 0 {
        return None;
    }
    let rel_row = (row as u16).checked_sub(scroll)?;
    if rel_row >= area.height || x as u16 >= area.width {
        return None;
    }
    Some((area.x + x as u16, area.y + rel_row))
}

fn put_char(buf: &mut Buffer, area: Rect, scroll: u16, x: i32, row: i32, ch: char, style: Style) {
    let Some((sx, sy)) = screen_pos(area, scroll, x, row) else {
        return;
    };
    if let Some(cell) = buf.cell_mut((sx, sy)) {
        cell.set_char(ch);
        cell.set_style(style);
    }
}

fn put_string(
    buf: &mut Buffer,
    area: Rect,
    scroll: u16,
    x: i32,
    row: i32,
    text: &str,
    style: Style,
) {
    for (i, ch) in text.chars().enumerate() {
        put_char(buf, area, scroll, x + i as i32, row, ch, style);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
