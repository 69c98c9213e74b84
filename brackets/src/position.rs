//! Pure geometry: `(row_index, column_index, style) -> {x, y}` in pixels.
//!
//! Vertical spacing doubles per column because two child matches merge into
//! one parent; `vertical_starting_point` centers each parent over its two
//! children. All functions are total over finite inputs.

use crate::style::BracketStyle;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Translation applied to a whole bracket half (round header band, lower
/// bracket stacked below the upper, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// Vertical offset of row 0 in a column: `2^col * rh/2 - rh/2`.
pub fn vertical_starting_point(column_index: usize, row_height: f64) -> f64 {
    2f64.powi(column_index as i32) * (row_height / 2.0) - row_height / 2.0
}

/// Vertical spacing unit for a column: `2^col * rh`.
pub fn column_increment(column_index: usize, row_height: f64) -> f64 {
    2f64.powi(column_index as i32) * row_height
}

pub fn vertical_position(row_index: usize, column_index: usize, row_height: f64) -> f64 {
    column_increment(column_index, row_height) * row_index as f64
        + vertical_starting_point(column_index, row_height)
}

pub fn upper_bracket_position(
    row_index: usize,
    column_index: usize,
    style: &BracketStyle,
    offset: Offset,
) -> Point {
    Point {
        x: column_index as f64 * style.column_width() + style.canvas_padding + offset.x,
        y: vertical_position(row_index, column_index, style.row_height())
            + style.canvas_padding
            + offset.y,
    }
}

/// Effective vertical depth of a lower-bracket column.
///
/// The lower bracket progresses at half the upper bracket's rate (each round
/// pair merges two losers then absorbs one upper-bracket loser), so the raw
/// column index is halved. The result is capped at
/// `floor(log2(first_round_match_count))` — beyond that depth the spacing
/// formula would spread matches past the geometry the first round supports.
pub fn effective_lower_depth(column_index: usize, first_round_match_count: usize) -> usize {
    let half_rate = column_index.div_ceil(2);
    if first_round_match_count == 0 {
        half_rate
    } else {
        half_rate.min(first_round_match_count.ilog2() as usize)
    }
}

pub fn lower_bracket_position(
    row_index: usize,
    column_index: usize,
    style: &BracketStyle,
    offset: Offset,
    first_round_match_count: usize,
) -> Point {
    let depth = effective_lower_depth(column_index, first_round_match_count);
    Point {
        x: column_index as f64 * style.column_width() + style.canvas_padding + offset.x,
        y: vertical_position(row_index, depth, style.row_height())
            + style.canvas_padding
            + offset.y,
    }
}

/// The grand final sits between the two halves: its `y` scales the upper
/// bracket's height by the lower/upper height ratio so the match centers
/// against the taller half. Ratio degrades to 1 when the upper half is empty.
pub fn grand_final_position(
    column_index: usize,
    style: &BracketStyle,
    offset: Offset,
    game_height: f64,
    upper_bracket_height: f64,
    lower_bracket_height: f64,
) -> Point {
    let ratio = if upper_bracket_height > 0.0 {
        lower_bracket_height / upper_bracket_height
    } else {
        1.0
    };
    Point {
        x: column_index as f64 * style.column_width() + style.canvas_padding + offset.x,
        y: game_height * ratio - style.row_height() + style.canvas_padding + offset.y,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const RH: f64 = 80.0;

    #[test]
    fn test_vertical_starting_point_doubles_per_column() {
        assert_eq!(vertical_starting_point(0, RH), 0.0);
        assert_eq!(vertical_starting_point(1, RH), RH / 2.0);
        assert_eq!(vertical_starting_point(2, RH), 1.5 * RH);
        assert_eq!(vertical_starting_point(3, RH), 3.5 * RH);
    }

    #[test]
    fn test_column_increment() {
        assert_eq!(column_increment(0, RH), RH);
        assert_eq!(column_increment(1, RH), 2.0 * RH);
        assert_eq!(column_increment(2, RH), 4.0 * RH);
    }

    #[test]
    fn test_monotonic_spacing_within_column() {
        for col in 0..4 {
            let inc = column_increment(col, RH);
            for row in 0..4 {
                let a = vertical_position(row, col, RH);
                let b = vertical_position(row + 1, col, RH);
                assert_eq!(b - a, inc, "col {col} row {row}");
            }
        }
    }

    #[test]
    fn test_parent_centers_over_children() {
        // Parent at (row, col+1) must sit midway between children at
        // (2*row, col) and (2*row+1, col).
        for col in 0..3 {
            for row in 0..4 {
                let top = vertical_position(2 * row, col, RH);
                let bottom = vertical_position(2 * row + 1, col, RH);
                let parent = vertical_position(row, col + 1, RH);
                assert_eq!(parent, (top + bottom) / 2.0);
            }
        }
    }

    #[test]
    fn test_position_is_idempotent() {
        let style = BracketStyle::default();
        let a = upper_bracket_position(2, 1, &style, Offset::default());
        let b = upper_bracket_position(2, 1, &style, Offset::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_lower_depth_capping() {
        // first_round_match_count = 4 -> max depth 2; raw column 5 halves to
        // ceil(5/2) = 3 and must cap at 2.
        assert_eq!(effective_lower_depth(5, 4), 2);
        assert_eq!(effective_lower_depth(0, 4), 0);
        assert_eq!(effective_lower_depth(1, 4), 1);
        assert_eq!(effective_lower_depth(2, 4), 1);
        assert_eq!(effective_lower_depth(3, 4), 2);
        assert_eq!(effective_lower_depth(4, 4), 2);
    }

    #[test]
    fn test_lower_depth_non_power_of_two_counts() {
        // floor(log2) of 3, 5, 6 team feeds.
        assert_eq!(effective_lower_depth(4, 3), 1);
        assert_eq!(effective_lower_depth(6, 5), 2);
        assert_eq!(effective_lower_depth(6, 6), 2);
        // Zero first-round matches: no cap applies.
        assert_eq!(effective_lower_depth(7, 0), 4);
    }

    #[test]
    fn test_upper_position_applies_style_and_offset() {
        let style = BracketStyle::default();
        let offset = Offset { x: 10.0, y: 30.0 };
        let p = upper_bracket_position(0, 2, &style, offset);
        assert_eq!(p.x, 2.0 * style.column_width() + style.canvas_padding + 10.0);
        assert_eq!(
            p.y,
            vertical_starting_point(2, style.row_height()) + style.canvas_padding + 30.0
        );
    }

    #[test]
    fn test_grand_final_ratio_guard() {
        let style = BracketStyle::default();
        let p = grand_final_position(3, &style, Offset::default(), 400.0, 0.0, 200.0);
        assert!(p.y.is_finite());
        assert_eq!(p.y, 400.0 - style.row_height() + style.canvas_padding);
    }

    #[test]
    fn test_grand_final_scales_with_height_ratio() {
        let style = BracketStyle::default();
        let p = grand_final_position(3, &style, Offset::default(), 320.0, 320.0, 160.0);
        assert_eq!(p.y, 160.0 - style.row_height() + style.canvas_padding);
        assert_eq!(p.x, 3.0 * style.column_width() + style.canvas_padding);
    }
}
