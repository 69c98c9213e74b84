//! Top-level bracket assembly: headers, placed matches for both halves, the
//! grand final, and connector polylines, in one coordinate space.
//!
//! `BracketLayout::compute` is a pure function of the input bracket, style
//! and hover state; any renderer (SVG, terminal) consumes the result as-is.

use std::collections::HashMap;

use crate::graph::{BracketGraph, previous_matches_at};
use crate::hover::HoverState;
use crate::position::{
    Offset, Point, grand_final_position, lower_bracket_position, upper_bracket_position,
};
use crate::style::BracketStyle;
use crate::view::MatchView;
use crate::{DoubleElimination, Match, MatchId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BracketHalf {
    #[default]
    Upper,
    Lower,
    GrandFinal,
}

/// `{match_id, x, y}` plus the grid coordinates the position derives from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMatch {
    pub match_id: MatchId,
    pub position: Point,
    pub row_index: usize,
    pub column_index: usize,
    pub half: BracketHalf,
}

#[derive(Debug, Clone)]
pub struct LaidOutMatch {
    pub placed: PlacedMatch,
    pub view: MatchView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundHeader {
    pub label: String,
    pub x: f64,
    pub width: f64,
}

/// One winner-advancement line between two match boxes, as a polyline:
/// predecessor right edge, two elbow points, successor left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub from_match: MatchId,
    pub to_match: MatchId,
    pub points: [Point; 4],
    /// True when the hovered participant appears on both ends — hovering a
    /// team lights up its whole advancement path.
    pub highlighted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BracketLayout {
    pub headers: Vec<RoundHeader>,
    pub matches: Vec<LaidOutMatch>,
    pub connectors: Vec<Connector>,
    pub width: f64,
    pub height: f64,
}

impl BracketLayout {
    pub fn compute(
        bracket: &DoubleElimination,
        style: &BracketStyle,
        hover: &HoverState,
    ) -> Self {
        let upper_graph = BracketGraph::new(bracket.upper.clone());
        let lower_graph = BracketGraph::new(bracket.lower.clone());
        let mut upper_columns = upper_graph.columns();
        let lower_columns = lower_graph.columns();

        let row_height = style.row_height();
        let header_offset = style.header_offset();

        // The grand final is the sole match of the last upper column once a
        // lower bracket exists; it gets the between-halves position instead
        // of the regular exponential one.
        let grand_final = if !lower_columns.is_empty()
            && upper_columns.last().is_some_and(|col| col.len() == 1)
            && upper_columns.len() > 1
        {
            upper_columns.pop().map(|mut col| col.remove(0))
        } else {
            None
        };

        let upper_first = upper_columns.first().map_or(0, Vec::len);
        let lower_first = lower_columns.first().map_or(0, Vec::len);
        let upper_height = upper_first as f64 * row_height;
        let lower_height = lower_first as f64 * row_height;

        let upper_offset = Offset { x: 0.0, y: header_offset };
        let lower_offset = Offset { x: 0.0, y: header_offset + upper_height };

        let mut matches = Vec::new();

        for (ci, column) in upper_columns.iter().enumerate() {
            for (ri, m) in column.iter().enumerate() {
                let previous_bottom = previous_matches_at(&upper_columns, ci, ri * 2 + 1)
                    .map(|snippet| snippet.previous_bottom_match);
                matches.push(LaidOutMatch {
                    placed: PlacedMatch {
                        match_id: m.id,
                        position: upper_bracket_position(ri, ci, style, upper_offset),
                        row_index: ri,
                        column_index: ci,
                        half: BracketHalf::Upper,
                    },
                    view: MatchView::build(m, previous_bottom, ri, ci, style, hover),
                });
            }
        }

        for (ci, column) in lower_columns.iter().enumerate() {
            for (ri, m) in column.iter().enumerate() {
                // Lower-bracket rounds alternate between merging two losers
                // and absorbing one upper-bracket dropper; the continuing
                // side always comes through the last-ordered predecessor.
                let previous_bottom = lower_graph.previous_bottom(m.id);
                matches.push(LaidOutMatch {
                    placed: PlacedMatch {
                        match_id: m.id,
                        position: lower_bracket_position(
                            ri,
                            ci,
                            style,
                            lower_offset,
                            lower_first,
                        ),
                        row_index: ri,
                        column_index: ci,
                        half: BracketHalf::Lower,
                    },
                    view: MatchView::build(m, previous_bottom, ri, ci, style, hover),
                });
            }
        }

        let final_column = upper_columns.len().max(lower_columns.len());
        if let Some(m) = &grand_final {
            let previous_bottom = lower_graph
                .matches()
                .iter()
                .find(|l| l.next_match_id == Some(m.id));
            matches.push(LaidOutMatch {
                placed: PlacedMatch {
                    match_id: m.id,
                    position: grand_final_position(
                        final_column,
                        style,
                        upper_offset,
                        upper_height,
                        upper_height,
                        lower_height,
                    ),
                    row_index: 0,
                    column_index: final_column,
                    half: BracketHalf::GrandFinal,
                },
                view: MatchView::build(m, previous_bottom, 0, final_column, style, hover),
            });
        }

        let connectors = build_connectors(bracket, &matches, style, hover);

        let total_columns = if grand_final.is_some() {
            final_column + 1
        } else {
            upper_columns.len().max(lower_columns.len())
        };
        let headers = build_headers(total_columns, style);

        let width = total_columns as f64 * style.column_width() + 2.0 * style.canvas_padding;
        let height = header_offset
            + upper_height
            + lower_height
            + style.box_height
            + 2.0 * style.canvas_padding;

        Self { headers, matches, connectors, width, height }
    }

    pub fn placed(&self, id: MatchId) -> Option<&PlacedMatch> {
        self.matches
            .iter()
            .find(|lm| lm.placed.match_id == id)
            .map(|lm| &lm.placed)
    }
}

/// One connector per winner edge whose both endpoints were placed. Edges
/// into missing matches are skipped, not errors.
fn build_connectors(
    bracket: &DoubleElimination,
    matches: &[LaidOutMatch],
    style: &BracketStyle,
    hover: &HoverState,
) -> Vec<Connector> {
    let placed: HashMap<MatchId, &PlacedMatch> =
        matches.iter().map(|lm| (lm.placed.match_id, &lm.placed)).collect();
    let by_id: HashMap<MatchId, &Match> = bracket
        .upper
        .iter()
        .chain(bracket.lower.iter())
        .map(|m| (m.id, m))
        .collect();

    let mut connectors = Vec::new();
    for m in bracket.upper.iter().chain(bracket.lower.iter()) {
        let Some(next_id) = m.next_match_id else { continue };
        let (Some(from), Some(to)) = (placed.get(&m.id), placed.get(&next_id)) else {
            continue;
        };
        let Some(next) = by_id.get(&next_id) else { continue };

        let start = Point {
            x: from.position.x + style.width,
            y: from.position.y + style.box_height / 2.0,
        };
        let end = Point {
            x: to.position.x,
            y: to.position.y + style.box_height / 2.0,
        };
        let elbow_x = (start.x + end.x) / 2.0;

        let highlighted = hover
            .party_id
            .as_deref()
            .is_some_and(|id| m.has_participant(id) && next.has_participant(id));

        connectors.push(Connector {
            from_match: m.id,
            to_match: next_id,
            points: [
                start,
                Point { x: elbow_x, y: start.y },
                Point { x: elbow_x, y: end.y },
                end,
            ],
            highlighted,
        });
    }
    connectors
}

fn build_headers(total_columns: usize, style: &BracketStyle) -> Vec<RoundHeader> {
    if !style.round_header.is_shown {
        return Vec::new();
    }
    (0..total_columns)
        .map(|ci| RoundHeader {
            label: style.round_title(ci + 1, total_columns),
            x: ci as f64 * style.column_width() + style.canvas_padding,
            width: style.width,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Participant;
    use crate::hover::{HoverAction, HoverTarget};
    use crate::position::vertical_position;

    fn named(id: MatchId, name: &str, next: Option<MatchId>) -> Match {
        Match {
            id,
            name: name.to_string(),
            next_match_id: next,
            ..Default::default()
        }
    }

    fn with_parties(mut m: Match, ids: &[&str]) -> Match {
        m.participants = ids
            .iter()
            .map(|id| Participant {
                id: Some(id.to_string()),
                name: Some(id.to_string()),
                ..Default::default()
            })
            .collect();
        m
    }

    /// 4 first-round matches, 2 semis, 1 final — single-elimination feed.
    fn upper_four_two_one() -> DoubleElimination {
        DoubleElimination {
            upper: vec![
                named(1, "Match 1", Some(5)),
                named(2, "Match 2", Some(5)),
                named(3, "Match 3", Some(6)),
                named(4, "Match 4", Some(6)),
                named(5, "Semi 1", Some(7)),
                named(6, "Semi 2", Some(7)),
                named(7, "Final", None),
            ],
            lower: Vec::new(),
        }
    }

    #[test]
    fn test_end_to_end_columns_and_final_centering() {
        let style = BracketStyle::default();
        let layout = BracketLayout::compute(
            &upper_four_two_one(),
            &style,
            &HoverState::default(),
        );

        let per_column = |ci: usize| {
            layout
                .matches
                .iter()
                .filter(|lm| lm.placed.column_index == ci)
                .count()
        };
        assert_eq!(per_column(0), 4);
        assert_eq!(per_column(1), 2);
        assert_eq!(per_column(2), 1);

        // The final centers over the two semis.
        let y = |id: MatchId| layout.placed(id).unwrap().position.y;
        assert_eq!(y(7), (y(5) + y(6)) / 2.0);

        // First column rows step by exactly one row height.
        let rh = style.row_height();
        assert_eq!(y(2) - y(1), rh);
        assert_eq!(y(3) - y(2), rh);
        assert_eq!(y(4) - y(3), rh);
    }

    #[test]
    fn test_connectors_follow_winner_edges() {
        let style = BracketStyle::default();
        let layout = BracketLayout::compute(
            &upper_four_two_one(),
            &style,
            &HoverState::default(),
        );
        assert_eq!(layout.connectors.len(), 6);

        let c = layout
            .connectors
            .iter()
            .find(|c| c.from_match == 1 && c.to_match == 5)
            .unwrap();
        let from = layout.placed(1).unwrap();
        let to = layout.placed(5).unwrap();
        assert_eq!(c.points[0].x, from.position.x + style.width);
        assert_eq!(c.points[3].x, to.position.x);
        assert_eq!(c.points[1].x, c.points[2].x);
        assert!(!c.highlighted);
    }

    #[test]
    fn test_hover_highlights_advancement_path_only() {
        let mut bracket = upper_four_two_one();
        bracket.upper[0] = with_parties(bracket.upper[0].clone(), &["T1", "T8"]);
        bracket.upper[4] = with_parties(bracket.upper[4].clone(), &["T1", "T4"]);
        bracket.upper[6] = with_parties(bracket.upper[6].clone(), &["T1"]);

        let mut hover = HoverState::default();
        hover.apply(HoverAction::SetHoveredParty(Some(HoverTarget {
            party_id: "T1".to_string(),
            match_id: 5,
            row_index: 0,
            column_index: 1,
        })));

        let layout = BracketLayout::compute(&bracket, &BracketStyle::default(), &hover);
        let highlighted: Vec<(MatchId, MatchId)> = layout
            .connectors
            .iter()
            .filter(|c| c.highlighted)
            .map(|c| (c.from_match, c.to_match))
            .collect();
        // T1 advanced 1 -> 5 -> 7; nothing else lights up.
        assert_eq!(highlighted, vec![(1, 5), (5, 7)]);
    }

    #[test]
    fn test_dangling_next_match_skips_connector() {
        let bracket = DoubleElimination {
            upper: vec![named(1, "Match 1", Some(404)), named(2, "Match 2", None)],
            lower: Vec::new(),
        };
        let layout =
            BracketLayout::compute(&bracket, &BracketStyle::default(), &HoverState::default());
        assert!(layout.connectors.is_empty());
    }

    #[test]
    fn test_empty_bracket_produces_empty_layout() {
        let layout = BracketLayout::compute(
            &DoubleElimination::default(),
            &BracketStyle::default(),
            &HoverState::default(),
        );
        assert!(layout.matches.is_empty());
        assert!(layout.connectors.is_empty());
        assert!(layout.headers.is_empty());
    }

    /// Minimal 4-team double elimination: 2 upper rounds, 2 lower rounds,
    /// grand final fed by both halves.
    fn four_team_double_elim() -> DoubleElimination {
        DoubleElimination {
            upper: vec![
                named(1, "UB Match 1", Some(3)),
                named(2, "UB Match 2", Some(3)),
                named(3, "UB Final", Some(6)),
                named(6, "Grand Final", None),
            ],
            lower: vec![
                named(4, "LB Match 1", Some(5)),
                named(5, "LB Final", Some(6)),
            ],
        }
    }

    #[test]
    fn test_double_elim_layout_shape() {
        let style = BracketStyle::default();
        let layout = BracketLayout::compute(
            &four_team_double_elim(),
            &style,
            &HoverState::default(),
        );

        let half = |id: MatchId| layout.placed(id).unwrap().half;
        assert_eq!(half(1), BracketHalf::Upper);
        assert_eq!(half(3), BracketHalf::Upper);
        assert_eq!(half(4), BracketHalf::Lower);
        assert_eq!(half(6), BracketHalf::GrandFinal);

        // Lower bracket sits below the upper one.
        let lowest_upper = layout
            .matches
            .iter()
            .filter(|lm| lm.placed.half == BracketHalf::Upper)
            .map(|lm| lm.placed.position.y)
            .fold(f64::MIN, f64::max);
        let lb = layout.placed(4).unwrap().position.y;
        assert!(lb > lowest_upper);

        // The grand final column lies right of both halves, and receives
        // connectors from the upper final and the lower final.
        assert_eq!(layout.placed(6).unwrap().column_index, 2);
        let into_final: Vec<MatchId> = layout
            .connectors
            .iter()
            .filter(|c| c.to_match == 6)
            .map(|c| c.from_match)
            .collect();
        assert_eq!(into_final.len(), 2);
        assert!(into_final.contains(&3));
        assert!(into_final.contains(&5));
    }

    #[test]
    fn test_lower_positions_use_depth_capped_geometry() {
        let style = BracketStyle::default();
        let layout = BracketLayout::compute(
            &four_team_double_elim(),
            &style,
            &HoverState::default(),
        );
        let rh = style.row_height();
        let header = style.header_offset();
        let upper_height = 2.0 * rh; // 2 first-round upper matches
        // LB column 1 has effective depth min(ceil(1/2), log2(1)) = 0.
        let expected = vertical_position(0, 0, rh) + style.canvas_padding + header + upper_height;
        assert_eq!(layout.placed(5).unwrap().position.y, expected);
    }

    #[test]
    fn test_headers_cover_every_column_including_final() {
        let style = BracketStyle::default();
        let layout = BracketLayout::compute(
            &four_team_double_elim(),
            &style,
            &HoverState::default(),
        );
        let labels: Vec<&str> = layout.headers.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["Round 1", "Semi-final", "Final"]);

        let mut hidden = BracketStyle::default();
        hidden.round_header.is_shown = false;
        let layout =
            BracketLayout::compute(&four_team_double_elim(), &hidden, &HoverState::default());
        assert!(layout.headers.is_empty());
    }

    #[test]
    fn test_layout_is_deterministic() {
        let style = BracketStyle::default();
        let a = BracketLayout::compute(&four_team_double_elim(), &style, &HoverState::default());
        let b = BracketLayout::compute(&four_team_double_elim(), &style, &HoverState::default());
        let pa: Vec<&PlacedMatch> = a.matches.iter().map(|lm| &lm.placed).collect();
        let pb: Vec<&PlacedMatch> = b.matches.iter().map(|lm| &lm.placed).collect();
        assert_eq!(pa, pb);
        assert_eq!(a.connectors, b.connectors);
    }
}
