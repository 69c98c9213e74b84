//! Pluggable match rendering. Callers supply a [`MatchRenderer`] and get a
//! callback per laid-out match box; connectors and headers stay with the
//! backend since their shape is backend-specific (SVG polylines vs.
//! box-drawing characters).

use crate::layout::{BracketLayout, PlacedMatch};
use crate::style::BracketStyle;
use crate::view::MatchView;

/// Strategy interface for drawing one match box from its view-model.
pub trait MatchRenderer {
    fn render_match(&mut self, view: &MatchView, placed: &PlacedMatch, style: &BracketStyle);
}

/// Walk a layout, handing every match to the renderer in placement order.
pub fn render_matches<R: MatchRenderer>(
    layout: &BracketLayout,
    style: &BracketStyle,
    renderer: &mut R,
) {
    for lm in &layout.matches {
        renderer.render_match(&lm.view, &lm.placed, style);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
