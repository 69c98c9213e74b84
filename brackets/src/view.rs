//! Per-match view-model: participants sorted into seed order, display name
//! and result-text fallbacks resolved, win and hover flags computed. The
//! renderable record every [`crate::render::MatchRenderer`] consumes.

use log::debug;

use crate::hover::{HoverState, HoverTarget};
use crate::style::BracketStyle;
use crate::{Match, MatchId, MatchState, Participant, ParticipantStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Top,
    Bottom,
}

/// One rendered side of a match box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideView {
    pub id: Option<String>,
    pub name: String,
    pub result_text: String,
    pub is_winner: bool,
    pub hovered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchView {
    pub match_id: MatchId,
    pub name: String,
    pub round_text: String,
    pub state: MatchState,
    pub row_index: usize,
    pub column_index: usize,
    pub top: SideView,
    pub bottom: SideView,
}

impl MatchView {
    /// Build the view-model for one match.
    ///
    /// `previous_bottom` is the prior round's bottom feed: a participant that
    /// came through it takes the bottom slot, so the top slot always shows
    /// the higher seed path.
    pub fn build(
        m: &Match,
        previous_bottom: Option<&Match>,
        row_index: usize,
        column_index: usize,
        style: &BracketStyle,
        hover: &HoverState,
    ) -> Self {
        if m.participants.len() > 2 {
            debug!("match {} carries {} participants, using the first 2", m.id, m.participants.len());
        }
        let mut participants: Vec<&Participant> = m.participants.iter().take(2).collect();
        participants.sort_by_key(|p| from_previous_bottom(p, previous_bottom));

        let real_count = m.real_participant_count();
        let mut sides = participants
            .iter()
            .map(|p| side_view(p, m, real_count, style, hover));

        let top = sides.next().unwrap_or_else(|| empty_side(m.state));
        let bottom = sides.next().unwrap_or_else(|| empty_side(m.state));

        Self {
            match_id: m.id,
            name: m.name.clone(),
            round_text: m.tournament_round_text.clone(),
            state: m.state,
            row_index,
            column_index,
            top,
            bottom,
        }
    }

    pub fn side(&self, slot: Slot) -> &SideView {
        match slot {
            Slot::Top => &self.top,
            Slot::Bottom => &self.bottom,
        }
    }

    /// Hover payload for one slot, ready to dispatch on pointer enter.
    /// `None` for unresolved slots — hovering a TBD box highlights nothing.
    pub fn hover_target(&self, slot: Slot) -> Option<HoverTarget> {
        let id = self.side(slot).id.clone()?;
        Some(HoverTarget {
            party_id: id,
            match_id: self.match_id,
            row_index: self.row_index,
            column_index: self.column_index,
        })
    }
}

/// Seed-order key: a participant present in the previous bottom match sorts
/// after one that is not (`false < true`), landing in the bottom slot.
fn from_previous_bottom(p: &Participant, previous_bottom: Option<&Match>) -> bool {
    match (p.real_id(), previous_bottom) {
        (Some(id), Some(prev)) => prev.has_participant(id),
        _ => false,
    }
}

fn side_view(
    p: &Participant,
    m: &Match,
    real_count: usize,
    style: &BracketStyle,
    hover: &HoverState,
) -> SideView {
    // A lone participant in a walked-over match won even when the input
    // never set the flag — the opponent simply never materialized.
    let auto_walk_over =
        m.state == MatchState::WalkOver && real_count < 2 && p.real_id().is_some();
    let is_winner =
        p.is_winner || auto_walk_over || p.status == Some(ParticipantStatus::WalkOver);

    let name = match &p.name {
        Some(name) => name.clone(),
        None => fallback_name(m.state),
    };

    let result_text = match &p.result_text {
        Some(text) => text.clone(),
        None if p.status == Some(ParticipantStatus::WalkOver) || auto_walk_over => {
            style.won_by_walk_over_text.clone()
        }
        None if p.status == Some(ParticipantStatus::NoShow) => {
            style.lost_by_no_show_text.clone()
        }
        None => String::new(),
    };

    SideView {
        id: p.real_id().map(str::to_string),
        name,
        result_text,
        is_winner,
        hovered: hover.is_hovered_party(p.real_id()),
    }
}

/// Placeholder side for a match with fewer than two participants.
fn empty_side(state: MatchState) -> SideView {
    SideView {
        name: fallback_name(state),
        ..Default::default()
    }
}

/// Blank once the match is decided — nobody else is coming; "TBD" while the
/// slot still waits on upstream results.
fn fallback_name(state: MatchState) -> String {
    if state.is_decided() {
        String::new()
    } else {
        "TBD".to_string()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn party(id: &str) -> Participant {
        Participant {
            id: Some(id.to_string()),
            name: Some(id.to_string()),
            ..Default::default()
        }
    }

    fn build(m: &Match, previous_bottom: Option<&Match>) -> MatchView {
        MatchView::build(m, previous_bottom, 0, 1, &BracketStyle::default(), &HoverState::default())
    }

    #[test]
    fn test_seed_order_places_bottom_feed_second() {
        let previous_bottom = Match {
            id: 2,
            participants: vec![party("T3"), party("T6")],
            ..Default::default()
        };
        let m = Match {
            id: 5,
            participants: vec![party("T3"), party("T7")],
            ..Default::default()
        };
        let view = build(&m, Some(&previous_bottom));
        assert_eq!(view.top.id.as_deref(), Some("T7"));
        assert_eq!(view.bottom.id.as_deref(), Some("T3"));
    }

    #[test]
    fn test_seed_order_is_stable_without_previous_match() {
        let m = Match {
            id: 5,
            participants: vec![party("T3"), party("T7")],
            ..Default::default()
        };
        let view = build(&m, None);
        assert_eq!(view.top.id.as_deref(), Some("T3"));
        assert_eq!(view.bottom.id.as_deref(), Some("T7"));
    }

    #[test]
    fn test_walk_over_inference_marks_lone_participant() {
        let m = Match {
            id: 5,
            state: MatchState::WalkOver,
            participants: vec![party("T4")],
            ..Default::default()
        };
        let view = build(&m, None);
        assert!(view.top.is_winner);
        assert_eq!(view.top.result_text, "Won by walkover");
        // The empty slot stays blank — the match is decided.
        assert_eq!(view.bottom.name, "");
        assert!(!view.bottom.is_winner);
    }

    #[test]
    fn test_walk_over_status_wins_with_result_text_fallback() {
        let mut winner = party("T1");
        winner.status = Some(ParticipantStatus::WalkOver);
        let mut loser = party("T2");
        loser.status = Some(ParticipantStatus::NoShow);
        let m = Match {
            id: 9,
            state: MatchState::WalkOver,
            participants: vec![winner, loser],
            ..Default::default()
        };
        let view = build(&m, None);
        assert!(view.top.is_winner);
        assert_eq!(view.top.result_text, "Won by walkover");
        assert!(!view.bottom.is_winner);
        assert_eq!(view.bottom.result_text, "Lost by no-show");
    }

    #[test]
    fn test_explicit_result_text_is_not_overridden() {
        let mut p = party("T1");
        p.status = Some(ParticipantStatus::WalkOver);
        p.result_text = Some("W".to_string());
        let m = Match {
            id: 9,
            state: MatchState::WalkOver,
            participants: vec![p],
            ..Default::default()
        };
        let view = build(&m, None);
        assert_eq!(view.top.result_text, "W");
    }

    #[test]
    fn test_pending_match_shows_tbd() {
        let m = Match { id: 3, ..Default::default() };
        let view = build(&m, None);
        assert_eq!(view.top.name, "TBD");
        assert_eq!(view.bottom.name, "TBD");
        assert_eq!(view.top.result_text, "");
        assert!(view.hover_target(Slot::Top).is_none());
    }

    #[test]
    fn test_no_party_side_is_blank() {
        let mut p = party("T5");
        p.name = None;
        p.status = Some(ParticipantStatus::NoParty);
        let m = Match {
            id: 3,
            state: MatchState::NoParty,
            participants: vec![p],
            ..Default::default()
        };
        let view = build(&m, None);
        assert_eq!(view.top.name, "");
        assert_eq!(view.top.result_text, "");
    }

    #[test]
    fn test_hover_flag_follows_state() {
        let m = Match {
            id: 5,
            participants: vec![party("T3"), party("T7")],
            ..Default::default()
        };
        let mut hover = HoverState::default();
        hover.apply(crate::hover::HoverAction::SetHoveredParty(Some(HoverTarget {
            party_id: "T7".to_string(),
            match_id: 5,
            row_index: 0,
            column_index: 1,
        })));
        let view =
            MatchView::build(&m, None, 0, 1, &BracketStyle::default(), &hover);
        assert!(!view.top.hovered);
        assert!(view.bottom.hovered);
    }

    #[test]
    fn test_hover_target_carries_grid_coordinates() {
        let m = Match {
            id: 5,
            participants: vec![party("T3")],
            ..Default::default()
        };
        let view =
            MatchView::build(&m, None, 2, 3, &BracketStyle::default(), &HoverState::default());
        let target = view.hover_target(Slot::Top).unwrap();
        assert_eq!(target.party_id, "T3");
        assert_eq!(target.match_id, 5);
        assert_eq!(target.row_index, 2);
        assert_eq!(target.column_index, 3);
    }
}
