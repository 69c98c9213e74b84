//! Shared hover/interaction state: which participant is under the pointer,
//! and where. One instance per rendered bracket — never process-wide.

use crate::MatchId;

/// Payload for a hover update: the participant row the pointer entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverTarget {
    pub party_id: String,
    pub match_id: MatchId,
    pub row_index: usize,
    pub column_index: usize,
}

/// The single action the reducer accepts. A `None` payload clears the state
/// (pointer leave). Unknown action types are unrepresentable here — the
/// exhaustive enum stands in for the defensive unreachable branch.
#[derive(Debug, Clone)]
pub enum HoverAction {
    SetHoveredParty(Option<HoverTarget>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    pub match_id: Option<MatchId>,
    pub party_id: Option<String>,
    pub column_index: Option<usize>,
    pub row_index: Option<usize>,
}

impl HoverState {
    /// Apply an action wholesale: all four fields update together.
    pub fn apply(&mut self, action: HoverAction) {
        match action {
            HoverAction::SetHoveredParty(Some(target)) => {
                self.match_id = Some(target.match_id);
                self.party_id = Some(target.party_id);
                self.column_index = Some(target.column_index);
                self.row_index = Some(target.row_index);
            }
            HoverAction::SetHoveredParty(None) => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_hovered_party(&self, party_id: Option<&str>) -> bool {
        match (self.party_id.as_deref(), party_id) {
            (Some(hovered), Some(id)) => hovered == id,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
