use de_brackets::graph::BracketGraph;
use de_brackets::hover::{HoverAction, HoverState};
use de_brackets::layout::{BracketHalf, BracketLayout};
use de_brackets::view::Slot;
use de_brackets::{DoubleElimination, Match, MatchId};

use crate::components::bracket::cell_style;

// ---------------------------------------------------------------------------
// Bracket view state
// ---------------------------------------------------------------------------

/// Keyboard-driven selection plus the per-session hover reducer. Moving the
/// selection dispatches `SetHoveredParty`, the terminal stand-in for pointer
/// enter; clearing the selection is pointer leave.
#[derive(Debug, Default)]
pub struct BracketViewState {
    pub bracket: Option<DoubleElimination>,
    /// Display name of the loaded source (file path), for the title bar.
    pub source: Option<String>,
    /// Derived per-half columns, first round at index 0. The grand final
    /// rides as the last upper column for navigation purposes.
    upper_columns: Vec<Vec<Match>>,
    lower_columns: Vec<Vec<Match>>,
    pub selected_half: BracketHalf,
    pub selected_column: usize,
    pub selected_row: usize,
    pub selected_slot: Slot,
    pub hover: HoverState,
    pub scroll_offset: u16,
}

impl BracketViewState {
    /// Store a newly loaded bracket, derive the columns, reset selection.
    pub fn load(&mut self, bracket: DoubleElimination, source: String) {
        self.upper_columns = BracketGraph::new(bracket.upper.clone()).columns();
        self.lower_columns = BracketGraph::new(bracket.lower.clone()).columns();
        self.bracket = Some(bracket);
        self.source = Some(source);
        self.selected_half = BracketHalf::Upper;
        self.selected_column = 0;
        self.selected_row = 0;
        self.selected_slot = Slot::Top;
        self.scroll_offset = 0;
        self.sync_hover();
    }

    fn columns(&self) -> &[Vec<Match>] {
        match self.selected_half {
            BracketHalf::Lower => &self.lower_columns,
            _ => &self.upper_columns,
        }
    }

    pub fn selected_match_id(&self) -> Option<MatchId> {
        self.columns()
            .get(self.selected_column)?
            .get(self.selected_row)
            .map(|m| m.id)
    }

    pub fn navigate_column(&mut self, delta: isize) {
        let count = self.columns().len();
        if count == 0 {
            return;
        }
        let max = count - 1;
        let next = self.selected_column.saturating_add_signed(delta).min(max);
        self.selected_column = next;
        self.clamp_row();
        self.sync_hover();
    }

    pub fn navigate_row(&mut self, delta: isize) {
        self.selected_row = self.selected_row.saturating_add_signed(delta);
        self.clamp_row();
        self.sync_hover();
    }

    /// Tab: jump between the halves, keeping indices in range.
    pub fn cycle_half(&mut self) {
        let target = match self.selected_half {
            BracketHalf::Lower => BracketHalf::Upper,
            _ => BracketHalf::Lower,
        };
        let available = match target {
            BracketHalf::Lower => !self.lower_columns.is_empty(),
            _ => !self.upper_columns.is_empty(),
        };
        if available {
            self.selected_half = target;
            self.selected_column = self.selected_column.min(self.columns().len().saturating_sub(1));
            self.clamp_row();
            self.sync_hover();
        }
    }

    pub fn toggle_slot(&mut self) {
        self.selected_slot = match self.selected_slot {
            Slot::Top => Slot::Bottom,
            Slot::Bottom => Slot::Top,
        };
        self.sync_hover();
    }

    pub fn clear_hover(&mut self) {
        self.hover.apply(HoverAction::SetHoveredParty(None));
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    fn clamp_row(&mut self) {
        let rows = self
            .columns()
            .get(self.selected_column)
            .map_or(0, Vec::len);
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    /// Re-dispatch the hover action for the currently selected participant.
    /// Selecting an unresolved (TBD) slot clears the hover instead.
    fn sync_hover(&mut self) {
        let target = self.bracket.as_ref().and_then(|bracket| {
            let id = self.selected_match_id()?;
            let layout = BracketLayout::compute(bracket, &cell_style(), &self.hover);
            layout
                .matches
                .iter()
                .find(|lm| lm.placed.match_id == id)
                .and_then(|lm| lm.view.hover_target(self.selected_slot))
        });
        self.hover.apply(HoverAction::SetHoveredParty(target));
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub bracket: BracketViewState,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
