use de_brackets::DoubleElimination;

use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self { state: AppState::default(), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn on_bracket_loaded(&mut self, bracket: DoubleElimination, source: String) {
        self.state.last_error = None;
        self.state.bracket.load(bracket, source);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Bracket navigation — delegated to BracketViewState
    // -----------------------------------------------------------------------

    pub fn bracket_next_round(&mut self) {
        self.state.bracket.navigate_column(1);
    }

    pub fn bracket_prev_round(&mut self) {
        self.state.bracket.navigate_column(-1);
    }

    pub fn bracket_match_down(&mut self) {
        self.state.bracket.navigate_row(1);
    }

    pub fn bracket_match_up(&mut self) {
        self.state.bracket.navigate_row(-1);
    }

    pub fn bracket_cycle_half(&mut self) {
        self.state.bracket.cycle_half();
    }

    pub fn bracket_toggle_slot(&mut self) {
        self.state.bracket.toggle_slot();
    }

    pub fn bracket_clear_hover(&mut self) {
        self.state.bracket.clear_hover();
    }

    pub fn bracket_scroll_down(&mut self) {
        self.state.bracket.scroll_down();
    }

    pub fn bracket_scroll_up(&mut self) {
        self.state.bracket.scroll_up();
    }

    // -----------------------------------------------------------------------
    // Global toggles
    // -----------------------------------------------------------------------

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}
