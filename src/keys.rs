use crate::app::App;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;

    match (key_event.code, key_event.modifiers) {
        // Quit
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Bracket navigation — every move re-dispatches the hover action
        // for the newly selected participant.
        (Char('l') | KeyCode::Right, _) => guard.bracket_next_round(),
        (Char('h') | KeyCode::Left, _) => guard.bracket_prev_round(),
        (Char('j') | KeyCode::Down, _) => guard.bracket_match_down(),
        (Char('k') | KeyCode::Up, _) => guard.bracket_match_up(),
        (KeyCode::Tab, _) => guard.bracket_cycle_half(),
        (Char(' '), _) => guard.bracket_toggle_slot(),
        (KeyCode::Esc, _) => guard.bracket_clear_hover(),

        // Scrolling for brackets taller than the terminal
        (KeyCode::PageDown, _) => guard.bracket_scroll_down(),
        (KeyCode::PageUp, _) => guard.bracket_scroll_up(),

        // Global
        (Char('f'), _) => guard.toggle_full_screen(),
        (Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
