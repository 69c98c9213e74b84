use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::bracket::DoubleElimView;
use crate::components::theme::Theme;
use crate::ui::layout::LayoutAreas;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 6 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_title_bar(f, layout.title_bar, app);
            }

            draw_bracket(f, layout.main, app);

            if app.state.show_logs {
                draw_logs(f, f.area());
            }
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_title_bar(f: &mut Frame, area: Rect, app: &App) {
    let source = app
        .state
        .bracket
        .source
        .as_deref()
        .unwrap_or("no bracket loaded");

    let title = Line::from(vec![
        Span::styled("detui", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled("  ", Style::default()),
        Span::styled(source, Style::default().fg(Color::Gray)),
    ]);

    let bar = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(bar, area);
}

fn draw_bracket(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Double Elimination ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(bracket) = app.state.bracket.bracket.as_ref() else {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Bracket load failed:\n{err}")
        } else {
            "No bracket loaded.\nPass a JSON file path or set DETUI_BRACKET_JSON.".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

    f.render_widget(
        Paragraph::new(
            "Keys: h/l=round  j/k=match  Tab=half  Space=slot  Esc=clear  PgUp/PgDn=scroll  q=quit",
        )
        .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    f.render_widget(
        DoubleElimView {
            bracket,
            hover: &app.state.bracket.hover,
            selected_match: app.state.bracket.selected_match_id(),
            selected_slot: app.state.bracket.selected_slot,
            scroll_offset: app.state.bracket.scroll_offset,
            theme: Theme::Dark,
        },
        content,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let [_, log_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(10)]).areas(area);

    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(logs, log_area);
}
