use crate::app::AppState;
use crate::tui::spinner;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", state.config.version_string),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
    ];

    match &state.config.service_url {
        Some(url) => spans.push(Span::styled(url.as_str(), Style::default().fg(Color::White))),
        None => spans.push(Span::styled("offline", Style::default().fg(Color::DarkGray))),
    }

    if let Some(run) = &state.run {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("⟳ {}", state.test_name(&run.test_id)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        if let Some(left) = state.auto_stop_in() {
            spans.push(Span::styled(
                format!(" {}s", left.as_secs()),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    if state.is_loading() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            spinner::frame(state.spinner_frame),
            Style::default().fg(Color::Yellow),
        ));
    }

    if state.error_message().is_some() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}
