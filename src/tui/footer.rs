use crate::app::{AppState, Focus, Tab};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

fn hints(state: &AppState, narrow: bool) -> &'static [(&'static str, &'static str)] {
    if state.upload.is_open() {
        return &[("Enter", "upload"), ("Esc", "cancel")];
    }
    match (state.focus, state.tab(), narrow) {
        (Focus::Sidebar, Some(Tab::Tests), true) => {
            &[("j/k", "nav"), ("r", "run"), ("t", "tab"), ("q", "quit")]
        }
        (Focus::Sidebar, Some(Tab::Tests), false) => &[
            ("↑↓/jk", "navigate"),
            ("Enter", "select"),
            ("r", "run"),
            ("o", "open"),
            ("Tab", "files"),
            ("1/2", "tabs"),
            ("q", "quit"),
        ],
        (Focus::Sidebar, Some(Tab::Report), _) => {
            &[("g", "generate"), ("t", "tab"), ("Tab", "files"), ("q", "quit")]
        }
        (_, _, true) => &[("u", "upload"), ("j/k", "nav"), ("Tab", "tests"), ("q", "quit")],
        _ => &[
            ("u", "upload"),
            ("↑↓/jk", "navigate"),
            ("Enter", "preview"),
            ("Tab", "sidebar"),
            ("1/2", "tabs"),
            ("q", "quit"),
        ],
    }
}

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let narrow = area.width < crate::app::NARROW_WIDTH_THRESHOLD;

    let line = if let Some(notif) = state.notifications.last() {
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::styled(&notif.message, Style::default().fg(Color::Yellow)),
        ])
    } else {
        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, desc)) in hints(state, narrow).iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(
                format!(" {desc}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    };

    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}
