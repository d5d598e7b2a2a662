use crate::app::AppState;
use crate::tui::{spinner, transition};
use crate::window::{WindowView, EMPTY_PROMPT, NO_CONTENT};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!(" {} ", state.window_title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match state.view() {
        WindowView::Loading => render_loading(f, inner, state.spinner_frame),
        WindowView::Empty => render_placeholder(f, inner, EMPTY_PROMPT),
        view => {
            // Content only draws while the reveal is mounted
            let Some(content_area) = transition::area(&state.window.reveal, inner, state.now)
            else {
                return;
            };
            let style = transition::style(&state.window.reveal);
            match view {
                WindowView::TestFrame { url, policy } => {
                    render_frame(f, content_area, state, url, &policy.sandbox_attr(), style);
                }
                WindowView::FilePreview { content, .. } => {
                    render_preview(f, content_area, content, style);
                }
                WindowView::Loading | WindowView::Empty => {}
            }
        }
    }
}

fn render_loading(f: &mut Frame, area: Rect, frame: usize) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);
    let line = Line::from(vec![
        Span::styled(spinner::frame(frame), Style::default().fg(Color::Yellow)),
        Span::styled(" Loading", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), middle);
}

fn render_placeholder(f: &mut Frame, area: Rect, text: &str) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(area);
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}

fn render_frame(f: &mut Frame, area: Rect, state: &AppState, url: &str, sandbox: &str, base: Style) {
    let label = Style::default().fg(Color::DarkGray);
    let name = state
        .run
        .as_ref()
        .map_or("", |run| state.test_name(&run.test_id));

    let mut lines = vec![
        Line::from(Span::styled(name, base.add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![
            Span::styled("target   ", label),
            Span::styled(url, base.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)),
        ]),
        Line::from(vec![
            Span::styled("sandbox  ", label),
            Span::styled(sandbox, base),
        ]),
    ];
    if let Some(left) = state.auto_stop_in() {
        lines.push(Line::from(vec![
            Span::styled("stops in ", label),
            Span::styled(format!("{}s", left.as_secs()), base.fg(Color::Yellow)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("o", Style::default().fg(Color::Cyan)),
        Span::styled(" open in browser", label),
    ]));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_preview(f: &mut Frame, area: Rect, content: Option<&str>, base: Style) {
    match content {
        Some(text) if !text.is_empty() => {
            f.render_widget(
                Paragraph::new(text.to_string())
                    .style(base)
                    .wrap(Wrap { trim: false }),
                area,
            );
        }
        _ => render_placeholder(f, area, NO_CONTENT),
    }
}
