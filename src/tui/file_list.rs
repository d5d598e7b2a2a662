use crate::app::{AppState, Focus};
use crate::tui::{border_style, spinner, truncate};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const EMPTY_MESSAGE: &str = "No files uploaded yet";

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Files;
    let block = Block::default()
        .title(" Files ")
        .borders(Borders::ALL)
        .border_style(border_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [button_area, list_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

    render_upload_button(f, button_area, state);

    if state.files.is_empty() {
        let empty = Paragraph::new(EMPTY_MESSAGE)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(empty, list_area);
        return;
    }

    let visible_height = list_area.height as usize;
    let scroll_offset = if state.file_cursor >= visible_height {
        state.file_cursor - visible_height + 1
    } else {
        0
    };
    let name_max = (list_area.width as usize).saturating_sub(3);

    let lines: Vec<Line> = state
        .files
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(i, file)| {
            let selected = state.selected_file_id.as_deref() == Some(file.id.as_str());
            let mut style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if focused && i == state.file_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            // Selection is locked while a test runs
            if state.is_running() {
                style = style.add_modifier(Modifier::DIM);
            }
            Line::from(vec![
                Span::styled("▪ ", Style::default().fg(Color::DarkGray)),
                Span::styled(truncate(&file.name, name_max), style),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), list_area);
}

fn render_upload_button(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::styled(
        " ⇪ File Upload ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if state.pending_uploads > 0 {
        spans.push(Span::styled(
            format!(" {} reading", spinner::frame(state.spinner_frame)),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled(" u", Style::default().fg(Color::DarkGray)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
