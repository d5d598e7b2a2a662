use crate::app::{AppState, Focus};
use crate::tui::truncate;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, state: &AppState, base: Style) {
    let focused = state.focus == Focus::Sidebar;
    let running_id = state.run.as_ref().map(|r| r.test_id.as_str());
    let visible_height = area.height as usize;
    let scroll_offset = if state.test_cursor >= visible_height {
        state.test_cursor - visible_height + 1
    } else {
        0
    };
    let name_max = (area.width as usize).saturating_sub(6);

    let lines: Vec<Line> = state
        .tests
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(i, test)| {
            let on_cursor = focused && i == state.test_cursor;
            let selected = state.selected_test_id.as_deref() == Some(test.id.as_str());

            let marker = if running_id == Some(test.id.as_str()) {
                Span::styled("⟳ ", Style::default().fg(Color::Yellow))
            } else {
                Span::raw("  ")
            };

            let mut name_style = base;
            if selected {
                name_style = name_style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if on_cursor {
                name_style = name_style.add_modifier(Modifier::REVERSED);
            }

            let mut spans = vec![marker, Span::styled(truncate(&test.name, name_max), name_style)];
            // The run affordance only appears on the hovered row
            if on_cursor {
                spans.push(Span::styled(" ▶", Style::default().fg(Color::DarkGray)));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}
