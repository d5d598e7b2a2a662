use crate::app::AppState;
use crate::tui::{centered, transition, truncate};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// Six tenths of the screen, at least 40 columns.
fn prompt_width(screen_width: u16) -> u16 {
    let width = u32::from(screen_width) * 6 / 10;
    u16::try_from(width).unwrap_or(u16::MAX).max(40)
}

pub fn render(f: &mut Frame, state: &AppState) {
    let prompt = &state.upload;
    let width = prompt_width(f.area().width);
    let box_area = centered(f.area(), width, 7);
    let Some(overlay_area) = transition::area(&prompt.reveal, box_area, state.now) else {
        return;
    };

    f.render_widget(Clear, overlay_area);

    let hints = Line::from(vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" upload   ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "Esc",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" cancel ", Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .title(" Upload file ")
        .title_bottom(hints.centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(transition::style(&prompt.reveal).bg(Color::Black));

    // Keep the tail of long paths visible, it's the part being typed
    let field_width = (overlay_area.width as usize).saturating_sub(6);
    let buffer = prompt.buffer();
    let shown = if UnicodeWidthStr::width(buffer) > field_width {
        let reversed: String = buffer.chars().rev().collect();
        truncate(&reversed, field_width).chars().rev().collect()
    } else {
        buffer.to_string()
    };

    let lines = vec![
        Line::from(Span::styled(
            "Path, or drop a file onto the terminal",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(shown, Style::default().fg(Color::White)),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_six_tenths_with_a_floor() {
        assert_eq!(prompt_width(120), 72);
        assert_eq!(prompt_width(50), 40);
        assert_eq!(prompt_width(0), 40);
    }

    #[test]
    fn width_does_not_overflow_on_huge_screens() {
        assert_eq!(prompt_width(11_000), 6_600);
        assert_eq!(prompt_width(u16::MAX), 39_321);
    }
}
