use crate::app::{TabSpec, TABS};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, active: &str) {
    f.render_widget(Paragraph::new(tab_line(TABS, active)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    ), area);
}

/// One label per tab; the active one is underlined. An unknown `active`
/// highlights nothing.
pub fn tab_line(tabs: &[TabSpec], active: &str) -> Line<'static> {
    let mut spans = Vec::with_capacity(tabs.len() * 2);
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if tab.id == active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", tab.label), style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighted(line: &Line, label: &str) -> bool {
        line.spans
            .iter()
            .find(|s| s.content.trim() == label)
            .is_some_and(|s| s.style.add_modifier.contains(Modifier::UNDERLINED))
    }

    #[test]
    fn active_tab_is_underlined() {
        let line = tab_line(TABS, "report");
        assert!(highlighted(&line, "Report"));
        assert!(!highlighted(&line, "Tests"));
    }

    #[test]
    fn unknown_tab_highlights_nothing() {
        let line = tab_line(TABS, "settings");
        assert!(!highlighted(&line, "Report"));
        assert!(!highlighted(&line, "Tests"));
    }
}
