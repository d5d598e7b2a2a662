use crate::app::AppState;
use crate::report::ReportSource;
use crate::tui::spinner;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, state: &AppState, base: Style) {
    let report = &state.report;
    let [summary_area, table_area] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(area);

    let label = Style::default().fg(Color::DarkGray);
    let source = match (state.report_loading, state.report_source) {
        (true, _) => Span::styled(
            format!("{} generating", spinner::frame(state.spinner_frame)),
            Style::default().fg(Color::Yellow),
        ),
        (false, ReportSource::Live) => Span::styled(report.id.as_str(), label),
        (false, ReportSource::Mock) => Span::styled("sample data", label),
    };
    let rate_color = if report.pass_rate >= 80 {
        Color::Green
    } else if report.pass_rate >= 50 {
        Color::Yellow
    } else {
        Color::Red
    };

    let summary = vec![
        Line::from(vec![
            Span::styled("Report ", base.add_modifier(Modifier::BOLD)),
            source,
        ]),
        Line::from(vec![
            Span::styled("Run     ", label),
            Span::styled(report.run_date.format("%Y-%m-%d %H:%M").to_string(), base),
        ]),
        Line::from(vec![
            Span::styled("Passed  ", label),
            Span::styled(format!("{}/{}", report.passed_tests, report.total_tests), base),
        ]),
        Line::from(vec![
            Span::styled("Rate    ", label),
            Span::styled(
                format!("{}%", report.pass_rate),
                base.fg(rate_color).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    f.render_widget(Paragraph::new(summary).wrap(Wrap { trim: true }), summary_area);

    if report.results.is_empty() {
        f.render_widget(
            Paragraph::new("No results yet").style(Style::default().fg(Color::DarkGray)),
            table_area,
        );
        return;
    }

    let rows = report.results.iter().map(|r| {
        let (icon, color) = if r.passed() {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };
        Row::new(vec![
            Cell::from(Span::styled(icon, Style::default().fg(color))),
            Cell::from(state.test_name(&r.test_id).to_string()),
            Cell::from(r.duration.clone()),
            Cell::from(r.error.clone().unwrap_or_default()),
        ])
        .style(base)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(8),
            Constraint::Length(5),
            Constraint::Min(0),
        ],
    )
    .header(
        Row::new(vec!["", "Test", "Time", "Error"])
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)),
    )
    .column_spacing(1);

    f.render_widget(table, table_area);
}
