use crate::app::{AppState, Focus, Tab, NARROW_WIDTH_THRESHOLD};
use crate::tui::{
    border_style, file_list, footer, header, report, tabs, test_list, transition, upload, window,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(1),    // body
            Constraint::Length(2), // footer
        ])
        .split(f.area());

    header::render(f, chunks[0], state);
    render_body(f, chunks[1], state);
    footer::render(f, chunks[2], state);

    upload::render(f, state);

    // Error overlay
    if let Some(err) = state.error_message() {
        let area = f.area();
        if area.height > 6 && area.width >= 4 {
            let err_area = Rect {
                x: area.x + 1,
                y: area.y + area.height.saturating_sub(5),
                width: area.width.saturating_sub(2),
                height: 3,
            };
            let err_widget = Paragraph::new(err.to_owned())
                .style(Style::default().fg(Color::Red))
                .block(
                    Block::default()
                        .title(" Error ")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .wrap(Wrap { trim: true });
            f.render_widget(err_widget, err_area);
        }
    }
}

fn render_body(f: &mut Frame, area: Rect, state: &AppState) {
    let [files, preview, sidebar] = if area.width < NARROW_WIDTH_THRESHOLD {
        Layout::vertical([
            Constraint::Length(7),
            Constraint::Min(6),
            Constraint::Length(10),
        ])
        .areas(area)
    } else {
        Layout::horizontal([
            Constraint::Length(30),
            Constraint::Min(20),
            Constraint::Length(34),
        ])
        .areas(area)
    };

    file_list::render(f, files, state);
    window::render(f, preview, state);
    render_sidebar(f, sidebar, state);
}

fn render_sidebar(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state.focus == Focus::Sidebar));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [tab_area, panel_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
    tabs::render(f, tab_area, &state.active_tab);

    // An unrecognised tab id leaves the panel blank
    match state.tab() {
        Some(Tab::Tests) => {
            if let Some(rect) = transition::area(&state.tests_panel, panel_area, state.now) {
                test_list::render(f, rect, state, transition::style(&state.tests_panel));
            }
        }
        Some(Tab::Report) => {
            if let Some(rect) = transition::area(&state.report_panel, panel_area, state.now) {
                report::render(f, rect, state, transition::style(&state.report_panel));
            }
        }
        None => {}
    }
}
