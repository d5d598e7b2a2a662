#![allow(dead_code)]

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::{Duration, Instant};
use testdeck::app::{AppConfig, AppState};
use testdeck::model::{sample_tests, Test};

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// Offline state on the sample tests, with the clock it was created at.
pub fn default_state() -> (AppState, Instant) {
    let t0 = Instant::now();
    (AppState::offline(t0), t0)
}

pub fn state_with_tests(tests: Vec<Test>) -> (AppState, Instant) {
    let t0 = Instant::now();
    (AppState::new(AppConfig::default(), tests, t0), t0)
}

pub fn online_state() -> (AppState, Instant) {
    let t0 = Instant::now();
    let config = AppConfig {
        service_url: Some("http://localhost:8000/api".to_string()),
        ..AppConfig::default()
    };
    (AppState::new(config, sample_tests(), t0), t0)
}

/// Adds a file and lets the preview debounce elapse.
pub fn state_with_file(name: &str, content: &str) -> (AppState, Instant, String) {
    let (mut state, t0) = default_state();
    let id = state.add_file(name.to_string(), Some(content.to_string()));
    state.advance(t0 + ms(300));
    (state, t0, id)
}

pub fn draw(state: &AppState, width: u16, height: u16) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| testdeck::tui::render::render(f, state))
        .unwrap();
    terminal
}

pub fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer.cell((x, row)).unwrap().symbol().to_string())
        .collect()
}

pub fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let height = terminal.backend().buffer().area.height;
    (0..height)
        .map(|row| row_text(terminal, row))
        .collect::<Vec<_>>()
        .join("\n")
}
