//! Pre-dashboard splash shown while the test service is contacted.

use crate::api::{self, TestService};
use crate::model::{sample_tests, Report, Test};
use crate::tui::spinner;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

#[derive(Clone)]
enum PhaseStatus {
    InProgress,
    Done,
    Failed(String),
}

#[derive(Clone)]
struct StartupPhase {
    label: String,
    detail: Option<String>,
    status: PhaseStatus,
}

pub struct StartupResult {
    pub tests: Vec<Test>,
    /// Whether the test list came from the service.
    pub online: bool,
    /// The service's latest report; `None` keeps the mock report.
    pub report: Option<Report>,
}

impl StartupResult {
    pub fn offline(tests: Vec<Test>) -> Self {
        Self {
            tests,
            online: false,
            report: None,
        }
    }
}

fn render_startup<B: Backend>(terminal: &mut Terminal<B>, phases: &[StartupPhase], frame: usize) {
    let drawn = terminal.draw(|f| {
        let area = f.area();
        let total_lines = phases.len() as u16;
        let vertical = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(total_lines),
            Constraint::Min(0),
        ])
        .split(area);

        let lines: Vec<Line> = phases
            .iter()
            .map(|phase| {
                let (icon, icon_style) = match &phase.status {
                    PhaseStatus::InProgress => (
                        spinner::frame(frame).to_string(),
                        Style::default().fg(Color::Yellow),
                    ),
                    PhaseStatus::Done => ("\u{2713}".to_string(), Style::default().fg(Color::Green)),
                    PhaseStatus::Failed(_) => ("\u{2717}".to_string(), Style::default().fg(Color::Red)),
                };

                let mut spans = vec![
                    Span::styled(format!("  {icon} "), icon_style),
                    Span::styled(&phase.label, Style::default().fg(Color::White)),
                ];

                if let Some(detail) = &phase.detail {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(detail, Style::default().fg(Color::DarkGray)));
                }

                if let PhaseStatus::Failed(msg) = &phase.status {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(msg, Style::default().fg(Color::Red)));
                }

                Line::from(spans)
            })
            .collect();

        f.render_widget(Paragraph::new(lines), vertical[1]);
    });
    if let Err(e) = drawn {
        tracing::debug!("startup draw failed: {e}");
    }
}

/// Shows `label` with a spinner until `fut` resolves, then marks it done or
/// failed with the error text.
async fn run_phase<B, F, T, E>(
    terminal: &mut Terminal<B>,
    phases: &mut Vec<StartupPhase>,
    label: &str,
    fut: F,
) -> Result<T, E>
where
    B: Backend,
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    phases.push(StartupPhase {
        label: label.to_string(),
        detail: None,
        status: PhaseStatus::InProgress,
    });
    render_startup(terminal, phases, 0);

    let mut ticker = tokio::time::interval(Duration::from_millis(80));
    let mut frame = 0usize;
    tokio::pin!(fut);

    loop {
        tokio::select! {
            result = &mut fut => {
                let idx = phases.len() - 1;
                match &result {
                    Ok(_) => phases[idx].status = PhaseStatus::Done,
                    Err(e) => phases[idx].status = PhaseStatus::Failed(e.to_string()),
                }
                render_startup(terminal, phases, frame);
                return result;
            }
            _ = ticker.tick() => {
                frame += 1;
                render_startup(terminal, phases, frame);
            }
        }
    }
}

fn note(phases: &mut [StartupPhase], detail: String) {
    if let Some(last) = phases.last_mut() {
        last.detail = Some(detail);
    }
}

/// Fetches the test list, then the latest report. An unreachable service is
/// not fatal: the built-in sample tests and mock report are used instead. A
/// report failure alone keeps the fetched tests.
pub async fn run_startup<B: Backend>(
    terminal: &mut Terminal<B>,
    service: &dyn TestService,
) -> StartupResult {
    let mut phases: Vec<StartupPhase> = Vec::new();

    let fetched = run_phase(
        terminal,
        &mut phases,
        "Connecting to test service",
        service.tests(),
    )
    .await;

    let tests = match fetched {
        Ok(tests) => {
            note(&mut phases, format!("{} tests", tests.len()));
            tests
        }
        Err(e) => {
            tracing::warn!(error = %e, "test service unavailable, using sample tests");
            phases.push(StartupPhase {
                label: "Using sample tests".to_string(),
                detail: Some(service.describe()),
                status: PhaseStatus::Done,
            });
            render_startup(terminal, &phases, 0);
            return StartupResult::offline(sample_tests());
        }
    };

    let report = match run_phase(
        terminal,
        &mut phases,
        "Fetching latest report",
        api::latest_report(service),
    )
    .await
    {
        Ok(report) => {
            note(&mut phases, format!("{}% passed", report.pass_rate));
            Some(report)
        }
        Err(e) => {
            tracing::warn!(error = %e, "no report at startup, keeping sample report");
            None
        }
    };
    render_startup(terminal, &phases, 0);

    StartupResult {
        tests,
        online: true,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::model::{CompletedTest, GeneratedReport, TestStatus};
    use crate::report::mock_report;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;

    /// Answers `tests` and report calls from canned data; `None` fails them.
    struct Canned {
        tests: Option<Vec<Test>>,
        report: Option<Report>,
    }

    fn down(context: &'static str) -> ApiError {
        ApiError::Status {
            context,
            status: 503,
            status_text: "Service Unavailable".to_string(),
        }
    }

    #[async_trait]
    impl TestService for Canned {
        fn describe(&self) -> String {
            "http://canned/api".to_string()
        }
        async fn tests(&self) -> Result<Vec<Test>, ApiError> {
            self.tests.clone().ok_or_else(|| down("fetch tests"))
        }
        async fn test(&self, _id: &str) -> Result<Test, ApiError> {
            Err(down("fetch test"))
        }
        async fn run_test(&self, _id: &str) -> Result<TestStatus, ApiError> {
            Err(down("run test"))
        }
        async fn complete_test(&self, _id: &str) -> Result<CompletedTest, ApiError> {
            Err(down("complete test"))
        }
        async fn test_status(&self, _id: &str) -> Result<TestStatus, ApiError> {
            Err(down("fetch test status"))
        }
        async fn reports(&self) -> Result<Vec<Report>, ApiError> {
            Err(down("fetch reports"))
        }
        async fn report(&self, id: &str) -> Result<Report, ApiError> {
            self.report
                .clone()
                .filter(|r| r.id == id)
                .ok_or_else(|| down("fetch report"))
        }
        async fn generate_report(&self) -> Result<GeneratedReport, ApiError> {
            match &self.report {
                Some(r) => Ok(GeneratedReport {
                    report_id: r.id.clone(),
                }),
                None => Err(down("generate report")),
            }
        }
    }

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(80, 12)).unwrap()
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn online_start_loads_tests_and_report() {
        let service = Canned {
            tests: Some(vec![Test::new("login", "Login", "http://staging/login")]),
            report: Some(mock_report()),
        };
        let mut terminal = terminal();
        let result = run_startup(&mut terminal, &service).await;

        assert!(result.online);
        assert_eq!(result.tests.len(), 1);
        assert_eq!(result.report.map(|r| r.id).as_deref(), Some("mock"));
        let text = screen(&terminal);
        assert!(text.contains("1 tests"), "screen:\n{text}");
        assert!(text.contains("Fetching latest report"));
        assert!(text.contains("66% passed"));
    }

    #[tokio::test]
    async fn report_failure_keeps_fetched_tests() {
        let service = Canned {
            tests: Some(sample_tests()),
            report: None,
        };
        let mut terminal = terminal();
        let result = run_startup(&mut terminal, &service).await;

        assert!(result.online);
        assert!(result.report.is_none());
        let text = screen(&terminal);
        assert!(
            text.contains("Failed to generate report: Service Unavailable"),
            "screen:\n{text}"
        );
    }

    #[tokio::test]
    async fn unreachable_service_falls_back_to_samples() {
        let service = Canned {
            tests: None,
            report: Some(mock_report()),
        };
        let mut terminal = terminal();
        let result = run_startup(&mut terminal, &service).await;

        assert!(!result.online);
        assert_eq!(result.tests, sample_tests());
        assert!(result.report.is_none());
        let text = screen(&terminal);
        assert!(text.contains("Using sample tests"), "screen:\n{text}");
        assert!(!text.contains("Fetching latest report"));
    }
}
