use crate::model::{sample_tests, Report, Test, UploadedFile};
use crate::report::{self, ReportSource};
use crate::timer::Deadline;
use crate::transition::Transition;
use crate::upload::UploadPrompt;
use crate::window::{self, EmbeddedWindow, FramePolicy, WindowKey, WindowView};
use std::time::{Duration, Instant};

pub const DEFAULT_AUTO_STOP: Duration = Duration::from_secs(30);

// UI constants
pub const NOTIFICATION_TTL_SECS: u64 = 5;
pub const ERROR_TTL_SECS: u64 = 10;
pub const SPINNER_FRAME_COUNT: usize = 10;
/// Below this width the panels stack vertically.
pub const NARROW_WIDTH_THRESHOLD: u16 = 100;

pub const TAB_TESTS: &str = "tests";
pub const TAB_REPORT: &str = "report";

pub struct TabSpec {
    pub id: &'static str,
    pub label: &'static str,
}

pub const TABS: &[TabSpec] = &[
    TabSpec {
        id: TAB_TESTS,
        label: "Tests",
    },
    TabSpec {
        id: TAB_REPORT,
        label: "Report",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Tests,
    Report,
}

impl Tab {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            TAB_TESTS => Some(Self::Tests),
            TAB_REPORT => Some(Self::Report),
            _ => None,
        }
    }
}

/// Which panel receives list navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Files,
    Sidebar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRun {
    pub test_id: String,
    /// `None` when the test id is not in the list; nothing is framed then.
    pub url: Option<String>,
    pub started_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub timestamp: Instant,
}

/// Immutable configuration set at startup.
pub struct AppConfig {
    /// Base URL of the test service, `None` in offline mode.
    pub service_url: Option<String>,
    pub auto_stop: Duration,
    pub debounce: Duration,
    pub version_string: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            auto_stop: DEFAULT_AUTO_STOP,
            debounce: window::DEFAULT_DEBOUNCE,
            version_string: format!("testdeck v{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    /// Clock reading of the last `advance`; every deadline is armed against it.
    pub now: Instant,

    // Files
    pub files: Vec<UploadedFile>,
    pub selected_file_id: Option<String>,
    pub pending_uploads: usize,
    last_file_id: i64,

    // Tests
    pub tests: Vec<Test>,
    pub selected_test_id: Option<String>,
    pub run: Option<ActiveRun>,
    auto_stop: Deadline,

    // Sidebar
    pub active_tab: String,
    pub tests_panel: Transition,
    pub report_panel: Transition,
    pub report: Report,
    pub report_source: ReportSource,
    pub report_loading: bool,

    // Panels
    pub window: EmbeddedWindow,
    pub upload: UploadPrompt,

    // Navigation
    pub focus: Focus,
    pub file_cursor: usize,
    pub test_cursor: usize,

    // Transient UI
    pub notifications: Vec<Notification>,
    pub error: Option<(String, Instant)>,
    pub spinner_frame: usize,
    pub should_quit: bool,

    pub desktop_notify: bool,
}

impl AppState {
    pub fn new(config: AppConfig, tests: Vec<Test>, now: Instant) -> Self {
        let debounce = config.debounce;
        Self {
            config,
            now,
            files: Vec::new(),
            selected_file_id: None,
            pending_uploads: 0,
            last_file_id: 0,
            tests,
            selected_test_id: None,
            run: None,
            auto_stop: Deadline::new(),
            active_tab: TAB_TESTS.to_string(),
            tests_panel: Transition::fade(true),
            report_panel: Transition::fade(false),
            report: report::mock_report(),
            report_source: ReportSource::Mock,
            report_loading: false,
            window: EmbeddedWindow::new(debounce),
            upload: UploadPrompt::default(),
            focus: Focus::Files,
            file_cursor: 0,
            test_cursor: 0,
            notifications: Vec::new(),
            error: None,
            spinner_frame: 0,
            should_quit: false,
            desktop_notify: true,
        }
    }

    /// Offline state with the built-in sample tests.
    pub fn offline(now: Instant) -> Self {
        Self::new(AppConfig::default(), sample_tests(), now)
    }

    /// Moves the clock forward and fires whatever came due. Returns the run
    /// that auto-stopped, if any.
    pub fn advance(&mut self, now: Instant) -> Option<ActiveRun> {
        self.now = now;
        let stopped = if self.auto_stop.poll(now) {
            self.run.take()
        } else {
            None
        };
        if let Some(run) = &stopped {
            tracing::info!(test_id = %run.test_id, "test run auto-stopped");
        }
        self.sync_window();
        self.window.tick(now);
        self.tests_panel.tick(now);
        self.report_panel.tick(now);
        self.upload.reveal.tick(now);
        stopped
    }

    fn sync_window(&mut self) {
        let key = WindowKey {
            file_id: self.selected_file_id.clone(),
            running: self.run.is_some(),
        };
        self.window.sync(key, self.now);
    }

    // --- Files ---

    fn next_file_id(&mut self) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        self.last_file_id = millis.max(self.last_file_id + 1);
        self.last_file_id.to_string()
    }

    /// Appends a file whose content has been read and selects it.
    pub fn add_file(&mut self, name: String, content: Option<String>) -> String {
        let id = self.next_file_id();
        tracing::info!(%id, %name, "file uploaded");
        self.notify(format!("Uploaded {name}"));
        self.files.push(UploadedFile {
            id: id.clone(),
            name,
            content,
        });
        self.file_cursor = self.files.len() - 1;
        self.selected_file_id = Some(id.clone());
        self.sync_window();
        id
    }

    pub fn upload_failed(&mut self, name: &str, reason: &str) {
        tracing::warn!(%name, %reason, "file read failed");
        self.set_error(format!("Could not read {name}: {reason}"));
    }

    /// Ignored while a test is running.
    pub fn select_file(&mut self, id: &str) {
        if self.run.is_some() {
            return;
        }
        self.selected_file_id = Some(id.to_string());
        self.sync_window();
    }

    pub fn selected_file(&self) -> Option<&UploadedFile> {
        let id = self.selected_file_id.as_deref()?;
        self.files.iter().find(|f| f.id == id)
    }

    // --- Tests ---

    pub fn set_tests(&mut self, tests: Vec<Test>) {
        self.tests = tests;
        if self.test_cursor >= self.tests.len() {
            self.test_cursor = self.tests.len().saturating_sub(1);
        }
    }

    pub fn select_test(&mut self, id: &str) {
        self.selected_test_id = Some(id.to_string());
    }

    /// Starts (or restarts) the demo run. The last call wins and the
    /// auto-stop is measured from it.
    pub fn run_test(&mut self, id: &str) {
        let url = self.tests.iter().find(|t| t.id == id).map(|t| t.url.clone());
        tracing::info!(test_id = %id, url = ?url, "test run started");
        self.run = Some(ActiveRun {
            test_id: id.to_string(),
            url,
            started_at: self.now,
        });
        self.selected_file_id = None;
        self.auto_stop.arm(self.now, self.config.auto_stop);
        self.sync_window();
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn auto_stop_in(&self) -> Option<Duration> {
        self.auto_stop.remaining(self.now)
    }

    pub fn test_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.tests
            .iter()
            .find(|t| t.id == id)
            .map_or(id, |t| t.name.as_str())
    }

    // --- Sidebar ---

    pub fn change_tab(&mut self, id: &str) {
        self.active_tab = id.to_string();
        let tab = self.tab();
        self.tests_panel.set_show(tab == Some(Tab::Tests), self.now);
        self.report_panel.set_show(tab == Some(Tab::Report), self.now);
    }

    pub fn tab(&self) -> Option<Tab> {
        Tab::from_id(&self.active_tab)
    }

    pub fn next_tab(&mut self) {
        let idx = TABS.iter().position(|t| t.id == self.active_tab);
        let next = idx.map_or(0, |i| (i + 1) % TABS.len());
        self.change_tab(TABS[next].id);
    }

    pub fn set_report(&mut self, report: Report) {
        self.report = report;
        self.report_source = ReportSource::Live;
        self.report_loading = false;
    }

    // --- Embedded window ---

    pub fn view(&self) -> WindowView<'_> {
        let ready = self.window.is_ready();
        match (&self.run, self.selected_file()) {
            (Some(run), _) => match run.url.as_deref() {
                Some(url) if ready => WindowView::TestFrame {
                    url,
                    policy: FramePolicy::ISOLATED,
                },
                Some(_) => WindowView::Loading,
                None => WindowView::Empty,
            },
            (None, Some(file)) if ready => WindowView::FilePreview {
                name: &file.name,
                content: file.content.as_deref(),
            },
            (None, Some(_)) => WindowView::Loading,
            (None, None) => WindowView::Empty,
        }
    }

    pub fn window_title(&self) -> &str {
        if self.run.is_some() {
            window::TITLE_TEST
        } else if let Some(file) = self.selected_file() {
            &file.name
        } else {
            window::TITLE_IDLE
        }
    }

    pub fn frame_url(&self) -> Option<&str> {
        self.run.as_ref()?.url.as_deref()
    }

    // --- Navigation ---

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Files => Focus::Sidebar,
            Focus::Sidebar => Focus::Files,
        };
    }

    pub fn move_cursor_up(&mut self) {
        let cursor = match self.focus {
            Focus::Files => &mut self.file_cursor,
            Focus::Sidebar => &mut self.test_cursor,
        };
        *cursor = cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        let (cursor, len) = match self.focus {
            Focus::Files => (&mut self.file_cursor, self.files.len()),
            Focus::Sidebar => (&mut self.test_cursor, self.tests.len()),
        };
        if len > 0 && *cursor < len - 1 {
            *cursor += 1;
        }
    }

    /// Enter on the focused list: select the file or test under the cursor.
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Files => {
                if let Some(id) = self.files.get(self.file_cursor).map(|f| f.id.clone()) {
                    self.select_file(&id);
                }
            }
            Focus::Sidebar if self.tab() == Some(Tab::Tests) => {
                if let Some(id) = self.tests.get(self.test_cursor).map(|t| t.id.clone()) {
                    self.select_test(&id);
                }
            }
            Focus::Sidebar => {}
        }
    }

    /// The test under the sidebar cursor, if the tests tab is showing.
    pub fn cursor_test_id(&self) -> Option<String> {
        if self.tab() != Some(Tab::Tests) {
            return None;
        }
        self.tests.get(self.test_cursor).map(|t| t.id.clone())
    }

    // --- Transient UI ---

    pub fn notify(&mut self, message: String) {
        self.notifications.push(Notification {
            message,
            timestamp: self.now,
        });
    }

    pub fn prune_notifications(&mut self) {
        let now = self.now;
        self.notifications
            .retain(|n| now.saturating_duration_since(n.timestamp).as_secs() < NOTIFICATION_TTL_SECS);
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAME_COUNT;
    }

    pub fn set_error(&mut self, msg: String) {
        self.error = Some((msg, self.now));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn prune_error(&mut self) {
        if let Some((_, at)) = &self.error {
            if self.now.saturating_duration_since(*at).as_secs() >= ERROR_TTL_SECS {
                self.error = None;
            }
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|(m, _)| m.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.pending_uploads > 0 || self.report_loading
    }
}
