use testdeck::api::{self, HttpTestService, TestService};
use testdeck::app::{self, ActiveRun, AppConfig, AppState, Tab};
use testdeck::browser;
use testdeck::cli;
use testdeck::events;
use testdeck::input;
use testdeck::model::sample_tests;
use testdeck::report::ReportSource;
#[cfg(feature = "desktop-notify")]
use testdeck::notify;
use testdeck::tui;
use testdeck::upload::{self, FileHandle};

use clap::Parser;
use cli::Cli;
use color_eyre::eyre::{eyre, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use events::{post, spawn_monitored, AppEvent, EventHandler};
use input::{Action, InputContext};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

type Service = Option<Arc<dyn TestService>>;

fn setup_verbose_logging() -> Result<()> {
    let state_dir = dirs_next_or_fallback();
    std::fs::create_dir_all(&state_dir)
        .map_err(|e| eyre!("Failed to create log directory {state_dir:?}: {e}"))?;
    let log_path = state_dir.join("debug.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| eyre!("Failed to open log file {log_path:?}: {e}"))?;
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .init();
    tracing::info!(
        "testdeck v{} starting with verbose logging",
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

fn dirs_next_or_fallback() -> std::path::PathBuf {
    if let Some(state) = std::env::var_os("XDG_STATE_HOME") {
        std::path::PathBuf::from(state).join("testdeck")
    } else if let Some(home) = std::env::var_os("HOME") {
        std::path::PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("testdeck")
    } else {
        std::path::PathBuf::from("/tmp/testdeck")
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen,
        SetTitle("")
    )?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    if args.verbose {
        setup_verbose_logging()?;
    }

    // A malformed URL is a usage error, report it before touching the terminal
    let service: Service = match args.api_url.as_deref() {
        Some(url) => Some(Arc::new(HttpTestService::new(url)?) as Arc<dyn TestService>),
        None => None,
    };

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = terminal::disable_raw_mode() {
            eprintln!("Failed to disable raw mode during panic: {e}");
        }
        if let Err(e) = execute!(
            io::stdout(),
            DisableBracketedPaste,
            LeaveAlternateScreen,
            SetTitle("")
        ) {
            eprintln!("Failed to leave alternate screen during panic: {e}");
        }
        original_hook(panic_info);
    }));

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, SetTitle("testdeck"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let startup = match &service {
        Some(svc) => tui::startup::run_startup(&mut terminal, svc.as_ref()).await,
        None => tui::startup::StartupResult::offline(sample_tests()),
    };

    let config = AppConfig {
        service_url: service.as_ref().map(|s| s.describe()),
        auto_stop: Duration::from_secs(args.auto_stop_secs),
        debounce: Duration::from_millis(args.debounce_ms),
        ..AppConfig::default()
    };
    let mut state = AppState::new(config, startup.tests, Instant::now());
    state.desktop_notify = !args.no_notify;
    if service.is_some() && !startup.online {
        state.notify("Test service unreachable, showing sample tests".to_string());
    }
    if let Some(report) = startup.report {
        state.set_report(report);
    }

    let events = EventHandler::new(Duration::from_millis(100));
    let tx = events.sender();

    for path in args.files {
        match FileHandle::from_path(path.clone()) {
            Some(handle) => start_upload(&mut state, &tx, handle),
            None => state.set_error(format!("Not a file: {}", path.display())),
        }
    }

    let result = run_app(&mut terminal, &mut state, events, &tx, &service).await;

    restore_terminal(&mut terminal)?;
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    mut events: EventHandler,
    tx: &UnboundedSender<AppEvent>,
    service: &Service,
) -> Result<()> {
    loop {
        // Fire due deadlines before drawing so the frame reflects them
        if let Some(run) = state.advance(Instant::now()) {
            finish_run(tx, service, run);
        }
        state.prune_notifications();
        state.prune_error();

        terminal.draw(|f| tui::render::render(f, state))?;

        if let Some(event) = events.next().await {
            // The wait may have crossed a deadline; act on the current clock
            if let Some(run) = state.advance(Instant::now()) {
                finish_run(tx, service, run);
            }
            match event {
                AppEvent::Key(key) => {
                    let ctx = InputContext {
                        has_error: state.error.is_some(),
                        prompt_open: state.upload.is_open(),
                    };
                    match input::map_key(key, &ctx) {
                        Action::Quit => state.should_quit = true,
                        Action::DismissError => state.clear_error(),
                        Action::CycleFocus => state.cycle_focus(),
                        Action::MoveUp => state.move_cursor_up(),
                        Action::MoveDown => state.move_cursor_down(),
                        Action::Activate => state.activate(),
                        Action::RunTest => {
                            if let Some(id) = state.cursor_test_id() {
                                start_run(state, tx, service, &id);
                            }
                        }
                        Action::NextTab => {
                            state.next_tab();
                            load_report_if_stale(state, tx, service);
                        }
                        Action::ShowTab(n) => {
                            if let Some(tab) = app::TABS.get(n) {
                                state.change_tab(tab.id);
                                load_report_if_stale(state, tx, service);
                            }
                        }
                        Action::RefreshReport => {
                            if service.is_some() {
                                load_report(state, tx, service);
                            } else {
                                state.notify("Offline: showing sample report".to_string());
                            }
                        }
                        Action::OpenUpload => state.upload.open(state.now),
                        Action::OpenTarget => match state.frame_url() {
                            Some(url) => {
                                let url = url.to_string();
                                let tx2 = tx.clone();
                                spawn_monitored(tx.clone(), "open_browser", async move {
                                    if let Err(e) = browser::open_in_browser(&url).await {
                                        tracing::warn!("open browser: {e}");
                                        let error = AppEvent::Error(e.to_string());
                                        post(&tx2, "open_browser", error);
                                    }
                                });
                            }
                            None => state.notify("Nothing to open".to_string()),
                        },
                        Action::PromptInput(c) => state.upload.push(c),
                        Action::PromptBackspace => state.upload.backspace(),
                        Action::PromptSubmit => {
                            let typed = state.upload.buffer().to_string();
                            match state.upload.submit(state.now) {
                                Some(handle) => start_upload(state, tx, handle),
                                None if typed.trim().is_empty() => {}
                                None => state.set_error(format!("Not a file: {}", typed.trim())),
                            }
                        }
                        Action::PromptCancel => state.upload.close(state.now),
                        Action::None => {}
                    }
                }
                AppEvent::Paste(text) => {
                    if state.upload.is_open() {
                        state.upload.paste(&text);
                    } else if let Some(handle) = upload::capture_drop(&text) {
                        start_upload(state, tx, handle);
                    } else {
                        tracing::debug!(len = text.len(), "ignored paste without a path");
                    }
                }
                AppEvent::Tick => state.advance_spinner(),
                AppEvent::FileLoaded { name, content } => {
                    state.pending_uploads = state.pending_uploads.saturating_sub(1);
                    state.add_file(name, Some(content));
                }
                AppEvent::FileFailed { name, error } => {
                    state.pending_uploads = state.pending_uploads.saturating_sub(1);
                    state.upload_failed(&name, &error);
                }
                AppEvent::RunCompleted { test_id, outcome } => {
                    let name = state.test_name(&test_id).to_string();
                    let message = match outcome.as_deref() {
                        Some(status) => format!("{name} {status}"),
                        None => format!("{name} stopped"),
                    };
                    state.notify(message);
                    #[cfg(feature = "desktop-notify")]
                    if state.desktop_notify {
                        notify::send_desktop(&name, outcome.as_deref());
                    }
                }
                AppEvent::ReportLoaded(report) => {
                    tracing::info!(report_id = %report.id, "report loaded");
                    state.set_report(report);
                    state.notify("Report updated".to_string());
                }
                AppEvent::ReportFailed(e) => {
                    state.report_loading = false;
                    state.set_error(format!("{e} (showing last report)"));
                }
                AppEvent::Error(e) => state.set_error(e),
            }
        }

        if state.should_quit {
            events.stop();
            return Ok(());
        }
    }
}

/// Reads a captured file in the background; the result arrives as
/// `FileLoaded` or `FileFailed`.
fn start_upload(state: &mut AppState, tx: &UnboundedSender<AppEvent>, handle: FileHandle) {
    state.pending_uploads += 1;
    tracing::debug!(path = %handle.path.display(), "reading file");
    upload::spawn_read(tx.clone(), handle);
}

fn start_run(state: &mut AppState, tx: &UnboundedSender<AppEvent>, service: &Service, id: &str) {
    state.run_test(id);
    let Some(svc) = service.clone() else {
        return;
    };
    let id = id.to_string();
    let tx2 = tx.clone();
    spawn_monitored(tx.clone(), "run_test", async move {
        if let Err(e) = svc.run_test(&id).await {
            tracing::warn!(test_id = %id, "run_test: {e}");
            post(&tx2, "run_test", AppEvent::Error(e.to_string()));
        }
    });
}

/// Reports an auto-stopped run. Offline, or when the service cannot be
/// reached, the run just ends without a verdict.
fn finish_run(tx: &UnboundedSender<AppEvent>, service: &Service, run: ActiveRun) {
    let Some(svc) = service.clone() else {
        post(
            tx,
            "complete_test",
            AppEvent::RunCompleted {
                test_id: run.test_id,
                outcome: None,
            },
        );
        return;
    };
    let tx2 = tx.clone();
    spawn_monitored(tx.clone(), "complete_test", async move {
        let outcome = match svc.complete_test(&run.test_id).await {
            Ok(done) => Some(done.status),
            Err(e) => {
                tracing::warn!(test_id = %run.test_id, "complete_test: {e}");
                None
            }
        };
        post(
            &tx2,
            "complete_test",
            AppEvent::RunCompleted {
                test_id: run.test_id,
                outcome,
            },
        );
    });
}

fn load_report(state: &mut AppState, tx: &UnboundedSender<AppEvent>, service: &Service) {
    let Some(svc) = service.clone() else {
        return;
    };
    if state.report_loading {
        return;
    }
    state.report_loading = true;
    let tx2 = tx.clone();
    spawn_monitored(tx.clone(), "report", async move {
        let event = match api::latest_report(svc.as_ref()).await {
            Ok(report) => AppEvent::ReportLoaded(report),
            Err(e) => AppEvent::ReportFailed(e.to_string()),
        };
        post(&tx2, "report", event);
    });
}

/// The first visit to the report tab replaces the sample data.
fn load_report_if_stale(state: &mut AppState, tx: &UnboundedSender<AppEvent>, service: &Service) {
    if state.tab() == Some(Tab::Report) && state.report_source == ReportSource::Mock {
        load_report(state, tx, service);
    }
}
