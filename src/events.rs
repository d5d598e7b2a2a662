//! Terminal input thread and application event channel.
//!
//! [`EventHandler`] reads crossterm events on an OS thread because
//! `crossterm::event::poll()` blocks. Background tasks (file reads, service
//! calls) post their results onto the same channel, so all state changes
//! happen on the UI loop.

use crate::model::Report;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinError;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Bracketed paste. Dropping a file onto the terminal arrives this way.
    Paste(String),
    Tick,
    FileLoaded {
        name: String,
        content: String,
    },
    FileFailed {
        name: String,
        error: String,
    },
    /// The service's verdict for an auto-stopped run ("passed"/"failed"),
    /// `None` offline or when the service could not be reached.
    RunCompleted {
        test_id: String,
        outcome: Option<String>,
    },
    ReportLoaded(Report),
    ReportFailed(String),
    /// Global toast, auto-dismisses after `ERROR_TTL_SECS`.
    Error(String),
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = shutdown.clone();

        let thread = std::thread::spawn(move || {
            while !shutdown_flag.load(Ordering::Relaxed) {
                match event::poll(tick_rate) {
                    Err(e) => {
                        let _ = event_tx.send(AppEvent::Error(format!("Terminal poll error: {e}")));
                        break;
                    }
                    Ok(false) => {
                        if event_tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                        continue;
                    }
                    Ok(true) => {}
                }
                let forwarded = match event::read() {
                    Ok(CrosstermEvent::Key(key)) => Some(AppEvent::Key(key)),
                    Ok(CrosstermEvent::Paste(text)) => Some(AppEvent::Paste(text)),
                    // Redraw happens on the next tick anyway
                    Ok(_) => None,
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => None,
                    Err(e) => {
                        let _ = event_tx.send(AppEvent::Error(format!("Terminal read error: {e}")));
                        break;
                    }
                };
                if let Some(ev) = forwarded {
                    if event_tx.send(ev).is_err() {
                        break;
                    }
                }
            }
        });

        Self {
            rx,
            tx,
            shutdown,
            thread: Some(thread),
        }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::error!("input thread panicked");
            }
        }
    }
}

/// Posts `event`, logging instead of failing when the UI loop is gone.
pub fn post(tx: &UnboundedSender<AppEvent>, label: &str, event: AppEvent) {
    if tx.send(event).is_err() {
        tracing::warn!("{label}: channel closed, event dropped");
    }
}

fn crash_message(join_err: JoinError) -> String {
    if !join_err.is_panic() {
        return "task cancelled".to_string();
    }
    match join_err.into_panic().downcast::<String>() {
        Ok(s) => *s,
        Err(payload) => match payload.downcast::<&str>() {
            Ok(s) => s.to_string(),
            Err(_) => "unknown panic".to_string(),
        },
    }
}

/// Runs a fire-and-forget task. A panic surfaces as an [`AppEvent::Error`].
pub fn spawn_monitored(
    tx: UnboundedSender<AppEvent>,
    label: &'static str,
    fut: impl Future<Output = ()> + Send + 'static,
) {
    tokio::spawn(async move {
        if let Err(join_err) = tokio::spawn(fut).await {
            let msg = crash_message(join_err);
            tracing::error!("{label} panicked: {msg}");
            post(&tx, label, AppEvent::Error(format!("{label} crashed: {msg}")));
        }
    });
}

/// Runs a task whose result is an event. Exactly one event is posted: the
/// task's own, or `on_crash(message)` if it panics, so a caller counting
/// outstanding work always hears back.
pub fn spawn_reporting<F, C>(
    tx: UnboundedSender<AppEvent>,
    label: &'static str,
    fut: F,
    on_crash: C,
) -> tokio::task::JoinHandle<()>
where
    F: Future<Output = AppEvent> + Send + 'static,
    C: FnOnce(String) -> AppEvent + Send + 'static,
{
    tokio::spawn(async move {
        let event = match tokio::spawn(fut).await {
            Ok(event) => event,
            Err(join_err) => {
                let msg = crash_message(join_err);
                tracing::error!("{label} panicked: {msg}");
                on_crash(format!("{label} crashed: {msg}"))
            }
        };
        post(&tx, label, event);
    })
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        // Signal only; joining here could block on a pending poll during unwinding.
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
