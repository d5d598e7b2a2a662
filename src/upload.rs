//! File capture: a path prompt for explicit selection, and paste handling for
//! files dragged onto the terminal (terminals paste the dropped path).
//!
//! Capture produces a [`FileHandle`]; [`spawn_read`] loads it off the UI
//! loop. No type or size checks are made.

use crate::events::{self, AppEvent};
use crate::transition::{SlideDirection, Transition};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub name: String,
}

impl FileHandle {
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self { path, name })
    }
}

#[derive(Debug, Clone)]
pub struct UploadPrompt {
    open: bool,
    buffer: String,
    pub reveal: Transition,
}

impl Default for UploadPrompt {
    fn default() -> Self {
        Self {
            open: false,
            buffer: String::new(),
            reveal: Transition::slide(SlideDirection::Up, false),
        }
    }
}

impl UploadPrompt {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn open(&mut self, now: Instant) {
        self.open = true;
        self.reveal.set_show(true, now);
    }

    pub fn close(&mut self, now: Instant) {
        self.open = false;
        self.buffer.clear();
        self.reveal.set_show(false, now);
    }

    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Pasted text while the prompt is open goes into the buffer verbatim.
    pub fn paste(&mut self, text: &str) {
        self.buffer.push_str(text.trim_end_matches(['\r', '\n']));
    }

    /// Captures the typed path. The prompt stays open when the buffer does not
    /// name a file, and resets after a successful capture.
    pub fn submit(&mut self, now: Instant) -> Option<FileHandle> {
        let handle = normalize_path(&self.buffer).and_then(FileHandle::from_path)?;
        self.close(now);
        Some(handle)
    }
}

/// Handles a paste outside the prompt as a drop. Only the first dropped file
/// is taken.
pub fn capture_drop(pasted: &str) -> Option<FileHandle> {
    first_dropped_path(pasted).and_then(FileHandle::from_path)
}

/// Cleans a single typed path: surrounding whitespace and matching quotes,
/// a `file://` scheme, and `\ ` escapes.
pub fn normalize_path(raw: &str) -> Option<PathBuf> {
    let mut s = raw.trim();
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
            break;
        }
    }
    to_local_path(&s.replace("\\ ", " "))
}

/// Splits a dropped-file paste into its first path. Terminals separate
/// multiple dropped files with whitespace or newlines, quoting or
/// backslash-escaping paths that contain spaces.
pub fn first_dropped_path(pasted: &str) -> Option<PathBuf> {
    let mut chars = pasted.trim_start().chars().peekable();
    let mut token = String::new();
    let quote = match chars.peek() {
        Some(&q @ ('"' | '\'')) => {
            chars.next();
            Some(q)
        }
        _ => None,
    };

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => break,
            (None, '\\') => {
                if let Some(escaped) = chars.next() {
                    token.push(escaped);
                }
            }
            (None, c) if c.is_whitespace() => break,
            (_, c) => token.push(c),
        }
    }

    to_local_path(&token)
}

/// A `file://` URI (with or without a `localhost` host) becomes the path it
/// names. Anything else is taken as a path already.
fn to_local_path(s: &str) -> Option<PathBuf> {
    if s.is_empty() {
        return None;
    }
    if s.starts_with("file://") {
        return Url::parse(s).ok()?.to_file_path().ok();
    }
    Some(PathBuf::from(s))
}

/// Reads a captured file. Content is decoded lossily so binary files still
/// preview.
pub async fn read_handle(handle: FileHandle) -> AppEvent {
    let FileHandle { path, name } = handle;
    match tokio::fs::read(&path).await {
        Ok(bytes) => AppEvent::FileLoaded {
            name,
            content: String::from_utf8_lossy(&bytes).into_owned(),
        },
        Err(e) => {
            tracing::debug!(path = %path.display(), "read failed: {e}");
            AppEvent::FileFailed {
                name,
                error: e.to_string(),
            }
        }
    }
}

/// Reads `handle` on a background task. Exactly one `FileLoaded` or
/// `FileFailed` is posted for it, even if the read panics.
pub fn spawn_read(tx: UnboundedSender<AppEvent>, handle: FileHandle) -> JoinHandle<()> {
    let name = handle.name.clone();
    events::spawn_reporting(tx, "read_file", read_handle(handle), move |error| {
        AppEvent::FileFailed { name, error }
    })
}
