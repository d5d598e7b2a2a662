//! The embedded preview window: a file's content, a running test's target, a
//! loading placeholder, or the empty prompt.
//!
//! Content is only considered ready a fixed debounce after the
//! `(selected file, running)` pair changes. There is no real readiness signal.

use crate::timer::Deadline;
use crate::transition::Transition;
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub const TITLE_TEST: &str = "Test Browser";
pub const TITLE_IDLE: &str = "Embedded Window";
pub const EMPTY_PROMPT: &str = "Select a file to view its content or run a test";
pub const NO_CONTENT: &str = "No content to display for this file.";

/// Capabilities granted to a test target shown in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePolicy {
    pub same_origin: bool,
    pub scripts: bool,
    pub popups: bool,
    pub forms: bool,
    pub top_navigation: bool,
}

impl FramePolicy {
    /// Same-origin, scripts, popups and forms only.
    pub const ISOLATED: Self = Self {
        same_origin: true,
        scripts: true,
        popups: true,
        forms: true,
        top_navigation: false,
    };

    /// The policy as an iframe `sandbox` attribute value.
    pub fn sandbox_attr(&self) -> String {
        [
            (self.same_origin, "allow-same-origin"),
            (self.scripts, "allow-scripts"),
            (self.popups, "allow-popups"),
            (self.forms, "allow-forms"),
            (self.top_navigation, "allow-top-navigation"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowView<'a> {
    Loading,
    TestFrame { url: &'a str, policy: FramePolicy },
    FilePreview { name: &'a str, content: Option<&'a str> },
    Empty,
}

/// Inputs whose change restarts the debounce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowKey {
    pub file_id: Option<String>,
    pub running: bool,
}

impl WindowKey {
    fn has_subject(&self) -> bool {
        self.file_id.is_some() || self.running
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddedWindow {
    key: WindowKey,
    ready: bool,
    debounce: Deadline,
    delay: Duration,
    pub reveal: Transition,
}

impl EmbeddedWindow {
    pub fn new(delay: Duration) -> Self {
        Self {
            key: WindowKey::default(),
            ready: false,
            debounce: Deadline::new(),
            delay,
            reveal: Transition::scale(false),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn sync(&mut self, key: WindowKey, now: Instant) {
        if key == self.key {
            return;
        }
        self.key = key;
        self.ready = false;
        self.reveal.set_show(false, now);
        self.debounce.arm(now, self.delay);
    }

    pub fn tick(&mut self, now: Instant) {
        if self.debounce.poll(now) {
            self.ready = self.key.has_subject();
            self.reveal.set_show(self.ready, now);
        }
        self.reveal.tick(now);
    }
}

impl Default for EmbeddedWindow {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
