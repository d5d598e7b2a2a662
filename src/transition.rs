//! Show/hide lifecycle for animated panels.
//!
//! A [`Transition`] stays mounted for `duration` after `show` goes false so the
//! exit styling can play, then unmounts. Showing again while hiding cancels
//! the pending unmount. The machine knows nothing about rendering; see
//! `tui::transition` for how each [`Kind`] is drawn.

use crate::timer::Deadline;
use std::time::{Duration, Instant};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Fade,
    Slide(SlideDirection),
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Visible,
    Hiding,
}

#[derive(Debug, Clone)]
pub struct Transition {
    kind: Kind,
    duration: Duration,
    phase: Phase,
    unmount: Deadline,
}

impl Transition {
    pub fn new(kind: Kind, show: bool) -> Self {
        Self {
            kind,
            duration: DEFAULT_DURATION,
            phase: if show { Phase::Visible } else { Phase::Unmounted },
            unmount: Deadline::new(),
        }
    }

    pub fn fade(show: bool) -> Self {
        Self::new(Kind::Fade, show)
    }

    pub fn slide(direction: SlideDirection, show: bool) -> Self {
        Self::new(Kind::Slide(direction), show)
    }

    pub fn scale(show: bool) -> Self {
        Self::new(Kind::Scale, show)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase != Phase::Unmounted
    }

    pub fn is_hiding(&self) -> bool {
        self.phase == Phase::Hiding
    }

    pub fn set_show(&mut self, show: bool, now: Instant) {
        match (show, self.phase) {
            (true, Phase::Unmounted | Phase::Hiding) => {
                self.unmount.cancel();
                self.phase = Phase::Visible;
            }
            (false, Phase::Visible) => {
                self.unmount.arm(now, self.duration);
                self.phase = Phase::Hiding;
            }
            _ => {}
        }
    }

    /// Advances the pending unmount. Returns `true` if this call unmounted.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.phase == Phase::Hiding && self.unmount.poll(now) {
            self.phase = Phase::Unmounted;
            return true;
        }
        false
    }

    /// 0.0 while visible, rising to 1.0 as the exit runs out.
    pub fn hide_progress(&self, now: Instant) -> f32 {
        match self.phase {
            Phase::Visible => 0.0,
            Phase::Unmounted => 1.0,
            Phase::Hiding => {
                if self.duration.is_zero() {
                    return 1.0;
                }
                let left = self.unmount.remaining(now).unwrap_or(Duration::ZERO);
                1.0 - (left.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
            }
        }
    }
}
