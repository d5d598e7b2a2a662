//! Terminal rendering of [`Transition`] visual states.
//!
//! Fade dims, Slide dims and shifts the area up to [`SLIDE_CELLS`] in its
//! direction as the exit progresses, Scale dims and pulls the edges in by one
//! cell.

use crate::transition::{Kind, SlideDirection, Transition};
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use std::time::Instant;

pub const SLIDE_CELLS: u16 = 2;

/// Where a mounted transition draws. `None` once unmounted.
pub fn area(t: &Transition, area: Rect, now: Instant) -> Option<Rect> {
    if !t.is_mounted() {
        return None;
    }
    if !t.is_hiding() {
        return Some(area);
    }
    let rect = match t.kind() {
        Kind::Fade => area,
        Kind::Scale => area.inner(Margin {
            horizontal: 1,
            vertical: 1,
        }),
        Kind::Slide(direction) => {
            let offset = (t.hide_progress(now) * f32::from(SLIDE_CELLS)).round() as u16;
            slide(area, direction, offset)
        }
    };
    Some(rect)
}

/// Styling applied to content inside the transition.
pub fn style(t: &Transition) -> Style {
    if t.is_hiding() {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default()
    }
}

// The exit moves content away from where it came in: an `Up` slide sinks, a
// `Left` slide drifts right. The area shrinks rather than leaving its parent.
fn slide(area: Rect, direction: SlideDirection, offset: u16) -> Rect {
    match direction {
        SlideDirection::Up => {
            let d = offset.min(area.height);
            Rect::new(area.x, area.y + d, area.width, area.height - d)
        }
        SlideDirection::Down => Rect::new(area.x, area.y, area.width, area.height.saturating_sub(offset)),
        SlideDirection::Left => {
            let d = offset.min(area.width);
            Rect::new(area.x + d, area.y, area.width - d, area.height)
        }
        SlideDirection::Right => Rect::new(area.x, area.y, area.width.saturating_sub(offset), area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const AREA: Rect = Rect {
        x: 10,
        y: 5,
        width: 40,
        height: 10,
    };

    fn hidden_at(mut t: Transition, t0: Instant) -> Transition {
        t.set_show(false, t0);
        t
    }

    #[test]
    fn visible_uses_full_area_and_plain_style() {
        let t = Transition::scale(true);
        assert_eq!(area(&t, AREA, Instant::now()), Some(AREA));
        assert_eq!(style(&t), Style::default());
    }

    #[test]
    fn unmounted_draws_nothing() {
        assert_eq!(area(&Transition::fade(false), AREA, Instant::now()), None);
    }

    #[test]
    fn scale_insets_while_hiding() {
        let t0 = Instant::now();
        let t = hidden_at(Transition::scale(true), t0);
        assert_eq!(area(&t, AREA, t0), Some(Rect::new(11, 6, 38, 8)));
        assert!(style(&t).add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn fade_keeps_area() {
        let t0 = Instant::now();
        let t = hidden_at(Transition::fade(true), t0);
        assert_eq!(area(&t, AREA, t0 + Duration::from_millis(150)), Some(AREA));
    }

    #[test]
    fn slide_up_sinks_with_progress() {
        let t0 = Instant::now();
        let t = hidden_at(Transition::slide(SlideDirection::Up, true), t0);
        assert_eq!(area(&t, AREA, t0), Some(AREA));
        let end = area(&t, AREA, t0 + Duration::from_millis(300)).unwrap();
        assert_eq!(end, Rect::new(10, 7, 40, 8));
    }

    #[test]
    fn slide_left_drifts_right() {
        let t0 = Instant::now();
        let t = hidden_at(Transition::slide(SlideDirection::Left, true), t0);
        let end = area(&t, AREA, t0 + Duration::from_millis(300)).unwrap();
        assert_eq!(end, Rect::new(12, 5, 38, 10));
    }

    #[test]
    fn slide_never_leaves_tiny_area() {
        assert_eq!(slide(Rect::new(0, 0, 1, 1), SlideDirection::Up, 2), Rect::new(0, 1, 1, 0));
        assert_eq!(slide(Rect::new(0, 0, 1, 1), SlideDirection::Right, 2), Rect::new(0, 0, 0, 1));
    }
}
