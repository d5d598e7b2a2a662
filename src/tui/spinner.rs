const FRAMES: [&str; crate::app::SPINNER_FRAME_COUNT] =
    ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn frame(idx: usize) -> &'static str {
    FRAMES[idx % FRAMES.len()]
}
