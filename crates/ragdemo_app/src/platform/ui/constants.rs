use std::time::Duration;

/// Pixel height of one rendered docs line; section tops are reported in
/// pixels so the core trigger band applies unchanged.
pub const LINE_HEIGHT_PX: f64 = 24.0;
pub const DOCS_VIEWPORT_LINES: usize = 18;
/// Blank lines after each docs section.
pub const SECTION_GAP_LINES: usize = 1;

/// Idle wake-up for the event loop; each timeout dispatches `Msg::Tick`.
pub const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub const PROMPT: &str = "> ";
