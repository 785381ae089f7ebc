//! Terminal width lookup.

use terminal_size::{Width, terminal_size};

/// Width assumed when the terminal cannot be queried.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Widest terminal taken at face value.
pub const MAX_TERMINAL_WIDTH: usize = 500;

/// Returns the terminal width in columns.
///
/// Falls back to [`DEFAULT_TERMINAL_WIDTH`] when no terminal is attached or the
/// reported width is outside `1..=MAX_TERMINAL_WIDTH`.
#[must_use]
pub fn terminal_width() -> usize {
    clamp_width(terminal_size().map(|(Width(w), _)| usize::from(w)))
}

fn clamp_width(width: Option<usize>) -> usize {
    width
        .filter(|w| (1..=MAX_TERMINAL_WIDTH).contains(w))
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}
