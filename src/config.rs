//! Bar configuration.
//!
//! A [`Config`] is assembled by [`ProgressBarBuilder`](crate::ProgressBarBuilder)
//! and owned by the bar afterwards. Only the maximum and the description can
//! change after construction.

use std::time::Duration;

use compact_str::CompactString;

use crate::{
    error::{Error, Result},
    theme::{DEFAULT_SPINNER, SPINNERS, Theme, spinner_frame},
};

/// Default bar width in columns.
pub const DEFAULT_WIDTH: usize = 40;

/// Everything that shapes how a bar is drawn.
#[derive(Clone, Debug)]
pub struct Config {
    /// Target count. Negative means indeterminate.
    pub max: i64,
    /// Bar width in columns, delimiters excluded.
    pub width: usize,
    /// Glyphs the bar is drawn with.
    pub theme: Theme,
    /// Text shown before (or after) the bar.
    pub description: CompactString,
    /// Minimum time between two redraws.
    pub throttle: Duration,
    /// Show iterations per second.
    pub show_its: bool,
    /// Show `current/max`.
    pub show_count: bool,
    /// Show counts and rates as humanized bytes.
    pub show_bytes: bool,
    /// Replace `[elapsed:remaining]` with `[elapsed]` on the final line.
    pub show_elapsed_on_finish: bool,
    /// Show the time bracket at all.
    pub predict_time: bool,
    /// Decode `[color]` tokens in the description and theme.
    pub color_codes: bool,
    /// Erase the bar instead of drawing the final line.
    pub clear_on_finish: bool,
    /// Stretch the bar to the terminal width.
    pub full_width: bool,
    /// Put the description after everything else.
    pub description_at_line_end: bool,
    /// Write anything at all.
    pub visible: bool,
    /// Humanize bytes with binary (KiB) instead of SI (kB) prefixes.
    pub binary_prefixes: bool,
    /// Draw the 0% state when the bar is built.
    pub render_blank_state: bool,
    /// Index into [`SPINNERS`].
    pub spinner_style: Option<usize>,
    /// Custom spinner frames.
    pub spinner_frames: Option<Vec<CompactString>>,
    /// Byte size of the whole job, used to express progress in bytes.
    pub max_bytes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max: 0,
            width: DEFAULT_WIDTH,
            theme: Theme::default(),
            description: CompactString::default(),
            throttle: Duration::ZERO,
            show_its: false,
            show_count: false,
            show_bytes: false,
            show_elapsed_on_finish: false,
            predict_time: true,
            color_codes: false,
            clear_on_finish: false,
            full_width: false,
            description_at_line_end: false,
            visible: true,
            binary_prefixes: false,
            render_blank_state: false,
            spinner_style: None,
            spinner_frames: None,
            max_bytes: 0,
        }
    }
}

impl Config {
    /// Returns `true` when the total is unknown.
    #[must_use]
    pub const fn is_indeterminate(&self) -> bool {
        self.max < 0
    }

    /// Returns `true` when a rate or byte display needs every update drawn.
    #[must_use]
    pub const fn wants_every_update(&self) -> bool {
        self.show_its || self.show_bytes || self.max_bytes > 0
    }

    /// Returns `true` when the trailing segment should hold a byte rate.
    #[must_use]
    pub const fn shows_byte_rate(&self) -> bool {
        self.show_bytes || self.max_bytes > 0
    }

    /// Checks the spinner configuration without drawing anything.
    ///
    /// # Errors
    ///
    /// See [`spinner_glyph`](Self::spinner_glyph).
    pub fn check_spinner(&self) -> Result<()> {
        self.spinner_glyph(Duration::ZERO).map(|_| ())
    }

    /// The spinner glyph to draw after `elapsed` in indeterminate mode.
    ///
    /// # Errors
    ///
    /// [`Error::ConflictingSpinners`] when both a style and custom frames are
    /// set, [`Error::UnknownSpinnerStyle`] for an out-of-range style.
    pub fn spinner_glyph(&self, elapsed: Duration) -> Result<&str> {
        match (self.spinner_style, &self.spinner_frames) {
            (Some(_), Some(_)) => Err(Error::ConflictingSpinners),
            (None, Some(frames)) => Ok(frames
                .get(spinner_frame(elapsed, frames.len()))
                .map_or("", CompactString::as_str)),
            (style, None) => {
                let style = style.unwrap_or(DEFAULT_SPINNER);
                let frames = SPINNERS
                    .get(style)
                    .ok_or(Error::UnknownSpinnerStyle(style))?;
                Ok(frames
                    .get(spinner_frame(elapsed, frames.len()))
                    .copied()
                    .unwrap_or(""))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Config;
    use crate::error::Error;

    #[test]
    fn test_spinner_resolution() {
        let mut config = Config::default();
        assert_eq!(config.spinner_glyph(Duration::ZERO).unwrap(), "|");
        assert_eq!(config.spinner_glyph(Duration::from_millis(250)).unwrap(), "-");

        config.spinner_frames = Some(vec!["a".into(), "b".into()]);
        assert_eq!(config.spinner_glyph(Duration::from_millis(100)).unwrap(), "b");

        config.spinner_style = Some(3);
        assert!(matches!(
            config.spinner_glyph(Duration::ZERO),
            Err(Error::ConflictingSpinners)
        ));

        config.spinner_frames = None;
        config.spinner_style = Some(10_000);
        assert!(matches!(
            config.spinner_glyph(Duration::ZERO),
            Err(Error::UnknownSpinnerStyle(10_000))
        ));
    }

    #[test]
    fn test_update_policy_flags() {
        let config = Config::default();
        assert!(!config.wants_every_update());
        assert!(!config.is_indeterminate());

        let bytes = Config {
            max_bytes: 1024,
            ..Config::default()
        };
        assert!(bytes.wants_every_update());
        assert!(bytes.shows_byte_rate());
    }
}
