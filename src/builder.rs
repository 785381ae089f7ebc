//! Fluent interface for constructing [`ProgressBar`] instances.
//!
//! [`ProgressBar::new`] covers the common case. The [`ProgressBarBuilder`]
//! exposes every option: output sink, theme, throttle, counters and rates,
//! spinners, and the completion callback.
//!
//! ```
//! use std::time::Duration;
//!
//! use linebar::{ProgressBarBuilder, Theme};
//!
//! let bar = ProgressBarBuilder::new(1000)
//!     .with_writer(std::io::sink())
//!     .with_width(20)
//!     .with_theme(Theme::ascii())
//!     .with_description("indexing")
//!     .with_throttle(Duration::from_millis(65))
//!     .with_show_count(true)
//!     .build();
//! # assert_eq!(bar.max(), 1000);
//! ```

use std::{
    io::{self, Write},
    sync::Arc,
    time::Duration,
};

use compact_str::CompactString;
use parking_lot::Mutex;
use tracing::{debug, warn};
use web_time::Instant;

use crate::{
    config::Config,
    progress::{Callback, Inner, ProgressBar, Sink},
    state::ProgressState,
    theme::Theme,
};

/// A builder pattern for constructing [`ProgressBar`] instances.
///
/// Every option starts at the default documented on [`Config`].
#[must_use]
pub struct ProgressBarBuilder {
    config: Config,
    writer: Option<Sink>,
    on_completion: Option<Callback>,
}

impl ProgressBarBuilder {
    /// Starts building a bar counting towards `max`.
    ///
    /// A negative `max` makes the bar indeterminate.
    pub fn new(max: i64) -> Self {
        Self {
            config: Config {
                max,
                ..Config::default()
            },
            writer: None,
            on_completion: None,
        }
    }

    /// Sets the output sink (defaults to stdout).
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Sets the bar width in columns.
    pub const fn with_width(mut self, width: usize) -> Self {
        self.config.width = width;
        self
    }

    /// Sets the glyphs the bar is drawn with.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    /// Sets the text rendered in front of the bar.
    pub fn with_description(mut self, description: impl Into<CompactString>) -> Self {
        self.config.description = description.into();
        self
    }

    /// Waits at least `throttle` between two redraws.
    pub const fn with_throttle(mut self, throttle: Duration) -> Self {
        self.config.throttle = throttle;
        self
    }

    /// Shows iterations per second.
    pub const fn with_show_its(mut self, show: bool) -> Self {
        self.config.show_its = show;
        self
    }

    /// Shows `current/max`.
    pub const fn with_show_count(mut self, show: bool) -> Self {
        self.config.show_count = show;
        self
    }

    /// Shows counts and rates as humanized bytes.
    pub const fn with_show_bytes(mut self, show: bool) -> Self {
        self.config.show_bytes = show;
        self
    }

    /// Shows only the elapsed time on the final line.
    pub const fn with_show_elapsed_on_finish(mut self, show: bool) -> Self {
        self.config.show_elapsed_on_finish = show;
        self
    }

    /// Shows the `[elapsed:remaining]` bracket (on by default).
    pub const fn with_predict_time(mut self, predict: bool) -> Self {
        self.config.predict_time = predict;
        self
    }

    /// Decodes `[color]` tokens in the description and theme.
    pub const fn with_color_codes(mut self, enabled: bool) -> Self {
        self.config.color_codes = enabled;
        self
    }

    /// Erases the bar once it completes.
    pub const fn with_clear_on_finish(mut self, clear: bool) -> Self {
        self.config.clear_on_finish = clear;
        self
    }

    /// Stretches the bar to fill the terminal.
    pub const fn with_full_width(mut self, full: bool) -> Self {
        self.config.full_width = full;
        self
    }

    /// Renders the description after everything else.
    pub const fn with_description_at_line_end(mut self, at_end: bool) -> Self {
        self.config.description_at_line_end = at_end;
        self
    }

    /// Hides the bar while still tracking progress.
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.config.visible = visible;
        self
    }

    /// Humanizes bytes with binary prefixes (KiB, MiB).
    pub const fn with_binary_prefixes(mut self, binary: bool) -> Self {
        self.config.binary_prefixes = binary;
        self
    }

    /// Draws the empty bar as soon as it is built.
    pub const fn with_render_blank_state(mut self, render: bool) -> Self {
        self.config.render_blank_state = render;
        self
    }

    /// Uses one of the built-in [`SPINNERS`](crate::theme::SPINNERS).
    pub const fn with_spinner_style(mut self, style: usize) -> Self {
        self.config.spinner_style = Some(style);
        self
    }

    /// Uses custom spinner frames.
    pub fn with_spinner_frames<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.config.spinner_frames = Some(frames.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the byte size of the whole job, enabling a byte rate display.
    pub const fn with_max_bytes(mut self, max_bytes: i64) -> Self {
        self.config.max_bytes = max_bytes;
        self
    }

    /// Runs `on_completion` once when the bar completes.
    ///
    /// The callback runs while the bar is locked and must not use the bar.
    pub fn with_on_completion(mut self, on_completion: impl FnMut() + Send + 'static) -> Self {
        self.on_completion = Some(Box::new(on_completion));
        self
    }

    /// Consumes the builder and returns the constructed [`ProgressBar`].
    ///
    /// With [`with_render_blank_state`](Self::with_render_blank_state) the
    /// empty bar is drawn right away; a failure to do so is logged, not
    /// returned.
    #[must_use]
    pub fn build(self) -> ProgressBar {
        let render_blank = self.config.render_blank_state;
        debug!(max = self.config.max, width = self.config.width, "progress bar created");

        let bar = ProgressBar {
            inner: Arc::new(Mutex::new(Inner {
                config: self.config,
                state: ProgressState::new(Instant::now()),
                writer: self.writer.unwrap_or_else(|| Box::new(io::stdout())),
                on_completion: self.on_completion,
            })),
        };

        if render_blank {
            if let Err(err) = bar.render_blank() {
                warn!(%err, "failed to render blank progress bar");
            }
        }
        bar
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::ProgressBarBuilder;

    /// Option Plumbing
    /// Every builder option lands in the bar's configuration.
    #[test]
    fn test_options_are_applied() {
        let bar = ProgressBarBuilder::new(999)
            .with_writer(std::io::sink())
            .with_width(888)
            .with_description("desc")
            .with_throttle(Duration::from_millis(5))
            .with_show_its(true)
            .with_max_bytes(4096)
            .with_spinner_frames(["x", "y"])
            .build();

        let inner = bar.inner.lock();
        let config = &inner.config;
        assert_eq!(config.max, 999);
        assert_eq!(config.width, 888);
        assert_eq!(config.description, "desc");
        assert_eq!(config.throttle, Duration::from_millis(5));
        assert!(config.show_its);
        assert_eq!(config.max_bytes, 4096);
        assert_eq!(config.spinner_frames.as_deref().map(<[_]>::len), Some(2));
        assert!(config.predict_time, "predict_time defaults to on");
    }
}
