//! The bar controller.
//!
//! [`ProgressBar`] owns the configuration, the [`ProgressState`], the output
//! sink and the completion callback behind a single
//! [`Mutex`](parking_lot::Mutex). Every public operation takes the lock once,
//! so an advance, its throttle decision and the write it triggers are atomic
//! with respect to every other call.
//!
//! # Redraw policy
//!
//! An advance redraws the line when the integer percent changes, when the bar
//! is indeterminate, or when a rate/byte display is active. Redraws closer
//! together than the configured throttle are dropped, except the one that
//! completes the bar and those driven by a rate/byte display.
//!
//! # Completion
//!
//! The completion callback runs exactly once, synchronously and with the lock
//! held. It must not call back into the same bar, or it will deadlock.

use std::{
    fmt,
    io::{self, Write},
    sync::Arc,
};

use compact_str::CompactString;
use parking_lot::Mutex;
use tracing::{debug, trace};
use web_time::Instant;

use crate::{
    builder::ProgressBarBuilder,
    config::Config,
    error::{Error, Result},
    format::{Frame, render_line},
    markup::Markup,
    state::{BarState, ProgressState},
    term::terminal_width,
};

/// Where rendered lines go.
pub(crate) type Sink = Box<dyn Write + Send>;

/// Invoked once when the bar completes.
pub(crate) type Callback = Box<dyn FnMut() + Send>;

/// A thread-safe, cloneable handle to a single-line progress bar.
///
/// Cloning is cheap (Arc bump) and every clone drives the same bar, so a
/// clone can be handed to each worker thread.
///
/// ```
/// use linebar::ProgressBar;
///
/// let bar = ProgressBar::builder(100).with_visible(false).build();
/// for _ in 0..100 {
///     bar.add(1)?;
/// }
/// assert!(bar.is_finished());
/// # Ok::<(), linebar::Error>(())
/// ```
#[derive(Clone)]
pub struct ProgressBar {
    pub(crate) inner: Arc<Mutex<Inner>>,
}

/// Everything guarded by the bar's lock.
pub(crate) struct Inner {
    pub(crate) config: Config,
    pub(crate) state: ProgressState,
    pub(crate) writer: Sink,
    pub(crate) on_completion: Option<Callback>,
}

impl fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("ProgressBar");
        // Never block inside Debug; a busy bar is shown as such.
        match self.inner.try_lock() {
            Some(inner) => debug
                .field("count", &inner.state.count)
                .field("max", &inner.config.max)
                .field("finished", &inner.state.finished)
                .finish(),
            None => debug.field("locked", &true).finish_non_exhaustive(),
        }
    }
}

impl ProgressBar {
    /// Creates a bar with default options writing to stdout.
    ///
    /// A negative `max` makes the bar indeterminate (a spinner).
    #[must_use]
    pub fn new(max: i64) -> Self {
        ProgressBarBuilder::new(max).build()
    }

    /// Starts building a bar with custom options.
    #[must_use]
    pub fn builder(max: i64) -> ProgressBarBuilder {
        ProgressBarBuilder::new(max)
    }

    /// A bar preset for byte transfers: humanized byte counts and rates.
    ///
    /// Pass `-1` when the size of the transfer is unknown.
    #[must_use]
    pub fn for_bytes(max: i64, description: impl Into<CompactString>) -> Self {
        ProgressBarBuilder::new(max)
            .with_description(description)
            .with_show_bytes(true)
            .with_show_count(true)
            .with_spinner_style(14)
            .build()
    }

    // ========================================================================
    // Progress
    // ========================================================================

    /// Advances the bar by `delta` units, redrawing it if due.
    ///
    /// `add(0)` is a cheap way to force the redraw policy to run.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroMaximum`] if the maximum is 0.
    /// * [`Error::ExceedsMaximum`] if the count would pass a known maximum; the
    ///   count is left unchanged.
    /// * [`Error::ConflictingSpinners`] / [`Error::UnknownSpinnerStyle`] for an
    ///   invalid spinner configuration.
    /// * [`Error::Io`] if writing the line fails. The advance itself has
    ///   already been applied in that case.
    pub fn add(&self, delta: u64) -> Result<()> {
        self.inner.lock().advance(delta, Instant::now(), false)
    }

    /// Fills the bar to its maximum and draws the final line.
    ///
    /// The completion callback fires if it has not already. Calling this more
    /// than once is harmless. An indeterminate bar is marked finished at its
    /// current count.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn finish(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        let now = Instant::now();

        if inner.config.is_indeterminate() {
            if inner.state.finished {
                return Ok(());
            }
            return inner.complete(now);
        }

        // Validate before touching the count so a failed finish changes nothing.
        inner.config.check_spinner()?;
        if inner.config.max > 0 {
            inner.state.count = inner.config.max;
        }
        inner.advance(0, now, true)
    }

    /// Restarts the clock and zeroes every counter, keeping the configuration.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        let line_width = inner.state.line_width;
        inner.state = ProgressState::new(Instant::now());
        // Still on screen, so the next draw must erase it.
        inner.state.line_width = line_width;
        debug!("progress bar reset");
    }

    /// Replaces the maximum.
    ///
    /// Not checked against the current count: a later [`add`](Self::add) fails
    /// with [`Error::ExceedsMaximum`] if the count is already past `max`.
    pub fn change_max(&self, max: i64) {
        let mut inner = self.inner.lock();
        debug!(old = inner.config.max, new = max, "progress bar max changed");
        inner.config.max = max;
    }

    /// Replaces the description shown next to the bar.
    pub fn describe(&self, description: impl Into<CompactString>) {
        self.inner.lock().config.description = description.into();
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Draws the current state regardless of the throttle.
    ///
    /// Mostly useful to show the empty bar before any work happens.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the write fails, or a spinner configuration error.
    pub fn render_blank(&self) -> Result<()> {
        self.inner.lock().render(Instant::now(), true)
    }

    /// Erases the bar from the current line.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the write fails.
    pub fn clear(&self) -> Result<()> {
        self.inner.lock().erase()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The configured maximum (negative when indeterminate).
    #[must_use]
    pub fn max(&self) -> i64 {
        self.inner.lock().config.max
    }

    /// The current count.
    #[must_use]
    pub fn current(&self) -> i64 {
        self.inner.lock().state.count
    }

    /// Whether the bar has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.inner.lock().state.finished
    }

    /// A consistent snapshot of the bar's numbers.
    #[must_use]
    pub fn state(&self) -> BarState {
        let inner = self.inner.lock();
        inner.state.snapshot(&inner.config, Instant::now())
    }
}

impl Inner {
    /// Validates and applies `delta`, then runs the redraw policy.
    fn advance(&mut self, delta: u64, now: Instant, force: bool) -> Result<()> {
        let max = self.config.max;
        if max == 0 {
            return Err(Error::ZeroMaximum);
        }
        self.config.check_spinner()?;

        let current = self.state.count;
        let delta = i64::try_from(delta).unwrap_or(i64::MAX);
        if max > 0 && current.saturating_add(delta) > max {
            return Err(Error::ExceedsMaximum {
                current,
                delta,
                max,
            });
        }

        let percent_changed = self.state.apply(delta, &self.config, now);
        if force
            || percent_changed
            || self.config.is_indeterminate()
            || self.config.wants_every_update()
        {
            self.render(now, force)
        } else {
            trace!(count = self.state.count, "percent unchanged, skipping redraw");
            Ok(())
        }
    }

    /// Draws the line unless throttled, completing the bar when it is full.
    pub(crate) fn render(&mut self, now: Instant, force: bool) -> Result<()> {
        let max = self.config.max;
        let completing = !self.state.finished && max > 0 && self.state.count >= max;

        if !force
            && !completing
            && !self.config.wants_every_update()
            && now.saturating_duration_since(self.state.last_shown) < self.config.throttle
        {
            trace!("throttled redraw");
            return Ok(());
        }

        if completing {
            return self.complete(now);
        }
        if self.state.finished {
            return Ok(());
        }

        let line = self.line(now)?;
        self.draw(&line)?;
        self.state.last_shown = now;
        Ok(())
    }

    /// Marks the bar finished, draws (or erases) the final line and fires the
    /// completion callback.
    fn complete(&mut self, now: Instant) -> Result<()> {
        self.state.finished = true;
        debug!(count = self.state.count, "progress bar finished");

        let drawn = if self.config.clear_on_finish {
            self.erase()
        } else {
            self.line(now).and_then(|line| self.draw(&line))
        };
        self.state.last_shown = now;

        if let Some(on_completion) = self.on_completion.as_mut() {
            on_completion();
        }
        drawn
    }

    fn line(&self, now: Instant) -> Result<Markup> {
        let elapsed = self.state.elapsed(now);
        let spinner = if self.config.is_indeterminate() {
            self.config.spinner_glyph(elapsed)?
        } else {
            ""
        };
        let terminal_width = if self.config.full_width {
            terminal_width()
        } else {
            0
        };

        let frame = Frame {
            count: self.state.count,
            percent: self.state.percent,
            elapsed,
            rate: self
                .state
                .rate
                .smoothed(self.state.count, elapsed, self.state.finished),
            current_bytes: self.state.current_bytes,
            finished: self.state.finished,
            spinner,
            terminal_width,
        };
        Ok(render_line(&frame, &self.config))
    }

    /// Erases the previous line and writes `line` in its place.
    fn draw(&mut self, line: &Markup) -> Result<()> {
        if !self.config.visible {
            return Ok(());
        }

        let mut out = blank_line(self.state.line_width);
        out.push_str(&line.render());
        self.write(&out)?;
        self.state.line_width = line.visible_width();
        Ok(())
    }

    /// Overwrites the previous line with spaces and returns to its start.
    pub(crate) fn erase(&mut self) -> Result<()> {
        if !self.config.visible {
            return Ok(());
        }

        let out = blank_line(self.state.line_width);
        self.write(&out)?;
        self.state.line_width = 0;
        Ok(())
    }

    fn write(&mut self, out: &str) -> io::Result<()> {
        self.writer.write_all(out.as_bytes())?;
        // Some sinks (stdout on a few platforms) cannot be synced.
        if let Err(err) = self.writer.flush() {
            trace!(%err, "ignoring flush failure");
        }
        Ok(())
    }
}

/// `\r`, `width` spaces, `\r`.
fn blank_line(width: usize) -> String {
    let mut out = String::with_capacity(width + 2);
    out.push('\r');
    out.extend(std::iter::repeat_n(' ', width));
    out.push('\r');
    out
}
