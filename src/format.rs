//! Pure line formatting.
//!
//! [`render_line`] maps a [`Frame`] and a [`Config`] to the [`Markup`] of one
//! terminal line. It performs no I/O and touches no shared state.
//!
//! Determinate layout:
//!
//! ```text
//! {desc}{percent:>4}% {bar} {trailing} [{elapsed}:{remaining}]
//! ```
//!
//! Without time prediction the bracket holds `[{count}:{max}]` instead.
//!
//! Indeterminate layout:
//!
//! ```text
//! {spinner} {desc} {trailing} [{elapsed}]
//! ```

use std::time::Duration;

use indicatif::{BinaryBytes, DecimalBytes};

use crate::{config::Config, markup::Markup, state::bytes_per_unit};

/// Everything about the bar's progress that a line depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame<'a> {
    /// Units completed.
    pub count: i64,
    /// Integer percent complete.
    pub percent: i64,
    /// Time since start.
    pub elapsed: Duration,
    /// Throughput in units per second.
    pub rate: f64,
    /// Progress in bytes.
    pub current_bytes: f64,
    /// Whether this is the final line.
    pub finished: bool,
    /// Spinner glyph for indeterminate bars.
    pub spinner: &'a str,
    /// Terminal width, used with [`Config::full_width`].
    pub terminal_width: usize,
}

/// Formats one line.
#[must_use]
pub fn render_line(frame: &Frame<'_>, config: &Config) -> Markup {
    if config.is_indeterminate() {
        return indeterminate_line(frame, config);
    }

    if config.full_width {
        let rest = determinate_line(frame, config, 0).visible_width();
        let width = frame.terminal_width.saturating_sub(rest + 1);
        determinate_line(frame, config, width)
    } else {
        determinate_line(frame, config, config.width)
    }
}

fn determinate_line(frame: &Frame<'_>, config: &Config, width: usize) -> Markup {
    let description = Markup::parse(&config.description, config.color_codes);
    let mut line = Markup::new();

    if !config.description_at_line_end {
        line.push_markup(&description);
    }
    line.push_str(&format!("{:4}% ", frame.percent));
    line.push_markup(&bar(frame.percent, width, config));
    line.push_str(" ");
    line.push_str(&trailing(frame, config));

    if !config.predict_time {
        line.push_str(&format!(" [{}:{}]", frame.count, config.max));
    } else if frame.finished && config.show_elapsed_on_finish {
        line.push_str(&format!(" [{}]", format_duration(frame.elapsed)));
    } else {
        let elapsed = format_duration(frame.elapsed);
        let remaining = format_duration(remaining(frame, config.max));
        line.push_str(&format!(" [{elapsed}:{remaining}]"));
    }

    if config.description_at_line_end && !description.is_empty() {
        line.push_str(" ");
        line.push_markup(&description);
    }
    line
}

fn indeterminate_line(frame: &Frame<'_>, config: &Config) -> Markup {
    let description = Markup::parse(&config.description, config.color_codes);
    let mut pieces: Vec<Markup> = Vec::new();

    if !frame.finished {
        pieces.push(Markup::parse(frame.spinner, config.color_codes));
    }
    if !config.description_at_line_end {
        pieces.push(description.clone());
    }
    pieces.push(Markup::parse(&trailing(frame, config), false));
    if config.predict_time {
        let elapsed = format!("[{}]", format_duration(frame.elapsed));
        pieces.push(Markup::parse(&elapsed, false));
    }
    if config.description_at_line_end {
        pieces.push(description);
    }

    let mut line = Markup::new();
    for piece in pieces.iter().filter(|piece| !piece.is_empty()) {
        if !line.is_empty() {
            line.push_str(" ");
        }
        line.push_markup(piece);
    }
    line
}

/// Draws `bar_start`, the fill, the padding and `bar_end` for `width` columns.
fn bar(percent: i64, width: usize, config: &Config) -> Markup {
    let decode = config.color_codes;
    let theme = &config.theme;
    let saucer = Markup::parse(&theme.saucer, decode);
    let fill = usize::try_from(percent.clamp(0, 100)).unwrap_or(0) * width / 100;

    let mut line = Markup::parse(&theme.bar_start, decode);
    if fill > 0 {
        line.push_repeated(&saucer, fill - 1);
        if theme.saucer_head.is_empty() || fill == width {
            line.push_markup(&saucer);
        } else {
            line.push_markup(&Markup::parse(&theme.saucer_head, decode));
        }
    }
    line.push_repeated(&Markup::parse(&theme.saucer_padding, decode), width - fill);
    line.push_markup(&Markup::parse(&theme.bar_end, decode));
    line
}

/// The parenthesised count/rate segment, or an empty string.
#[allow(clippy::cast_precision_loss)]
fn trailing(frame: &Frame<'_>, config: &Config) -> String {
    let mut parts = Vec::new();

    if config.show_count {
        let total = if config.is_indeterminate() {
            "?".to_owned()
        } else if config.show_bytes {
            let total = if config.max_bytes > 0 { config.max_bytes } else { config.max };
            human_bytes(total as f64, config.binary_prefixes)
        } else {
            config.max.to_string()
        };
        let current = if config.show_bytes {
            human_bytes(frame.current_bytes, config.binary_prefixes)
        } else {
            frame.count.to_string()
        };
        parts.push(format!("{current}/{total}"));
    }

    if config.show_its {
        parts.push(format!("{:2.0} it/s", frame.rate));
    } else if config.shows_byte_rate() {
        let per_second = frame.rate * bytes_per_unit(config);
        parts.push(format!("{}/s", human_bytes(per_second, config.binary_prefixes)));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("({})", parts.join(", "))
    }
}

/// Estimated time left at `frame.rate`; zero when the rate gives no estimate.
#[allow(clippy::cast_precision_loss)]
fn remaining(frame: &Frame<'_>, max: i64) -> Duration {
    let left = (max - frame.count).max(0) as f64;
    if frame.rate > 0.0 && frame.rate.is_finite() {
        Duration::try_from_secs_f64(left / frame.rate).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn human_bytes(bytes: f64, binary: bool) -> String {
    let bytes = bytes.max(0.0) as u64;
    if binary {
        BinaryBytes(bytes).to_string()
    } else {
        DecimalBytes(bytes).to_string()
    }
}

/// Formats whole seconds as `1h2m3s`, `4m5s` or `6s`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
