//! Bar glyphs and spinner frame tables.
//!
//! Every glyph is a string rather than a `char`, so themes may carry color
//! markup such as `"[green]=[reset]"` when color decoding is enabled.

use std::time::Duration;

use compact_str::CompactString;

/// The elements a bar is drawn with.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Repeated glyph for the completed portion.
    pub saucer: CompactString,
    /// Glyph drawn at the leading edge of the completed portion.
    ///
    /// Empty means "use [`saucer`](Self::saucer)".
    pub saucer_head: CompactString,
    /// Glyph for the remaining portion.
    pub saucer_padding: CompactString,
    /// Opening delimiter.
    pub bar_start: CompactString,
    /// Closing delimiter.
    pub bar_end: CompactString,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            saucer: "█".into(),
            saucer_head: CompactString::default(),
            saucer_padding: " ".into(),
            bar_start: "|".into(),
            bar_end: "|".into(),
        }
    }
}

impl Theme {
    /// Plain ASCII theme: `[===>    ]`.
    #[must_use]
    pub fn ascii() -> Self {
        Self {
            saucer: "=".into(),
            saucer_head: ">".into(),
            saucer_padding: " ".into(),
            bar_start: "[".into(),
            bar_end: "]".into(),
        }
    }

    /// Box-drawing theme: `▕████▋   ▏`.
    #[must_use]
    pub fn unicode() -> Self {
        Self {
            saucer: "█".into(),
            saucer_head: "▋".into(),
            saucer_padding: " ".into(),
            bar_start: "▕".into(),
            bar_end: "▏".into(),
        }
    }
}

/// Time each spinner frame stays on screen.
pub const SPINNER_FRAME_DURATION: Duration = Duration::from_millis(100);

/// Spinner style used in indeterminate mode when none is configured.
pub const DEFAULT_SPINNER: usize = 9;

/// Built-in spinner styles, addressed by index.
pub const SPINNERS: &[&[&str]] = &[
    &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
    &["▁", "▃", "▄", "▅", "▆", "▇", "█", "▇", "▆", "▅", "▄", "▃", "▁"],
    &["▖", "▘", "▝", "▗"],
    &["┤", "┘", "┴", "└", "├", "┌", "┬", "┐"],
    &["◢", "◣", "◤", "◥"],
    &["◰", "◳", "◲", "◱"],
    &["◴", "◷", "◶", "◵"],
    &["◐", "◓", "◑", "◒"],
    &[".", "o", "O", "@", "*"],
    &["|", "/", "-", "\\"],
    &["◡◡", "⊙⊙", "◠◠"],
    &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"],
    &[">))'>", " >))'>", "  >))'>", "   >))'>", "    >))'>"],
    &["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"],
    &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    &[
        "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
        "s", "t", "u", "v", "w", "x", "y", "z",
    ],
    &["▉", "▊", "▋", "▌", "▍", "▎", "▏", "▎", "▍", "▌", "▋", "▊", "▉"],
    &["■", "□", "▪", "▫"],
    &["←", "↑", "→", "↓"],
    &["╫", "╪"],
    &["⇐", "⇖", "⇑", "⇗", "⇒", "⇘", "⇓", "⇙"],
    &["[    ]", "[=   ]", "[==  ]", "[=== ]", "[ ===]", "[  ==]", "[   =]"],
];

/// Picks the frame shown after `elapsed` time for a table of `frames` entries.
///
/// Frames advance every [`SPINNER_FRAME_DURATION`] and wrap around. Returns 0
/// for an empty table.
#[must_use]
pub fn spinner_frame(elapsed: Duration, frames: usize) -> usize {
    if frames == 0 {
        return 0;
    }
    let step = elapsed.as_millis() / SPINNER_FRAME_DURATION.as_millis();
    usize::try_from(step % frames as u128).unwrap_or(0)
}
