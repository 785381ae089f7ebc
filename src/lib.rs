//! # `linebar`
//!
//! A thread-safe, cloneable, single-line terminal progress bar.
//!
//! `linebar` draws one line that is rewritten in place with `\r`. It is
//! designed to be:
//!
//! * **Concurrent**: [`ProgressBar`] handles are cheap to clone ([`Arc`]-based)
//!   and safe to share across threads; every operation is atomic with respect to
//!   the others.
//! * **Quiet**: redraws happen only when the integer percent changes, and can be
//!   throttled further.
//! * **Informative**: elapsed time, a rolling-rate estimate of the time left,
//!   iterations or bytes per second, colors and spinners for unknown totals.
//!
//! ## Modules
//!
//! * [`builder`]: Fluent interface for constructing [`ProgressBar`] instances.
//! * [`progress`]: The [`ProgressBar`] controller and its redraw policy.
//! * [`state`]: Counters, rate history and the [`BarState`] snapshot.
//! * [`rate`]: The rolling rate estimator behind the time-left prediction.
//! * [`format`]: Pure rendering of a line from a state snapshot.
//! * [`markup`]: `[color]` markup parsing and ANSI rendering.
//! * [`theme`]: Bar glyphs and spinner frame tables.
//! * [`config`]: The options a bar is built with.
//! * [`io`]: Wrappers for [`std::io::Read`] and [`std::io::Write`] that track bytes.
//! * [`iter`]: Extension traits for tracking progress on Iterators.
//! * [`term`]: Terminal width lookup.
//!
//! ## Example
//!
//! ```
//! use linebar::ProgressBar;
//!
//! let bar = ProgressBar::builder(10)
//!     .with_writer(std::io::sink())
//!     .with_description("[cyan]working[reset]")
//!     .with_color_codes(true)
//!     .build();
//! for _ in 0..10 {
//!     bar.add(1)?;
//! }
//! assert!(bar.is_finished());
//! # Ok::<(), linebar::Error>(())
//! ```
//!
//! [`Arc`]: std::sync::Arc

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod iter;
pub mod markup;
pub mod progress;
pub mod rate;
pub mod state;
pub mod term;
pub mod theme;

pub use builder::ProgressBarBuilder;
pub use config::Config;
pub use error::{Error, Result};
pub use io::{ProgressReader, ProgressWriter};
pub use iter::{ProgressIter, ProgressIteratorExt};
pub use markup::Markup;
pub use progress::ProgressBar;
pub use state::BarState;
pub use term::terminal_width;
pub use theme::Theme;
