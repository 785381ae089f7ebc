//! Error handling for `linebar`.
//!
//! Validation failures ([`Error::ZeroMaximum`], [`Error::ExceedsMaximum`] and the
//! spinner configuration errors) never modify the bar, so it stays usable after
//! any of them. Output failures are handed back verbatim from the sink.

use std::io;

use thiserror::Error;

/// Errors that can happen while advancing or rendering a progress bar.
#[derive(Error, Debug)]
pub enum Error {
    /// The configured maximum is exactly zero, so there is nothing to track.
    #[error("max must be greater than 0")]
    ZeroMaximum,

    /// The advance would push the count past a known maximum.
    ///
    /// The count is left untouched when this is returned.
    #[error("current number exceeds max: {current} + {delta} > {max}")]
    ExceedsMaximum {
        /// Count before the rejected advance.
        current: i64,
        /// The rejected delta.
        delta: i64,
        /// The configured maximum.
        max: i64,
    },

    /// Both a named spinner style and a custom spinner sequence were configured.
    #[error("a spinner style and custom spinner frames cannot both be set")]
    ConflictingSpinners,

    /// The named spinner style does not exist.
    #[error("unknown spinner style {0}")]
    UnknownSpinnerStyle(usize),

    /// Writing to the output sink failed.
    #[error("failed to write progress bar")]
    Io {
        /// The error reported by the sink.
        #[from]
        source: io::Error,
    },
}

/// Result type alias for progress bar operations.
pub type Result<T> = std::result::Result<T, Error>;
