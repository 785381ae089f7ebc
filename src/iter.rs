//! Iterator adapters for automatic progress tracking.
//!
//! [`ProgressIteratorExt`] adds helpers to every [`Iterator`] so a loop can
//! drive a bar with a single method call.
//!
//! # Heuristics
//!
//! [`progress`](ProgressIteratorExt::progress) checks [`Iterator::size_hint`]:
//! * an exact size becomes the bar's maximum;
//! * anything else gives an indeterminate bar (a spinner).
//!
//! # Example
//!
//! ```
//! use linebar::{ProgressBar, ProgressIteratorExt};
//!
//! let bar = ProgressBar::builder(3).with_visible(false).build();
//! let sum: i32 = vec![1, 2, 3].into_iter().progress_with(bar.clone()).sum();
//! assert_eq!(sum, 6);
//! assert!(bar.is_finished());
//! ```

use compact_str::CompactString;
use tracing::warn;

use crate::ProgressBar;

/// An iterator adapter that advances a bar by one on every item.
///
/// The bar is finished once the inner iterator is exhausted.
#[derive(Debug)]
pub struct ProgressIter<I> {
    iter: I,
    bar: ProgressBar,
    done: bool,
}

impl<I> ProgressIter<I> {
    /// Creates a new `ProgressIter`.
    ///
    /// Usually constructed via [`ProgressIteratorExt`].
    pub const fn new(iter: I, bar: ProgressBar) -> Self {
        Self {
            iter,
            bar,
            done: false,
        }
    }

    /// The bar this iterator reports to.
    pub const fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl<I: Iterator> Iterator for ProgressIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next();

        if item.is_some() {
            if let Err(err) = self.bar.add(1) {
                warn!(%err, "progress bar update failed");
            }
        } else if !self.done {
            self.done = true;
            if let Err(err) = self.bar.finish() {
                warn!(%err, "progress bar finish failed");
            }
        }

        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Extension trait to attach a progress bar to any Iterator.
pub trait ProgressIteratorExt: Sized {
    /// Wraps the iterator in a new stdout bar sized from `size_hint`.
    fn progress(self) -> ProgressIter<Self>;

    /// Like [`progress`](Self::progress), with a description.
    fn progress_with_description(
        self,
        description: impl Into<CompactString>,
    ) -> ProgressIter<Self>;

    /// Wraps the iterator using an existing bar.
    fn progress_with(self, bar: ProgressBar) -> ProgressIter<Self>;
}

impl<I: Iterator> ProgressIteratorExt for I {
    fn progress(self) -> ProgressIter<Self> {
        self.progress_with_description(CompactString::default())
    }

    fn progress_with_description(
        self,
        description: impl Into<CompactString>,
    ) -> ProgressIter<Self> {
        let bar = ProgressBar::builder(max_from_size_hint(self.size_hint()))
            .with_description(description)
            .build();
        ProgressIter::new(self, bar)
    }

    fn progress_with(self, bar: ProgressBar) -> ProgressIter<Self> {
        ProgressIter::new(self, bar)
    }
}

/// An exact, non-empty size becomes the maximum; everything else is `-1`.
fn max_from_size_hint((lower, upper): (usize, Option<usize>)) -> i64 {
    match upper {
        Some(u) if u == lower && u > 0 => i64::try_from(u).unwrap_or(-1),
        _ => -1,
    }
}
