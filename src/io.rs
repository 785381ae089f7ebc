//! I/O wrappers for tracking data transfer.
//!
//! [`ProgressReader`] and [`ProgressWriter`] wrap any [`std::io::Read`] or
//! [`std::io::Write`] and advance a [`ProgressBar`] by the number of bytes
//! each call moved. Pair them with [`ProgressBar::for_bytes`] for downloads,
//! hashing or copying large files. A [`ProgressBar`] is also a [`Write`] sink
//! on its own.
//!
//! A bar error (for instance a stream longer than the bar's maximum) never
//! fails the underlying I/O; it is logged with `tracing` instead.

use std::io::{self, Read, Write};

use tracing::warn;

use crate::ProgressBar;

/// A wrapper around [`Read`] that advances a [`ProgressBar`] by the bytes read.
///
/// ```
/// use std::io::{Cursor, Read};
///
/// use linebar::{ProgressBar, ProgressReader};
///
/// let bar = ProgressBar::builder(4).with_visible(false).build();
/// let mut reader = ProgressReader::new(Cursor::new(b"data"), bar.clone());
/// let mut buf = String::new();
/// reader.read_to_string(&mut buf)?;
/// assert!(bar.is_finished());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct ProgressReader<R> {
    inner: R,
    bar: ProgressBar,
}

impl<R> ProgressReader<R> {
    /// Wraps `inner`, reporting to `bar`.
    pub const fn new(inner: R, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }

    /// The bar this reader reports to.
    pub const fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        advance(&self.bar, n);
        Ok(n)
    }
}

/// A wrapper around [`Write`] that advances a [`ProgressBar`] by the bytes
/// written.
#[derive(Debug)]
pub struct ProgressWriter<W> {
    inner: W,
    bar: ProgressBar,
}

impl<W> ProgressWriter<W> {
    /// Wraps `inner`, reporting to `bar`.
    pub const fn new(inner: W, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }

    /// The bar this writer reports to.
    pub const fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// Unwraps the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        advance(&self.bar, n);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// A bar is itself a byte sink: writing `buf` advances it by `buf.len()` and
/// discards the data, so it can sit next to a real writer in a tee.
///
/// ```
/// use std::io::Write;
///
/// use linebar::ProgressBar;
///
/// let mut bar = ProgressBar::builder(5).with_visible(false).build();
/// bar.write_all(b"hello")?;
/// assert!(bar.is_finished());
/// # Ok::<(), std::io::Error>(())
/// ```
impl Write for ProgressBar {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        advance(self, buf.len());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn advance(bar: &ProgressBar, n: usize) {
    if n == 0 {
        return;
    }
    if let Err(err) = bar.add(n as u64) {
        warn!(%err, bytes = n, "progress bar update failed");
    }
}
