//! Shared helpers for the integration tests.

use std::{
    io::{self, Write},
    sync::Arc,
};

use parking_lot::Mutex;

/// An in-memory sink that stays readable after being handed to a bar.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// The text after the last carriage return, i.e. what the terminal shows.
    pub fn last_line(&self) -> String {
        self.contents()
            .rsplit('\r')
            .next()
            .unwrap_or_default()
            .to_owned()
    }

    /// Number of lines drawn. Every draw and erase starts with `\r...\r`.
    pub fn draws(&self) -> usize {
        self.contents().matches('\r').count() / 2
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
