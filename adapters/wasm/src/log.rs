//! Forwards formatted `tracing` output to the host's log callback.

use std::io::{self, Write};

use tracing::Level;

/// Buffers formatted output and hands every complete line to `sink`.
///
/// The formatter creates one writer per event, so whatever remains in the
/// buffer when the writer drops is forwarded as a final line.
pub(crate) struct LineForwarder<F>
where
    F: FnMut(&str),
{
    buffer: Vec<u8>,
    sink: F,
}

impl<F> LineForwarder<F>
where
    F: FnMut(&str),
{
    pub(crate) fn new(sink: F) -> Self {
        Self {
            buffer: Vec::new(),
            sink,
        }
    }

    fn forward_complete_lines(&mut self) {
        while let Some(end) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=end).collect();
            self.emit(&line[..end]);
        }
    }

    fn emit(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        let text = text.trim_end_matches('\r');
        if !text.is_empty() {
            (self.sink)(text);
        }
    }
}

impl<F> Write for LineForwarder<F>
where
    F: FnMut(&str),
{
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        self.forward_complete_lines();
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.forward_complete_lines();
        Ok(())
    }
}

impl<F> Drop for LineForwarder<F>
where
    F: FnMut(&str),
{
    fn drop(&mut self) {
        let rest = std::mem::take(&mut self.buffer);
        self.emit(&rest);
    }
}

/// Installs the global subscriber that writes to the host log.
///
/// Later calls are ignored because a subscriber is already installed.
pub(crate) fn install() {
    let _ = tracing_subscriber::fmt()
        .with_writer(|| LineForwarder::new(crate::host::log_string))
        .with_max_level(Level::INFO)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
