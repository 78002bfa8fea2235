//! In-memory destination for formatted log lines

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::Metadata;
use tracing_subscriber::fmt::MakeWriter;

use super::level_from_tracing;
use crate::config::LogLevel;

/// Keeps formatted lines in memory, in the order they were written.
///
/// Clones share the same buffer, so a clone can be handed to a
/// [`super::Logger`] while the original is used for assertions.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    /// Captured lines written at `level`
    pub fn lines_at(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(LogLevel, String)>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<'a> MakeWriter<'a> for MemorySink {
    type Writer = MemoryWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        MemoryWriter::new(self, LogLevel::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        MemoryWriter::new(self, level_from_tracing(meta.level()))
    }
}

/// Buffers one formatted event and stores it as a line when dropped
pub struct MemoryWriter<'a> {
    sink: &'a MemorySink,
    level: LogLevel,
    buf: Vec<u8>,
}

impl<'a> MemoryWriter<'a> {
    fn new(sink: &'a MemorySink, level: LogLevel) -> Self {
        Self {
            sink,
            level,
            buf: Vec::new(),
        }
    }
}

impl io::Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for MemoryWriter<'_> {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }

        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end_matches('\n').to_string();
        self.sink.lock().push((self.level, line));
    }
}
