//! Output sinks for response body bytes.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Destination for raw response chunks. Writes are synchronous and in call order.
pub trait OutputSink: Send + Sync {
    fn write_chunk(&self, chunk: &[u8]) -> io::Result<()>;
}

/// Writes chunks to process stdout, flushing after each one.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_chunk(&self, chunk: &[u8]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(chunk)?;
        out.flush()
    }
}

/// Collects chunks in a shared buffer. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl OutputSink for MemorySink {
    fn write_chunk(&self, chunk: &[u8]) -> io::Result<()> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| io::Error::other("memory sink poisoned"))?;
        buffer.extend_from_slice(chunk);
        Ok(())
    }
}
