//! Drives a `std::io::Read` source into a byte sink.

use crate::error::{Error, Result};
use crate::sink::Sink;
use std::io::{ErrorKind, Read};
use tracing::debug;

/// Default read size for each chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Reads a source in chunks and pushes each one into a sink.
///
/// The pump is the driver side of the stage contract: it hands the next chunk
/// over only after the sink accepted the previous one, and finishes the sink
/// at end of input.
///
/// ```rust
/// use splitstream::{Pump, SeparatorScanner, StageExt};
/// use std::io::Cursor;
///
/// let mut lines = SeparatorScanner::default().into_sink(Vec::new());
/// Pump::new(Cursor::new("a\nb\nc")).chunk_size(2)?.run(&mut lines)?;
/// let (_, records) = lines.into_inner();
/// assert_eq!(records, ["a", "b", "c"]);
/// # Ok::<(), splitstream::Error>(())
/// ```
pub struct Pump<R: Read> {
    reader: R,
    chunk_size: usize,
}

impl<R: Read> Pump<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Sets the maximum number of bytes handed to the sink per chunk.
    pub fn chunk_size(mut self, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::invalid_input("chunk size must be greater than zero"));
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    /// Pumps until EOF, then finishes the sink. Returns the number of bytes read.
    ///
    /// Interrupted reads are retried. Any other I/O error, or any error from the
    /// sink, stops the pump without finishing the sink.
    pub fn run<K: Sink<Vec<u8>>>(&mut self, mut sink: K) -> Result<u64> {
        let mut total = 0u64;
        let mut buf = vec![0u8; self.chunk_size];
        debug!(chunk_size = self.chunk_size, "pump started");
        loop {
            let n = match self.reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            total += n as u64;
            sink.accept(buf[..n].to_vec())?;
        }
        sink.finish()?;
        debug!(total, "pump finished");
        Ok(total)
    }

    /// Consumes the pump, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
