//! Readers and writers that misbehave on a schedule.

use std::io::{self, ErrorKind, Read, Write};

#[allow(dead_code)]
pub enum ReadFault {
    /// Never return more than this many bytes per read.
    ShortReads(usize),
    /// Every n-th read fails with `Interrupted` before touching the source.
    InterruptedEvery(usize),
    /// Reads fail with `BrokenPipe` from the n-th read onwards.
    BrokenPipeAt(usize),
}

pub struct FaultyReader<R> {
    inner: R,
    fault: ReadFault,
    reads: usize,
}

impl<R: Read> FaultyReader<R> {
    pub fn new(inner: R, fault: ReadFault) -> Self {
        Self {
            inner,
            fault,
            reads: 0,
        }
    }
}

impl<R: Read> Read for FaultyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        match self.fault {
            ReadFault::ShortReads(max) => {
                let len = buf.len().min(max.max(1));
                self.inner.read(&mut buf[..len])
            }
            ReadFault::InterruptedEvery(n) if n > 0 && self.reads % n == 0 => {
                Err(ErrorKind::Interrupted.into())
            }
            ReadFault::BrokenPipeAt(n) if self.reads >= n => Err(io::Error::new(
                ErrorKind::BrokenPipe,
                "simulated source failure",
            )),
            _ => self.inner.read(buf),
        }
    }
}

/// Accepts `capacity` bytes, then fails every write with `WriteZero`.
pub struct FullWriter {
    pub data: Vec<u8>,
    capacity: usize,
}

impl FullWriter {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            capacity,
        }
    }
}

impl Write for FullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.capacity - self.data.len();
        if room == 0 {
            return Err(io::Error::new(ErrorKind::WriteZero, "writer full"));
        }
        let n = buf.len().min(room);
        self.data.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
