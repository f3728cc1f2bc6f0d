//! Terminal consumers for pipeline output.

use crate::error::Result;
use std::io::Write;
use tracing::debug;

/// A consumer of pipeline items.
///
/// `accept` returns once the item is taken; `finish` is the end-of-stream
/// signal and is called at most once by well-behaved drivers.
pub trait Sink<T> {
    fn accept(&mut self, item: T) -> Result<()>;

    /// End-of-stream notification. The default does nothing.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T> Sink<T> for Vec<T> {
    #[inline]
    fn accept(&mut self, item: T) -> Result<()> {
        self.push(item);
        Ok(())
    }
}

impl<T, K: Sink<T> + ?Sized> Sink<T> for &mut K {
    #[inline]
    fn accept(&mut self, item: T) -> Result<()> {
        (**self).accept(item)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Writes byte items to any `std::io::Write`.
///
/// `finish` flushes the writer. Wrap files in a `BufWriter` for small items.
pub struct WriteSink<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Total bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Consumes the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write, B: AsRef<[u8]>> Sink<B> for WriteSink<W> {
    fn accept(&mut self, item: B) -> Result<()> {
        let bytes = item.as_ref();
        self.writer.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        debug!(written = self.written, "write sink finished");
        Ok(())
    }
}

/// Feeds items into an already-connected sink without ever ending it.
///
/// Purpose: Let a second producer inject into a live consumer. Finishing the
/// adapter (or the pipeline it terminates) never finishes the wrapped sink;
/// that stays the job of whoever owns it.
pub struct PushSink<K> {
    inner: K,
}

impl<K> PushSink<K> {
    pub fn new(inner: K) -> Self {
        Self { inner }
    }

    /// Forwards one item into the wrapped sink.
    pub fn inject<T>(&mut self, item: T) -> Result<()>
    where
        K: Sink<T>,
    {
        self.inner.accept(item)
    }

    pub fn get_ref(&self) -> &K {
        &self.inner
    }

    pub fn into_inner(self) -> K {
        self.inner
    }
}

impl<T, K: Sink<T>> Sink<T> for PushSink<K> {
    #[inline]
    fn accept(&mut self, item: T) -> Result<()> {
        self.inject(item)
    }

    fn finish(&mut self) -> Result<()> {
        debug!("push sink finished; wrapped sink left open");
        Ok(())
    }
}
