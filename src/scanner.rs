//! Splits a chunked byte stream into separator-delimited records.

use crate::error::{Error, Result};
use crate::separator::{Separator, SeparatorSpec};
use crate::stage::Stage;
use tracing::{debug, trace, warn};

/// A stage that turns arbitrarily chunked bytes into UTF-8 records.
///
/// The scanner keeps a carry buffer holding every byte seen since the last
/// record boundary. Each chunk is appended to it and the whole buffer is
/// scanned as one continuous sequence, so a separator split across any number
/// of chunks is found exactly once. Records are emitted in input order; the
/// bytes after the final separator are emitted by `flush`.
///
/// ```rust
/// use splitstream::{SeparatorScanner, Stage};
///
/// let mut scanner = SeparatorScanner::new("::")?;
/// let mut records = Vec::new();
/// scanner.scan(b"ab::c", |r| { records.push(r); Ok(()) })?;
/// scanner.scan(b"d::", |r| { records.push(r); Ok(()) })?;
/// scanner.flush(|r| { records.push(r); Ok(()) })?;
/// assert_eq!(records, ["ab", "cd"]);
/// # Ok::<(), splitstream::Error>(())
/// ```
#[derive(Debug)]
pub struct SeparatorScanner {
    separator: Separator,
    carry: Vec<u8>,
    // No separator starts before this offset into `carry`.
    scan_from: usize,
    max_record_len: Option<usize>,
    // Skipping the rest of an oversized record up to its separator.
    discarding: bool,
    finished: bool,
}

impl SeparatorScanner {
    /// Creates a scanner from any separator specification.
    ///
    /// Fails with `Error::InvalidSeparator` if `spec` does not resolve.
    pub fn new(spec: impl Into<SeparatorSpec>) -> Result<Self> {
        Ok(Self::with_separator(Separator::new(spec)?))
    }

    /// Creates a scanner from an already resolved separator.
    pub fn with_separator(separator: Separator) -> Self {
        debug!(?separator, "separator scanner created");
        Self {
            separator,
            carry: Vec::new(),
            scan_from: 0,
            max_record_len: None,
            discarding: false,
            finished: false,
        }
    }

    /// Caps the byte length of any record, bounding the carry buffer.
    ///
    /// Failure semantics: Records longer than `limit` are reported as
    /// `Error::RecordTooLong` and skipped, never emitted.
    pub fn with_max_record_len(mut self, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(Error::invalid_input(
                "max record length must be greater than zero",
            ));
        }
        debug!(limit, "separator scanner bounded");
        self.max_record_len = Some(limit);
        Ok(self)
    }

    pub fn separator(&self) -> &Separator {
        &self.separator
    }

    /// Bytes received but not yet emitted as part of a record.
    pub fn pending(&self) -> &[u8] {
        &self.carry
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Scans one chunk, emitting every record it completes.
    ///
    /// This is the borrowed-slice form of `Stage::process`. On a per-record
    /// failure the call stops; bytes after the failing record stay buffered
    /// and are scanned by the next `scan` or by `flush`.
    pub fn scan<F>(&mut self, chunk: &[u8], mut emit: F) -> Result<()>
    where
        F: FnMut(String) -> Result<()>,
    {
        if self.finished {
            return Err(Error::StageFinished);
        }
        self.carry.extend_from_slice(chunk);
        self.drain(&mut emit)
    }

    fn drain<F>(&mut self, emit: &mut F) -> Result<()>
    where
        F: FnMut(String) -> Result<()>,
    {
        let sep = self.separator.as_bytes();
        let mut start = 0;
        let mut cursor = self.scan_from;

        let outcome = loop {
            let Some(offset) = self.carry[cursor..].iter().position(|&b| b == sep[0]) else {
                cursor = self.carry.len();
                break Ok(());
            };
            let pos = cursor + offset;
            if self.carry.len() - pos < sep.len() {
                // Possibly a separator prefix; the next chunk decides.
                cursor = pos;
                break Ok(());
            }
            if !self.carry[pos..].starts_with(sep) {
                cursor = pos + 1;
                continue;
            }

            let record = &self.carry[start..pos];
            start = pos + sep.len();
            cursor = start;

            if std::mem::take(&mut self.discarding) {
                trace!(len = record.len(), "skipped tail of oversized record");
                continue;
            }

            let emitted = match check_len(record.len(), self.max_record_len)
                .and_then(|()| decode(record))
            {
                Ok(text) => {
                    trace!(len = text.len(), "record emitted");
                    emit(text)
                }
                Err(e) => {
                    warn!(error = %e, "record rejected");
                    Err(e)
                }
            };
            if let Err(e) = emitted {
                break Err(e);
            }
        };

        self.carry.drain(..start);
        self.scan_from = cursor - start;
        outcome?;
        self.check_pending()
    }

    fn check_pending(&mut self) -> Result<()> {
        if self.discarding {
            // Only a possible separator prefix is worth keeping.
            self.carry.drain(..self.scan_from);
            self.scan_from = 0;
            return Ok(());
        }
        let Some(limit) = self.max_record_len else {
            return Ok(());
        };
        if self.scan_from <= limit {
            return Ok(());
        }

        let len = self.scan_from;
        self.carry.drain(..len);
        self.scan_from = 0;
        self.discarding = true;
        warn!(len, limit, "pending record exceeds limit, skipping to next separator");
        Err(Error::record_too_long(len, limit))
    }
}

impl Default for SeparatorScanner {
    /// A line feed scanner.
    fn default() -> Self {
        Self::with_separator(Separator::default())
    }
}

impl Stage for SeparatorScanner {
    type Input = Vec<u8>;
    type Output = String;

    fn process<F>(&mut self, chunk: Vec<u8>, emit: F) -> Result<()>
    where
        F: FnMut(String) -> Result<()>,
    {
        self.scan(&chunk, emit)
    }

    fn flush<F>(&mut self, mut emit: F) -> Result<()>
    where
        F: FnMut(String) -> Result<()>,
    {
        if self.finished {
            return Err(Error::StageFinished);
        }
        // Records left behind by an aborted `scan` come first.
        self.drain(&mut emit)?;

        if self.discarding {
            self.carry.clear();
            self.discarding = false;
        } else if !self.carry.is_empty() {
            let tail = std::mem::take(&mut self.carry);
            self.scan_from = 0;
            match check_len(tail.len(), self.max_record_len).and_then(|()| decode(&tail)) {
                Ok(text) => {
                    trace!(len = text.len(), "final record emitted");
                    emit(text)?;
                }
                Err(e) => {
                    warn!(error = %e, "final record rejected");
                    return Err(e);
                }
            }
        }

        self.finished = true;
        debug!("separator scanner flushed");
        Ok(())
    }
}

fn check_len(len: usize, limit: Option<usize>) -> Result<()> {
    match limit {
        Some(limit) if len > limit => Err(Error::record_too_long(len, limit)),
        _ => Ok(()),
    }
}

fn decode(bytes: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(bytes)?.to_owned())
}
