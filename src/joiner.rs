//! Appends a separator after each record.

use crate::error::Result;
use crate::separator::{Separator, SeparatorSpec};
use crate::stage::Stage;
use tracing::debug;

/// The inverse of `SeparatorScanner`: one output buffer per record, holding the
/// record bytes followed by the separator.
///
/// When to use: Writing records produced upstream back out as a byte stream.
#[derive(Debug, Clone, Default)]
pub struct Joiner {
    separator: Separator,
}

impl Joiner {
    /// Creates a joiner from any separator specification.
    pub fn new(spec: impl Into<SeparatorSpec>) -> Result<Self> {
        Ok(Self::with_separator(Separator::new(spec)?))
    }

    pub fn with_separator(separator: Separator) -> Self {
        debug!(?separator, "joiner created");
        Self { separator }
    }

    pub fn separator(&self) -> &Separator {
        &self.separator
    }

    /// Appends `record` and the separator to `out`.
    #[inline]
    pub fn join_into(&self, record: &str, out: &mut Vec<u8>) {
        out.reserve(record.len() + self.separator.len());
        out.extend_from_slice(record.as_bytes());
        out.extend_from_slice(self.separator.as_bytes());
    }
}

impl Stage for Joiner {
    type Input = String;
    type Output = Vec<u8>;

    fn process<F>(&mut self, record: String, mut emit: F) -> Result<()>
    where
        F: FnMut(Vec<u8>) -> Result<()>,
    {
        let mut bytes = record.into_bytes();
        bytes.extend_from_slice(self.separator.as_bytes());
        emit(bytes)
    }

    fn flush<F>(&mut self, _emit: F) -> Result<()>
    where
        F: FnMut(Vec<u8>) -> Result<()>,
    {
        Ok(())
    }
}
