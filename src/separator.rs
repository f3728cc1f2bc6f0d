//! Separator specifications and their resolution into byte sequences.
//!
//! A separator can be described several ways (text, a single code point, a
//! list of code points, raw bytes). All of them resolve into a [`Separator`],
//! a non-empty byte sequence that never changes once a stage is built.

use crate::error::{Error, Result};
use std::fmt;

/// The line feed byte used when no separator is given.
pub const DEFAULT_SEPARATOR: u8 = 0x0A;

/// Exclusive upper bound for separator code points.
const MAX_CODE_POINT: u32 = 0x10FFFF;

/// A resolved, non-empty separator byte sequence.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Separator {
    bytes: Box<[u8]>,
}

impl Separator {
    /// Resolves a specification into a separator.
    ///
    /// Fails with `Error::InvalidSeparator` when `spec` is empty or
    /// contains something that is not a legal code point.
    pub fn new(spec: impl Into<SeparatorSpec>) -> Result<Self> {
        spec.into().resolve()
    }

    /// Builds a separator from raw octets.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::invalid_separator("separator must not be empty"));
        }
        Ok(Self {
            bytes: bytes.into(),
        })
    }

    /// The separator bytes, in match order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Never true; provided for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self {
            bytes: Box::new([DEFAULT_SEPARATOR]),
        }
    }
}

impl fmt::Debug for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Separator({:?})", String::from_utf8_lossy(&self.bytes))
    }
}

/// How a separator is described at construction time.
///
/// Code points are encoded as UTF-8, so `1..=0x7F` map to a single byte each.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeparatorSpec {
    /// No separator given: the line feed byte.
    #[default]
    Default,
    /// A text separator, matched on its UTF-8 bytes.
    Text(String),
    /// A single code point.
    CodePoint(u32),
    /// An ordered sequence of code points.
    CodePoints(Vec<u32>),
    /// Raw octets, used verbatim.
    Bytes(Vec<u8>),
}

impl SeparatorSpec {
    /// Resolves this specification into a [`Separator`].
    pub fn resolve(self) -> Result<Separator> {
        match self {
            Self::Default => Ok(Separator::default()),
            Self::Text(text) => {
                if text.is_empty() {
                    return Err(Error::invalid_separator("text separator must not be empty"));
                }
                Separator::from_bytes(text.as_bytes())
            }
            Self::CodePoint(cp) => {
                let c = code_point(cp).ok_or_else(|| {
                    Error::invalid_separator(format!("{cp:#x} is not a valid code point"))
                })?;
                let mut buf = [0u8; 4];
                Separator::from_bytes(c.encode_utf8(&mut buf).as_bytes())
            }
            Self::CodePoints(cps) => {
                if cps.is_empty() {
                    return Err(Error::invalid_separator(
                        "code point sequence must not be empty",
                    ));
                }
                let mut bytes = Vec::with_capacity(cps.len());
                let mut buf = [0u8; 4];
                for &cp in &cps {
                    let c = code_point(cp).ok_or_else(|| {
                        Error::invalid_separator(format!(
                            "{cps:?}, every element should be a valid code point"
                        ))
                    })?;
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
                Separator::from_bytes(&bytes)
            }
            Self::Bytes(bytes) => Separator::from_bytes(&bytes),
        }
    }

    /// Interprets a JSON configuration value as a separator specification.
    ///
    /// `null` selects the default, a string is text, an integer is a single
    /// code point and an array must hold integers only. Anything else is
    /// rejected with `Error::InvalidSeparator`.
    #[cfg(feature = "json")]
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        let as_code_point = |v: &Value| -> Option<u32> {
            v.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| code_point(n).is_some())
        };

        match value {
            Value::Null => Ok(Self::Default),
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(_) => as_code_point(value).map(Self::CodePoint).ok_or_else(|| {
                Error::invalid_separator(format!("{value} is not a valid code point"))
            }),
            Value::Array(items) => items
                .iter()
                .map(as_code_point)
                .collect::<Option<Vec<u32>>>()
                .map(Self::CodePoints)
                .ok_or_else(|| {
                    Error::invalid_separator(format!(
                        "{value}, every element should be a valid code point"
                    ))
                }),
            other => Err(Error::invalid_separator(format!(
                "{other} is not a string, code point or array of code points"
            ))),
        }
    }
}

/// A legal separator code point: `0 < cp < 0x10FFFF` and a Unicode scalar value.
fn code_point(cp: u32) -> Option<char> {
    if cp == 0 || cp >= MAX_CODE_POINT {
        return None;
    }
    char::from_u32(cp)
}

impl From<&str> for SeparatorSpec {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for SeparatorSpec {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<char> for SeparatorSpec {
    fn from(c: char) -> Self {
        Self::CodePoint(c as u32)
    }
}

impl From<u32> for SeparatorSpec {
    fn from(cp: u32) -> Self {
        Self::CodePoint(cp)
    }
}

impl From<Vec<u32>> for SeparatorSpec {
    fn from(cps: Vec<u32>) -> Self {
        Self::CodePoints(cps)
    }
}

impl From<&[u32]> for SeparatorSpec {
    fn from(cps: &[u32]) -> Self {
        Self::CodePoints(cps.to_vec())
    }
}

impl From<&[u8]> for SeparatorSpec {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Option<SeparatorSpec>> for SeparatorSpec {
    fn from(spec: Option<SeparatorSpec>) -> Self {
        spec.unwrap_or_default()
    }
}
