//! JSON decode and encode stages.
//!
//! Both stages default to `serde_json` and accept a caller-supplied function
//! instead. Failures are scoped to the record being converted.

use crate::error::{Error, Result};
use crate::stage::Stage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::warn;

/// Parses each incoming record into a `T`.
///
/// When to use: Behind a `SeparatorScanner` reading newline-delimited JSON.
pub struct Decode<T = serde_json::Value, F = fn(&str) -> Result<T>> {
    decode: F,
    _phantom: PhantomData<fn() -> T>, // T only appears in the output
}

impl<T: DeserializeOwned> Decode<T> {
    /// A decoder backed by `serde_json::from_str`.
    pub fn json() -> Self {
        Self {
            decode: from_json::<T>,
            _phantom: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Default for Decode<T> {
    fn default() -> Self {
        Self::json()
    }
}

impl<T, F> Decode<T, F>
where
    F: FnMut(&str) -> Result<T>,
{
    /// A decoder backed by a custom parse function.
    pub fn with(decode: F) -> Self {
        Self {
            decode,
            _phantom: PhantomData,
        }
    }
}

impl<T, F> Stage for Decode<T, F>
where
    F: FnMut(&str) -> Result<T>,
{
    type Input = String;
    type Output = T;

    fn process<E>(&mut self, record: String, mut emit: E) -> Result<()>
    where
        E: FnMut(T) -> Result<()>,
    {
        let value = (self.decode)(&record).inspect_err(|e| {
            warn!(error = %e, len = record.len(), "record decode failed");
        })?;
        emit(value)
    }

    fn flush<E>(&mut self, _emit: E) -> Result<()>
    where
        E: FnMut(T) -> Result<()>,
    {
        Ok(())
    }
}

/// Serializes each incoming value to its textual form.
///
/// When to use: In front of a `Joiner` writing newline-delimited JSON.
pub struct Encode<T, F = fn(&T) -> Result<String>> {
    encode: F,
    _phantom: PhantomData<fn(T)>, // T only appears in the input
}

impl<T: Serialize> Encode<T> {
    /// An encoder backed by `serde_json::to_string`.
    pub fn json() -> Self {
        Self {
            encode: to_json::<T>,
            _phantom: PhantomData,
        }
    }
}

impl<T: Serialize> Default for Encode<T> {
    fn default() -> Self {
        Self::json()
    }
}

impl<T, F> Encode<T, F>
where
    F: FnMut(&T) -> Result<String>,
{
    /// An encoder backed by a custom serialize function.
    pub fn with(encode: F) -> Self {
        Self {
            encode,
            _phantom: PhantomData,
        }
    }
}

impl<T, F> Stage for Encode<T, F>
where
    F: FnMut(&T) -> Result<String>,
{
    type Input = T;
    type Output = String;

    fn process<E>(&mut self, value: T, mut emit: E) -> Result<()>
    where
        E: FnMut(String) -> Result<()>,
    {
        let text = (self.encode)(&value).inspect_err(|e| {
            warn!(error = %e, "value encode failed");
        })?;
        emit(text)
    }

    fn flush<E>(&mut self, _emit: E) -> Result<()>
    where
        E: FnMut(String) -> Result<()>,
    {
        Ok(())
    }
}

fn from_json<T: DeserializeOwned>(record: &str) -> Result<T> {
    serde_json::from_str(record).map_err(|e| Error::decode(e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::encode(e.to_string()))
}
