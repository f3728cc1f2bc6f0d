//! # SplitStream (v0.1.0)
//!
//! A lightweight, composable Rust library for splitting byte streams into
//! separator-delimited records and joining them back.
//!
//! ## Overview
//!
//! `splitstream` provides a small set of transform stages that share one
//! `process`/`flush` contract. The core stage, `SeparatorScanner`, turns
//! arbitrarily chunked bytes into UTF-8 records delimited by any multi-byte
//! separator, including separators split across chunk boundaries. The other
//! stages (`Joiner`, `Decode`, `Encode`, `Dispatch`) are thin strategy objects
//! that compose with it.
//!
//! ## Key Features
//!
//! * **Chunking Independent**: The same records come out however the input is split
//! * **Composable Architecture**: Stages chain with `pipe` and terminate in any `Sink`
//! * **Per-Item Failures**: Decode and encode errors are scoped to one record
//! * **Bounded Memory**: Optional record length limit caps the carry buffer
//! * **JSON Ready**: `serde_json` backed decode/encode stages (feature `json`)
//!
//! ## Quick Start
//!
//! ```rust
//! use splitstream::*;
//! use std::io::Cursor;
//!
//! fn main() -> Result<()> {
//!     // Split on "::" and write each record back out on its own line.
//!     let splitter = SeparatorScanner::new("::")?;
//!     let joiner = Joiner::default();
//!     let mut pipeline = splitter.pipe(joiner).into_sink(WriteSink::new(Vec::new()));
//!
//!     Pump::new(Cursor::new("ab::cd::ef")).chunk_size(3)?.run(&mut pipeline)?;
//!
//!     let (_, sink) = pipeline.into_inner();
//!     assert_eq!(sink.into_inner(), b"ab\ncd\nef\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is built around two traits:
//!
//! * **`Stage`**: Receives items, emits zero or more outputs per item, and gets
//!   one final `flush` at end of input
//! * **`Sink`**: Terminal consumer of a pipeline, with an end-of-stream `finish`
//!
//! Stages never spawn threads or buffer beyond their own state. A `process`
//! call returns only after its outputs were accepted downstream, which is the
//! only flow control a pipeline needs.

pub mod dispatch;
pub mod error;
pub mod joiner;
pub mod pipeline;
pub mod pump;
pub mod scanner;
pub mod separator;
pub mod sink;
pub mod stage;

#[cfg(feature = "json")]
pub mod codec;

// Re-export the main public API for user convenience.
pub use dispatch::Dispatch;
pub use error::{Error, Result};
pub use joiner::Joiner;
pub use pipeline::{Chain, Observed, Piped, StageExt};
pub use pump::Pump;
pub use scanner::SeparatorScanner;
pub use separator::{Separator, SeparatorSpec};
pub use sink::{PushSink, Sink, WriteSink};
pub use stage::{run_to_vec, Stage};

#[cfg(feature = "json")]
pub use codec::{Decode, Encode};
