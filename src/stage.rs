//! The transform stage contract shared by every pipeline element.

use crate::error::Result;

/// A unidirectional pipeline element.
///
/// Purpose: Separate what a stage does to an item from how items are delivered.
/// Implementations are small strategy objects composed with `Chain`, `Piped`
/// and the `StageExt` adapters.
///
/// Each call hands outputs to `emit` synchronously and returns once every
/// emission has been accepted. The return is the completion acknowledgement;
/// a driver must not call `process` again before the previous call returned.
///
/// Failures are scoped to the item being processed. Items emitted before a
/// failure stay valid, and whether to keep feeding the stage is the driver's
/// decision.
pub trait Stage {
    type Input;
    type Output;

    /// Processes one item, emitting zero or more outputs.
    fn process<F>(&mut self, item: Self::Input, emit: F) -> Result<()>
    where
        F: FnMut(Self::Output) -> Result<()>;

    /// End-of-input notification. Called once, after the last `process` call.
    fn flush<F>(&mut self, emit: F) -> Result<()>
    where
        F: FnMut(Self::Output) -> Result<()>;
}

/// Runs `items` through `stage`, flushes it, and collects every output.
///
/// Stops at the first failure.
pub fn run_to_vec<S, I>(stage: &mut S, items: I) -> Result<Vec<S::Output>>
where
    S: Stage,
    I: IntoIterator<Item = S::Input>,
{
    let mut out = Vec::new();
    for item in items {
        stage.process(item, |o| {
            out.push(o);
            Ok(())
        })?;
    }
    stage.flush(|o| {
        out.push(o);
        Ok(())
    })?;
    Ok(out)
}
