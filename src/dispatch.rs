//! A stage that hands each item to a caller-supplied function.

use crate::error::Result;
use crate::stage::Stage;
use std::marker::PhantomData;

/// Calls a dispatcher on every item and forwards the result.
///
/// The dispatcher may mutate the item in place and return `Ok(None)` to forward
/// it, return `Ok(Some(replacement))` to forward something else instead, or
/// return an error, which becomes that item's failure and forwards nothing.
pub struct Dispatch<T, F> {
    dispatcher: F,
    _phantom: PhantomData<fn(T) -> T>,
}

impl<T, F> Dispatch<T, F>
where
    F: FnMut(&mut T) -> Result<Option<T>>,
{
    pub fn new(dispatcher: F) -> Self {
        Self {
            dispatcher,
            _phantom: PhantomData,
        }
    }
}

impl<T, F> Stage for Dispatch<T, F>
where
    F: FnMut(&mut T) -> Result<Option<T>>,
{
    type Input = T;
    type Output = T;

    fn process<E>(&mut self, mut item: T, mut emit: E) -> Result<()>
    where
        E: FnMut(T) -> Result<()>,
    {
        match (self.dispatcher)(&mut item)? {
            Some(replacement) => emit(replacement),
            None => emit(item),
        }
    }

    fn flush<E>(&mut self, _emit: E) -> Result<()>
    where
        E: FnMut(T) -> Result<()>,
    {
        Ok(())
    }
}
