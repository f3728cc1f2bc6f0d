//! Composition adapters for stages and sinks.

use crate::error::Result;
use crate::sink::Sink;
use crate::stage::Stage;

//--- Chain ---

/// Two stages run back to back: every output of `first` is processed by `next`.
///
/// Flushing flushes `first` into `next`, then flushes `next`.
pub struct Chain<A, B> {
    first: A,
    next: B,
}

impl<A, B> Chain<A, B>
where
    A: Stage,
    B: Stage<Input = A::Output>,
{
    pub fn new(first: A, next: B) -> Self {
        Self { first, next }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.next)
    }
}

impl<A, B> Stage for Chain<A, B>
where
    A: Stage,
    B: Stage<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn process<F>(&mut self, item: A::Input, mut emit: F) -> Result<()>
    where
        F: FnMut(B::Output) -> Result<()>,
    {
        let next = &mut self.next;
        self.first.process(item, |mid| next.process(mid, &mut emit))
    }

    fn flush<F>(&mut self, mut emit: F) -> Result<()>
    where
        F: FnMut(B::Output) -> Result<()>,
    {
        let next = &mut self.next;
        self.first.flush(|mid| next.process(mid, &mut emit))?;
        self.next.flush(emit)
    }
}

//--- Piped ---

/// A stage bound to the sink that consumes its output.
///
/// `Piped` is itself a `Sink` of the stage's input, so pipelines nest:
/// `accept` processes one item, `finish` flushes the stage then finishes the sink.
pub struct Piped<S, K> {
    stage: S,
    sink: K,
}

impl<S, K> Piped<S, K>
where
    S: Stage,
    K: Sink<S::Output>,
{
    pub fn new(stage: S, sink: K) -> Self {
        Self { stage, sink }
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_inner(self) -> (S, K) {
        (self.stage, self.sink)
    }
}

impl<S, K> Sink<S::Input> for Piped<S, K>
where
    S: Stage,
    K: Sink<S::Output>,
{
    fn accept(&mut self, item: S::Input) -> Result<()> {
        let sink = &mut self.sink;
        self.stage.process(item, |out| sink.accept(out))
    }

    fn finish(&mut self) -> Result<()> {
        let sink = &mut self.sink;
        self.stage.flush(|out| sink.accept(out))?;
        self.sink.finish()
    }
}

//--- Observer Adapter ---

/// An adapter that observes every emitted item without copying or mutating it.
///
/// Callback timing: Invoked exactly once per output, before it is forwarded.
pub struct Observed<S: Stage, C: FnMut(&S::Output)> {
    inner: S,
    callback: C,
}

impl<S: Stage, C: FnMut(&S::Output)> Observed<S, C> {
    pub fn new(inner: S, callback: C) -> Self {
        Self { inner, callback }
    }
}

impl<S: Stage, C: FnMut(&S::Output)> Stage for Observed<S, C> {
    type Input = S::Input;
    type Output = S::Output;

    fn process<F>(&mut self, item: S::Input, mut emit: F) -> Result<()>
    where
        F: FnMut(S::Output) -> Result<()>,
    {
        let callback = &mut self.callback;
        self.inner.process(item, |out| {
            callback(&out);
            emit(out)
        })
    }

    fn flush<F>(&mut self, mut emit: F) -> Result<()>
    where
        F: FnMut(S::Output) -> Result<()>,
    {
        let callback = &mut self.callback;
        self.inner.flush(|out| {
            callback(&out);
            emit(out)
        })
    }
}

//--- Fluent Extension Trait ---

/// Extension methods for stages to enable fluent composition without importing adapter types.
pub trait StageExt: Stage + Sized {
    /// Feed every output of this stage into `next`.
    fn pipe<B>(self, next: B) -> Chain<Self, B>
    where
        B: Stage<Input = Self::Output>,
    {
        Chain::new(self, next)
    }

    /// Terminate this stage in a sink.
    fn into_sink<K>(self, sink: K) -> Piped<Self, K>
    where
        K: Sink<Self::Output>,
    {
        Piped::new(self, sink)
    }

    /// Observe outputs without copying. Useful for metrics/logging.
    fn observed<C: FnMut(&Self::Output)>(self, callback: C) -> Observed<Self, C> {
        Observed::new(self, callback)
    }
}

impl<T: Stage> StageExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::joiner::Joiner;
    use crate::scanner::SeparatorScanner;
    use crate::sink::PushSink;
    use crate::stage::run_to_vec;

    #[test]
    fn test_chain_rejoins_records() {
        let mut stage = SeparatorScanner::new("::")
            .unwrap()
            .pipe(Joiner::new("\n").unwrap());
        let out = run_to_vec(&mut stage, [b"a::b".to_vec(), b"::c".to_vec()]).unwrap();
        assert_eq!(out.concat(), b"a\nb\nc\n");
    }

    #[test]
    fn test_observed_sees_flushed_items() {
        let mut lengths = Vec::new();
        {
            let mut stage = SeparatorScanner::default().observed(|r: &String| lengths.push(r.len()));
            run_to_vec(&mut stage, [b"abc\nde".to_vec()]).unwrap();
        }
        assert_eq!(lengths, vec![3, 2]);
    }

    #[test]
    fn test_piped_finish_flushes_and_finishes() {
        let mut piped = SeparatorScanner::default().into_sink(Vec::new());
        piped.accept(b"x\ny".to_vec()).unwrap();
        assert_eq!(piped.sink(), &vec!["x".to_string()]);
        piped.finish().unwrap();
        assert!(piped.stage().is_finished());
        let (_, records) = piped.into_inner();
        assert_eq!(records, vec!["x", "y"]);
    }

    #[test]
    fn test_piped_into_push_sink_leaves_target_open() {
        let mut target: Vec<Vec<u8>> = Vec::new();
        {
            let mut side = Joiner::default().into_sink(PushSink::new(&mut target));
            side.accept("side".to_string()).unwrap();
            side.finish().unwrap();
        }
        let mut main = Joiner::default().into_sink(&mut target);
        main.accept("main".to_string()).unwrap();
        main.finish().unwrap();
        assert_eq!(target.concat(), b"side\nmain\n");
    }

    #[test]
    fn test_chain_error_stops_item() {
        let failing = crate::dispatch::Dispatch::new(|s: &mut String| {
            if s.as_str() == "bad" {
                Err(Error::decode("bad record"))
            } else {
                Ok(None)
            }
        });
        let mut stage = SeparatorScanner::default().pipe(failing);
        let mut out = Vec::new();
        let result = stage.process(b"ok\nbad\nlater\n".to_vec(), |r| {
            out.push(r);
            Ok(())
        });
        assert!(matches!(result, Err(Error::Decode { .. })));
        stage
            .flush(|r| {
                out.push(r);
                Ok(())
            })
            .unwrap();
        assert_eq!(out, vec!["ok", "later"]);
    }
}
