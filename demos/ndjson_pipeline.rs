//! Example reading newline-delimited JSON from stdin, tagging every object,
//! and writing the result to stdout.
//!
//! Malformed records are reported on stderr and skipped; everything else
//! flows through unchanged in order.
//!
//!     printf '{"id":1}\n[1,2]\nnope\n{"id":2}\n' | cargo run --example ndjson_pipeline

use serde_json::{json, Value};
use splitstream::{Decode, Dispatch, Encode, Joiner, SeparatorScanner, Sink, StageExt, WriteSink};
use std::io::{self, BufWriter, Read};

fn main() -> splitstream::Result<()> {
    let mut seq = 0u64;
    let stage = SeparatorScanner::default()
        .pipe(Decode::<Value>::json())
        .pipe(Dispatch::new(move |v: &mut Value| {
            seq += 1;
            match v.as_object_mut() {
                Some(obj) => {
                    obj.insert("seq".into(), json!(seq));
                    Ok(None)
                }
                None => Ok(Some(json!({ "seq": seq, "value": v.take() }))),
            }
        }))
        .pipe(Encode::<Value>::json())
        .pipe(Joiner::default());

    let stdout = io::stdout();
    let mut pipeline = stage.into_sink(WriteSink::new(BufWriter::new(stdout.lock())));

    // Drive the pipeline by hand so per-record failures can be skipped.
    let mut stdin = io::stdin().lock();
    let mut buf = vec![0u8; 8 * 1024];
    loop {
        let n = stdin.read(&mut buf)?;
        if n == 0 {
            break;
        }
        let mut chunk = buf[..n].to_vec();
        while let Err(e) = pipeline.accept(std::mem::take(&mut chunk)) {
            if !e.is_per_item() {
                return Err(e);
            }
            eprintln!("skipped record: {e}");
        }
    }
    while let Err(e) = pipeline.finish() {
        if !e.is_per_item() {
            return Err(e);
        }
        eprintln!("skipped record: {e}");
    }

    let (_, sink) = pipeline.into_inner();
    eprintln!("wrote {} bytes", sink.written());
    Ok(())
}
