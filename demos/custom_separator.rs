//! Example splitting one stream on several kinds of separator.
//!
//! Shows text, code point, and code point sequence separators, a separator
//! loaded from a JSON configuration value, and the record length limit.

use splitstream::{Error, Pump, SeparatorScanner, SeparatorSpec, StageExt};
use std::io::Cursor;

fn split(spec: impl Into<SeparatorSpec>, input: &str, chunk_size: usize) -> splitstream::Result<Vec<String>> {
    let mut records = SeparatorScanner::new(spec)?.into_sink(Vec::new());
    Pump::new(Cursor::new(input))
        .chunk_size(chunk_size)?
        .run(&mut records)?;
    Ok(records.into_inner().1)
}

fn main() -> splitstream::Result<()> {
    println!("text '::'      -> {:?}", split("::", "ab::cd::ef", 3)?);
    println!("code point '|' -> {:?}", split('|', "one|two|three", 2)?);
    println!("CR LF          -> {:?}", split(vec![0x0Du32, 0x0A], "x\r\ny\r\n", 1)?);
    println!("'→' (U+2192)   -> {:?}", split(0x2192u32, "a→b→c", 1)?);

    let config: serde_json::Value = serde_json::from_str(r#"{"separator": [59, 59]}"#)
        .map_err(|e| Error::decode(e.to_string()))?;
    let spec = SeparatorSpec::from_json(&config["separator"])?;
    println!("config ';;'    -> {:?}", split(spec, "k=v;;k2=v2", 4)?);

    match SeparatorScanner::new(SeparatorSpec::CodePoints(Vec::new())) {
        Err(e) => println!("empty sequence -> {e}"),
        Ok(_) => unreachable!("empty separators are rejected"),
    }

    let mut scanner = SeparatorScanner::default().with_max_record_len(4)?;
    let mut kept = Vec::new();
    let result = scanner.scan(b"ok\ntoo long\nfine\n", |r| {
        kept.push(r);
        Ok(())
    });
    println!("bounded        -> {kept:?} then {result:?}");
    Ok(())
}
