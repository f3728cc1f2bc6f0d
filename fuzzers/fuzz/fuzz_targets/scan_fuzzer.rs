#![no_main]
use libfuzzer_sys::fuzz_target;
use splitstream::{SeparatorScanner, Stage};

fn scan(sep: &[u8], chunks: impl Iterator<Item = Vec<u8>>) -> Vec<Option<String>> {
    let mut scanner = SeparatorScanner::new(sep).unwrap();
    let mut events = Vec::new();
    for chunk in chunks {
        let mut input = chunk;
        loop {
            let result = scanner.process(std::mem::take(&mut input), |r| {
                events.push(Some(r));
                Ok(())
            });
            match result {
                Ok(()) => break,
                Err(_) => events.push(None),
            }
        }
    }
    while scanner
        .flush(|r| {
            events.push(Some(r));
            Ok(())
        })
        .is_err()
    {
        events.push(None);
    }
    events
}

fuzz_target!(|data: &[u8]| {
    // First byte picks the separator length, second the chunk size.
    if data.len() < 3 {
        return;
    }
    let sep_len = 1 + (data[0] as usize % 4);
    let chunk_size = 1 + data[1] as usize;
    let body = &data[2..];
    if body.len() < sep_len {
        return;
    }
    let (sep, input) = body.split_at(sep_len);

    let whole = scan(sep, std::iter::once(input.to_vec()));
    let chunked = scan(sep, input.chunks(chunk_size).map(<[u8]>::to_vec));
    assert_eq!(whole, chunked);
});
