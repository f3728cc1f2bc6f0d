// benches/scanner_benchmarks.rs
// Throughput of the separator scanner across separator lengths and chunk
// sizes, plus a full NDJSON pipeline and a file-backed pump.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use splitstream::{Joiner, Pump, SeparatorScanner, Stage, StageExt, WriteSink};
use std::io::{BufReader, Cursor};
use std::time::Duration;
use tempfile::NamedTempFile;

const RECORDS: usize = 2_000;

fn build_input(sep: &str, record_len: usize) -> Vec<u8> {
    let record = "r".repeat(record_len);
    let mut out = Vec::with_capacity(RECORDS * (record_len + sep.len()));
    for _ in 0..RECORDS {
        out.extend_from_slice(record.as_bytes());
        out.extend_from_slice(sep.as_bytes());
    }
    out
}

fn scan_all(scanner: &mut SeparatorScanner, input: &[u8], chunk_size: usize) -> usize {
    let mut count = 0;
    for chunk in input.chunks(chunk_size) {
        scanner
            .scan(chunk, |r| {
                black_box(r);
                count += 1;
                Ok(())
            })
            .unwrap();
    }
    scanner
        .flush(|r| {
            black_box(r);
            count += 1;
            Ok(())
        })
        .unwrap();
    count
}

fn bench_separator_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("separator_length");
    for sep in ["\n", "\r\n", "::", "<|end|>"] {
        let input = build_input(sep, 64);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sep.len()), &input, |b, input| {
            b.iter(|| {
                let mut scanner = SeparatorScanner::new(sep).unwrap();
                scan_all(&mut scanner, black_box(input), 4096)
            })
        });
    }
    group.finish();
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_size");
    let input = build_input("\r\n", 256);
    group.throughput(Throughput::Bytes(input.len() as u64));
    for chunk_size in [16usize, 256, 4096, 65536] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut scanner = SeparatorScanner::new("\r\n").unwrap();
                    scan_all(&mut scanner, black_box(&input), chunk_size)
                })
            },
        );
    }
    group.finish();
}

// A single huge record exercises the resume offset.
fn bench_long_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("long_record");
    let mut input = vec![b'x'; 1 << 20];
    input.extend_from_slice(b"::");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("unbounded", |b| {
        b.iter(|| {
            let mut scanner = SeparatorScanner::new("::").unwrap();
            scan_all(&mut scanner, black_box(&input), 512)
        })
    });

    group.bench_function("bounded_discard", |b| {
        b.iter(|| {
            let mut scanner = SeparatorScanner::new("::")
                .unwrap()
                .with_max_record_len(1024)
                .unwrap();
            let mut count = 0;
            for chunk in input.chunks(512) {
                let _ = scanner.scan(chunk, |_| {
                    count += 1;
                    Ok(())
                });
            }
            count
        })
    });
    group.finish();
}

#[cfg(feature = "json")]
fn bench_ndjson_pipeline(c: &mut Criterion) {
    use splitstream::{Decode, Encode};
    let mut group = c.benchmark_group("ndjson_pipeline");
    let mut input = Vec::new();
    for i in 0..RECORDS {
        input.extend_from_slice(format!("{{\"id\":{i},\"name\":\"sensor-{i}\"}}\n").as_bytes());
    }
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("decode_encode_join", |b| {
        b.iter(|| {
            let mut pipeline = SeparatorScanner::default()
                .pipe(Decode::<serde_json::Value>::json())
                .pipe(Encode::<serde_json::Value>::json())
                .pipe(Joiner::default())
                .into_sink(WriteSink::new(Vec::with_capacity(input.len())));
            Pump::new(Cursor::new(black_box(&input)))
                .run(&mut pipeline)
                .unwrap();
            pipeline.into_inner().1.written()
        })
    });
    group.finish();
}

#[cfg(not(feature = "json"))]
fn bench_ndjson_pipeline(_c: &mut Criterion) {}

fn bench_file_pump(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_pump");
    group.measurement_time(Duration::from_secs(5));
    let input = build_input("\n", 128);
    let tmp = NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), &input).unwrap();
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("bufreader_lines", |b| {
        b.iter(|| {
            let file = std::fs::File::open(tmp.path()).unwrap();
            let mut count = 0usize;
            let mut pipeline = SeparatorScanner::default()
                .observed(|_: &String| count += 1)
                .pipe(Joiner::default())
                .into_sink(WriteSink::new(std::io::sink()));
            Pump::new(BufReader::new(file)).run(&mut pipeline).unwrap();
            drop(pipeline);
            count
        })
    });
    group.finish();
}

fn scanner_benchmarks(c: &mut Criterion) {
    bench_separator_lengths(c);
    bench_chunk_sizes(c);
    bench_long_record(c);
    bench_ndjson_pipeline(c);
    bench_file_pump(c);
}

criterion_group!(name = scanner; config = Criterion::default(); targets = scanner_benchmarks);
criterion_main!(scanner);
