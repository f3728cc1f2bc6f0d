use honggfuzz::fuzz;
use splitstream::{Decode, SeparatorScanner, Stage, StageExt};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let mut stage = SeparatorScanner::default().pipe(Decode::<serde_json::Value>::json());
            let mut input = data.to_vec();
            // Per-record failures leave the rest buffered; keep draining.
            while stage.process(std::mem::take(&mut input), |_| Ok(())).is_err() {}
            while stage.flush(|_| Ok(())).is_err() {}
        });
    }
}
