use std::io::Write;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

use ark_streams::{codec, copy, decode_wrap, encode_wrap};

fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Compares whole-buffer encoding with the streaming wrappers.
fn bench_base64(c: &mut Criterion) {
    let mut group = c.benchmark_group("base64");

    let inputs = [("small", 1024), ("medium", 65536), ("large", 1048576)];
    for (name, size) in inputs.iter() {
        let input_data = generate_random_data(*size);
        let encoded = codec::encode(&input_data);

        group.bench_function(format!("encode:{}", name), |b| {
            b.iter(|| codec::encode(black_box(&input_data)));
        });

        group.bench_function(format!("encode_wrap:{}", name), |b| {
            b.iter(|| {
                let mut encoder = encode_wrap(Vec::with_capacity(encoded.len()));
                for chunk in black_box(&input_data).chunks(1000) {
                    encoder.write_all(chunk).expect("write returned an error");
                }
                encoder.finish().expect("finish returned an error")
            });
        });

        group.bench_function(format!("decode_wrap:{}", name), |b| {
            b.iter(|| {
                let mut decoder = decode_wrap(black_box(encoded.as_bytes()));
                let mut sink = Vec::with_capacity(*size);
                copy(&mut decoder, &mut sink).expect("copy returned an error");
                sink
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_base64);
criterion_main!(benches);
