//! Benchmarks for the rig parser.

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rigdef::{parse_str, ParserConfig};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let config = ParserConfig::default();

    let sample = load_fixture("sample.truck");
    // Same rig repeated, with every copy in its own module.
    let large: String = (0..50)
        .map(|i| format!("section 450 copy{}\n{}\nend_section\n", i, sample.split_once('\n').map_or("", |(_, body)| body)))
        .fold(String::from("Large\n"), |mut acc, chunk| {
            acc.push_str(&chunk);
            acc
        });

    group.bench_function("parse_sample", |b| {
        b.iter(|| parse_str(black_box(&sample), &config))
    });

    group.bench_function("parse_large", |b| {
        b.iter(|| parse_str(black_box(&large), &config))
    });

    group.finish();
}

criterion_group!(benches, bench_parsing);
criterion_main!(benches);
