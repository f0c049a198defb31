//! Benchmarks for unocr reconstruction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline on synthetic two-column OCR responses.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

/// Creates a synthetic OCR response with a title and two body columns per page.
fn create_test_response(page_count: u32) -> Value {
    let mut records = Vec::new();

    for page in 0..page_count {
        records.push(json!({
            "type": "text",
            "text": format!("Chapter {}", page + 1),
            "grounding": {"page": page, "box": {"left": 0.1, "top": 0.04, "right": 0.9, "bottom": 0.1}}
        }));
        records.push(json!({
            "type": "logo",
            "text": "ACME",
            "grounding": {"page": page, "box": {"left": 0.8, "top": 0.01, "right": 0.95, "bottom": 0.04}}
        }));

        for line in 0..30 {
            let top = 0.12 + line as f64 * 0.028;
            for (left, right) in [(0.05, 0.47), (0.53, 0.95)] {
                records.push(json!({
                    "type": "text",
                    "text": format!("Line {} of page {}, benchmark content for unocr <::ignored::>.", line, page),
                    "grounding": {"page": page, "box": {"left": left, "top": top, "right": right, "bottom": top + 0.0275}}
                }));
            }
        }
    }

    Value::Array(records)
}

/// Benchmark chunk parsing and cleanup.
fn bench_chunk_parsing(c: &mut Criterion) {
    let response = create_test_response(10);
    let parser = unocr::ChunkParser::default();

    c.bench_function("parse_chunks_10_pages", |b| {
        b.iter(|| parser.parse_value(black_box(&response)).unwrap());
    });
}

/// Benchmark full reconstruction at various sizes.
fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction");

    for page_count in [1, 10, 50].iter() {
        let response = create_test_response(*page_count);

        group.bench_function(format!("{}_pages_parallel", page_count), |b| {
            b.iter(|| unocr::parse_value(black_box(&response)).unwrap());
        });

        let sequential = unocr::ReconstructionOptions::new().sequential();
        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            b.iter(|| unocr::parse_value_with_options(black_box(&response), &sequential).unwrap());
        });
    }

    group.finish();
}

/// Benchmark flat text rendering.
fn bench_flat_text(c: &mut Criterion) {
    let response = create_test_response(10);
    let chunks = unocr::ChunkParser::default().parse_value(&response).unwrap();
    let options = unocr::ReconstructionOptions::default();

    c.bench_function("flat_text_10_pages", |b| {
        b.iter(|| unocr::render::to_flat_text(black_box(&chunks), &options));
    });
}

criterion_group!(
    benches,
    bench_chunk_parsing,
    bench_reconstruction,
    bench_flat_text,
);
criterion_main!(benches);
