// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use pdf_lens::document::{DocumentRenderer, LopdfRenderer};
use std::hint::black_box;
use std::path::PathBuf;

fn document_open_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_open");

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let bytes = std::fs::read(manifest_dir.join("tests/data/sample.pdf"))
        .expect("sample document present");
    let renderer = LopdfRenderer::new();

    group.bench_function("open_sample_pdf", |b| {
        b.iter(|| black_box(renderer.open(black_box(&bytes)).unwrap()));
    });

    group.bench_function("render_first_page_at_default_zoom", |b| {
        b.iter(|| black_box(renderer.render_page(black_box(&bytes), 0, 1.0).unwrap()));
    });

    let info = renderer.open(&bytes).unwrap();
    group.bench_function("render_known_page_at_max_zoom", |b| {
        b.iter(|| {
            black_box(
                renderer
                    .render_known_page(black_box(&bytes), &info, 0, 3.0)
                    .unwrap(),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, document_open_benchmark);
criterion_main!(benches);
