//! Benchmarks for outline inference.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline on synthetic in-memory documents, so
//! they measure the inference itself rather than PDF decoding.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfoutline::outline::{build_tree, flatten, group_words};
use pdfoutline::{MemorySource, OutlineExtractor, OutlineOptions, Word};

fn line(text: &str, x: f32, top: f32, size: f32) -> Vec<Word> {
    let mut x = x;
    text.split_whitespace()
        .map(|t| {
            let word = Word::new(t, x, x + 5.0 * t.len() as f32, top, size);
            x = word.x1 + 3.0;
            word
        })
        .collect()
}

/// Creates a synthetic manual: one numbered section per page, a few
/// subsections, paragraphs, bullets and a small table.
fn create_test_document(page_count: usize) -> Vec<Vec<Word>> {
    (0..page_count)
        .map(|i| {
            let mut page = Vec::new();
            if i == 0 {
                page.extend(line("Clinical Practice Manual", 72.0, 40.0, 24.0));
            }
            page.extend(line(&format!("{}. SECTION {}", i + 1, i + 1), 72.0, 80.0, 14.0));
            let mut top = 100.0;
            for sub in 1..=3 {
                page.extend(line(&format!("{}.{} Topic", i + 1, sub), 72.0, top, 12.0));
                top += 16.0;
                for _ in 0..6 {
                    page.extend(line(
                        "Body text describing the procedure in several plain words",
                        72.0,
                        top,
                        10.0,
                    ));
                    top += 12.0;
                }
                page.extend(line("• check vital signs", 72.0, top, 10.0));
                top += 12.0;
                for cell in 0..3 {
                    page.extend(line("cell", 72.0 + cell as f32 * 120.0, top, 10.0));
                }
                top += 12.0;
            }
            page
        })
        .collect()
}

/// Benchmark the full pipeline at various sizes.
fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_outline");

    for page_count in [1, 10, 50].iter() {
        let source = MemorySource::new(create_test_document(*page_count));

        group.bench_function(format!("{}_pages_parallel", page_count), |b| {
            let extractor = OutlineExtractor::new(OutlineOptions::default());
            b.iter(|| extractor.extract(black_box(&source), "bench.pdf").unwrap());
        });

        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            let extractor = OutlineExtractor::new(OutlineOptions::default().sequential());
            b.iter(|| extractor.extract(black_box(&source), "bench.pdf").unwrap());
        });
    }

    group.finish();
}

/// Benchmark line grouping of a single dense page.
fn bench_grouping(c: &mut Criterion) {
    let page = create_test_document(1).remove(0);

    c.bench_function("group_words", |b| {
        b.iter(|| group_words(black_box(&page)));
    });
}

/// Benchmark tree assembly and flattening.
fn bench_tree(c: &mut Criterion) {
    let source = MemorySource::new(create_test_document(50));
    let outline = OutlineExtractor::default()
        .extract(&source, "bench.pdf")
        .unwrap();
    let flat = flatten(&outline.headings);

    c.bench_function("build_tree", |b| {
        b.iter(|| build_tree(black_box(&flat)));
    });
}

criterion_group!(benches, bench_extract, bench_grouping, bench_tree);
criterion_main!(benches);
