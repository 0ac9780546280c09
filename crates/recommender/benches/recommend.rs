//! Benchmarks for similarity ranking
//!
//! Run with: cargo bench --package recommender
//!
//! Uses a synthetic table so no dataset files are needed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{DataIndex, MovieRecord, SimilarityMatrix};
use recommender::Recommender;
use std::sync::Arc;

const ROWS: usize = 2000;

fn build_recommender() -> Recommender {
    let movies = (0..ROWS)
        .map(|i| MovieRecord {
            id: i as u32 + 1,
            title: format!("Movie {}", i),
            genres: "Drama".to_string(),
            release_date: None,
            vote_average: 6.5,
            overview: String::new(),
            cast: String::new(),
            director: String::new(),
        })
        .collect();

    let rows = (0..ROWS)
        .map(|i| {
            (0..ROWS)
                .map(|j| if i == j { 1.0 } else { ((i * 31 + j * 17) % 997) as f32 / 997.0 })
                .collect()
        })
        .collect();

    let matrix = SimilarityMatrix::from_rows(rows).expect("square matrix");
    let index = DataIndex::new(movies, matrix).expect("aligned index");
    Recommender::new(Arc::new(index))
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = build_recommender();

    c.bench_function("recommend_top_5", |b| {
        b.iter(|| {
            let results = recommender
                .recommend(black_box("Movie 1000"), black_box(5))
                .unwrap();
            black_box(results)
        })
    });
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
