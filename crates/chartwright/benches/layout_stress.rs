use chartwright::chord::layout_chord;
use chartwright::config::{ChordOptions, WordCloudOptions};
use chartwright::model::{FlowMatrix, WordItem};
use chartwright::text::EstimatedTextMeasurer;
use chartwright::word_cloud::layout_word_cloud;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn dense_flows(n: usize) -> FlowMatrix {
    FlowMatrix {
        names: (0..n).map(|i| format!("group-{i}")).collect(),
        matrix: (0..n)
            .map(|i| (0..n).map(|j| ((i * 7 + j * 13) % 17) as f64).collect())
            .collect(),
    }
}

fn many_words(n: usize) -> Vec<WordItem> {
    (0..n)
        .map(|i| WordItem::new(format!("term{i}"), ((i * 37) % 101) as f64))
        .collect()
}

fn bench_layout_stress(c: &mut Criterion) {
    let flows = dense_flows(64);
    let words = many_words(150);
    let chord_opts = ChordOptions::default();
    let cloud_opts = WordCloudOptions::default();
    let measurer = EstimatedTextMeasurer::default();

    let mut group = c.benchmark_group("layout_stress");
    group.sample_size(50);

    group.bench_function("chord_dense_64", |b| {
        b.iter(|| {
            let layout = layout_chord(black_box(&flows), &chord_opts).expect("layout");
            black_box(layout.chords.len());
        });
    });

    // Most of these words exhaust the retry budget, which is the worst case for placement.
    group.bench_function("word_cloud_150", |b| {
        b.iter(|| {
            let layout =
                layout_word_cloud(black_box(&words), &cloud_opts, &measurer).expect("layout");
            black_box(layout.words.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_layout_stress);
criterion_main!(benches);
