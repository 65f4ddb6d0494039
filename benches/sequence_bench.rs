use banker_sim::{compute_safe_sequence, select_dataset, Dataset, DatasetSize, ProcessRecord};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_presets(c: &mut Criterion) {
    for size in DatasetSize::ALL {
        let pristine = select_dataset(size);
        c.bench_function(&format!("safe_sequence_{:?}", size).to_lowercase(), |b| {
            b.iter(|| {
                let mut dataset = pristine.clone();
                black_box(compute_safe_sequence(black_box(&mut dataset), 5).unwrap());
            })
        });
    }
}

fn bench_worst_case(c: &mut Criterion) {
    // Only the last process fits at each rank: N^2 scan.
    let n = 200;
    let records = (0..n)
        .map(|i| {
            let claim = (n - i) as i64;
            ProcessRecord::new(format!("P{i}"), vec![1; 8], vec![claim; 8], 1)
        })
        .collect();
    let pristine = Dataset::new(records, vec![1; 8]);

    c.bench_function("safe_sequence_reverse_200x8", |b| {
        b.iter(|| {
            let mut dataset = pristine.clone();
            black_box(compute_safe_sequence(black_box(&mut dataset), 8).unwrap());
        })
    });
}

criterion_group!(benches, bench_presets, bench_worst_case);
criterion_main!(benches);
