use criterion::{Criterion, criterion_group, criterion_main};
use meal::{Meal, summarize};

fn make_meals(count: usize) -> Vec<Meal> {
    (0..count)
        .map(|i| Meal::new(format!("Meal {i}"), vec![0u8; 4096], (i % 6) as i64).unwrap())
        .collect()
}

fn bench_summarize_100(c: &mut Criterion) {
    let meals = make_meals(100);

    c.bench_function("summary/summarize_100", |b| {
        b.iter(|| summarize(&meals));
    });
}

fn bench_summarize_10_000(c: &mut Criterion) {
    let meals = make_meals(10_000);

    c.bench_function("summary/summarize_10_000", |b| {
        b.iter(|| summarize(&meals));
    });
}

fn bench_serialize_meal(c: &mut Criterion) {
    let meal = Meal::new("Caprese Salad", vec![0xAB; 64 * 1024], 4).unwrap();

    c.bench_function("meal/serialize_64k_photo", |b| {
        b.iter(|| serde_json::to_vec(&meal).unwrap());
    });
}

criterion_group!(
    benches,
    bench_summarize_100,
    bench_summarize_10_000,
    bench_serialize_meal,
);
criterion_main!(benches);
