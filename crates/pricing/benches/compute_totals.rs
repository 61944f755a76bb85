use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use mandierp_pricing::{
    compute_totals, CostKind, CostRule, LineItem, PricingModel, TotalPolicy, UnitType,
};

fn make_lines(n: usize) -> Vec<LineItem> {
    (0..n)
        .map(|i| {
            if i % 3 == 0 {
                LineItem::fixed(50.0 + i as f64, UnitType::Loose, 1500.0)
            } else {
                LineItem::fixed(50.0 + i as f64, UnitType::Box, 1500.0)
            }
        })
        .collect()
}

fn make_rules() -> Vec<CostRule> {
    vec![
        CostRule::new("Labour", 5.0, CostKind::PerBox),
        CostRule::new("Handling", 3.0, CostKind::PerBox),
        CostRule::new("APMC", 1.0, CostKind::Percentage),
        CostRule::new("Vehicle", 2000.0, CostKind::Fixed),
    ]
}

fn bench_compute_totals(c: &mut Criterion) {
    let rules = make_rules();
    let mut group = c.benchmark_group("compute_totals");

    for n in [1usize, 16, 256, 4096] {
        let lines = make_lines(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &lines, |b, lines| {
            b.iter(|| {
                compute_totals(
                    PricingModel::Fixed,
                    black_box(lines),
                    black_box(&rules),
                    TotalPolicy::Add,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_totals);
criterion_main!(benches);
