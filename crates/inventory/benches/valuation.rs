use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::Utc;
use stocktrack_core::{HistoryEntryId, ItemId};
use stocktrack_inventory::{
    HistoryAction, HistoryEntry, HistoryFilter, StockItem, filter_history, total_value,
};

fn make_items(n: usize) -> Vec<StockItem> {
    (0..n)
        .map(|i| {
            StockItem::from_parts(
                ItemId::new(),
                format!("Item {i}"),
                ["First", "Second", "Third"][i % 3],
                (i % 1000) as u64,
                (i % 5000) as u64 + 1,
                Utc::now(),
            )
        })
        .collect()
}

fn bench_total_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("total_value");
    for size in [1_000usize, 100_000, 1_000_000] {
        let items = make_items(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| total_value(black_box(items)))
        });
    }
    group.finish();
}

fn bench_filter_by_category(c: &mut Criterion) {
    let entries: Vec<_> = make_items(100_000)
        .into_iter()
        .map(|item| {
            HistoryEntry::from_parts(
                HistoryEntryId::new(),
                HistoryAction::Add,
                item,
                None,
                Utc::now(),
            )
        })
        .collect();
    let filter = HistoryFilter::parse("second");
    c.bench_function("filter_history/category", |b| {
        b.iter(|| filter_history(black_box(&entries), &filter))
    });
}

criterion_group!(benches, bench_total_value, bench_filter_by_category);
criterion_main!(benches);
