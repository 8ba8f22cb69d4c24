use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use squill::{Query, Table, Term};

/// Build a SELECT over `n` projected fields with `n` WHERE criteria:
/// SELECT t.col0,... FROM t AS t WHERE t.col0 = 0 AND t.col1 = 1 ...
fn build_select(n: usize) -> Query {
    let t = Table::new("t");
    let terms: Vec<_> = (0..n).map(|i| t.field(format!("col{i}"))).collect();
    let criteria: Vec<_> = (0..n)
        .map(|i| t.field(format!("col{i}")).eq(i as i64))
        .collect();
    Query::new()
        .select(&terms)
        .from_(t.clone())
        .where_(&criteria)
}

fn bench_to_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/to_sql");

    for n in [1, 5, 10, 50, 100] {
        let query = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(query.to_sql().unwrap()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let query = build_select(n);
                black_box(query.to_sql().unwrap());
            });
        });
    }

    group.finish();
}

fn bench_criterion_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/criterion_tree");

    for n in [5, 20, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let t = Table::new("t");
            b.iter(|| {
                let mut tree = t.field("col0").eq(0i64);
                for i in 1..n {
                    tree = tree.and(t.field(format!("col{i}")).eq(i as i64));
                }
                black_box(tree.to_sql().unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_to_sql,
    bench_build_and_render,
    bench_criterion_tree
);
criterion_main!(benches);
