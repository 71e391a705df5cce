//! Criterion benchmarks for the classification hot path.
//!
//! Compares the full `type_of` dispatch against the specialised predicates
//! over a mix of immediates and heap references.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tagval_runtime::allocator::alloc;
use tagval_runtime::object::{RArray, RFloat, RString};
use tagval_runtime::value::SymbolId;
use tagval_runtime::{TypeTag, Value};

fn mixed_values(size: usize) -> Vec<Value> {
    (0..size)
        .map(|i| match i % 6 {
            0 => Value::fixnum(i as i64).unwrap(),
            1 => Value::flonum(i as f64 + 0.5).unwrap(),
            2 => Value::static_symbol(SymbolId::new(i as u32)),
            3 => alloc(RString::new(i.to_string())),
            4 => alloc(RFloat(f64::INFINITY)),
            _ => Value::from(i % 2 == 0),
        })
        .chain(std::iter::once(alloc(RArray::new(vec![]))))
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let values = mixed_values(4096);

    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("type_of", |b| {
        b.iter(|| {
            values
                .iter()
                .filter(|value| black_box(**value).type_of() == TypeTag::Float)
                .count()
        })
    });

    group.bench_function("is_float_type", |b| {
        b.iter(|| {
            values
                .iter()
                .filter(|value| black_box(**value).is_float_type())
                .count()
        })
    });

    group.bench_function("has_type_array", |b| {
        b.iter(|| {
            values
                .iter()
                .filter(|value| black_box(**value).has_type(TypeTag::Array))
                .count()
        })
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("flonum_round_trip", |b| {
        b.iter(|| {
            let value = Value::flonum(black_box(0.1)).unwrap();
            value.as_flonum()
        })
    });

    c.bench_function("fixnum_round_trip", |b| {
        b.iter(|| {
            let value = Value::fixnum(black_box(-3)).unwrap();
            value.as_fixnum()
        })
    });
}

criterion_group!(benches, bench_classify, bench_encode);
criterion_main!(benches);
