use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rustf_utils::http::parse_str;
use rustf_utils::utils::{csv, encoding, string};
use rustf_utils::{json, Value, U};

fn sample_records() -> Value {
    let rows: Vec<Value> = (0..100)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("user {}", i),
                "email": format!("user{}@example.com", i),
                "note": "says \"hi\", often",
            })
        })
        .collect();
    Value::Array(rows)
}

fn benchmark_compact(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog ".repeat(10);

    c.bench_function("string::compact", |b| {
        b.iter(|| {
            let value = string::compact(black_box(&text), black_box(40));
            black_box(value);
        })
    });
}

fn benchmark_to_csv(c: &mut Criterion) {
    let records = sample_records();

    c.bench_function("csv::to_csv 100 rows", |b| {
        b.iter(|| {
            let value = csv::to_csv(black_box(&records), ',', '"');
            black_box(value);
        })
    });
}

fn benchmark_parse_str(c: &mut Criterion) {
    let query = "page=3&sort=name&filter[status]=open&filter[owner]=ada&tags[]=a&tags[]=b&q=hello+world%21";

    c.bench_function("http::parse_str", |b| {
        b.iter(|| {
            let value = parse_str(black_box(query));
            black_box(value);
        })
    });
}

fn benchmark_html_escape(c: &mut Criterion) {
    let records = sample_records();

    c.bench_function("encoding::html_escape nested", |b| {
        b.iter(|| {
            let value = encoding::html_escape(black_box(&records), false);
            black_box(value);
        })
    });
}

fn benchmark_guid(c: &mut Criterion) {
    c.bench_function("U::guid", |b| {
        b.iter(|| {
            let value = U::guid();
            black_box(value);
        })
    });
}

criterion_group!(
    benches,
    benchmark_compact,
    benchmark_to_csv,
    benchmark_parse_str,
    benchmark_html_escape,
    benchmark_guid
);
criterion_main!(benches);
