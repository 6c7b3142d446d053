// benches/convert_bench.rs
//! Benchmarks for payload conversion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use notion_typed::convert::{ApiConverter, DatabaseConverter, PageConverter};
use notion_typed::PageId;
use serde_json::json;

const PAGE_FIXTURE: &str = include_str!("../tests/fixtures/page.json");
const DATABASE_FIXTURE: &str = include_str!("../tests/fixtures/database.json");

fn create_wide_page_json(num_properties: usize) -> String {
    let mut properties = serde_json::Map::new();

    for i in 0..num_properties {
        let value = match i % 4 {
            0 => json!({ "id": format!("p{}", i), "type": "number", "number": i }),
            1 => json!({ "id": format!("p{}", i), "type": "checkbox", "checkbox": i % 3 == 0 }),
            2 => json!({
                "id": format!("p{}", i),
                "type": "select",
                "select": { "id": "opt", "name": "Option", "color": "purple" }
            }),
            _ => json!({
                "id": format!("p{}", i),
                "type": "rich_text",
                "rich_text": [{
                    "type": "text",
                    "text": { "content": "some text", "link": null },
                    "plain_text": "some text"
                }]
            }),
        };
        properties.insert(format!("Property_{}", i), value);
    }

    json!({
        "object": "page",
        "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
        "parent": { "type": "workspace", "workspace": true },
        "archived": false,
        "properties": properties
    })
    .to_string()
}

fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");

    group.bench_function("page_fixture", |b| {
        b.iter(|| PageConverter::decode_json(black_box(PAGE_FIXTURE)))
    });
    group.bench_function("database_fixture", |b| {
        b.iter(|| DatabaseConverter::decode_json(black_box(DATABASE_FIXTURE)))
    });

    for count in [10, 50, 200] {
        let body = create_wide_page_json(count);
        group.bench_with_input(BenchmarkId::new("wide_page", count), &body, |b, body| {
            b.iter(|| PageConverter::decode_json(black_box(body)))
        });
    }

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let page = match PageConverter::decode_json(PAGE_FIXTURE) {
        Ok(page) => page,
        Err(e) => panic!("fixture must decode: {}", e),
    };

    c.bench_function("encode_page_fixture", |b| {
        b.iter(|| PageConverter::encode_value(black_box(&page)))
    });
}

fn bench_id_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("id_parsing");

    for (id, name) in [
        ("59833787-2cf9-4fdf-8782-e53db20768a5", "dashed"),
        ("598337872cf94fdf8782e53db20768a5", "undashed"),
        (
            "https://www.notion.so/Launch-598337872cf94fdf8782e53db20768a5",
            "url",
        ),
    ] {
        group.bench_with_input(BenchmarkId::new("page_id", name), id, |b, id| {
            b.iter(|| PageId::parse(black_box(id)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decoding, bench_encoding, bench_id_parsing);
criterion_main!(benches);
