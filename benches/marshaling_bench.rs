// benches/marshaling_bench.rs
//! Benchmarks for property and block marshaling.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use notionapi::{
    decode_block_children, decode_page, decode_property, resolve_property_updates, PageId,
    PropertyUpdate,
};
use serde_json::{json, Value};

fn rich_text(text: &str) -> Value {
    json!([{
        "type": "text",
        "text": {"content": text, "link": null},
        "annotations": {
            "bold": false,
            "italic": false,
            "strikethrough": false,
            "underline": false,
            "code": false,
            "color": "default"
        },
        "plain_text": text,
        "href": null
    }])
}

fn create_sample_page_json(num_properties: usize) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "Name".to_string(),
        json!({"id": "title", "type": "title", "title": rich_text("Benchmark page")}),
    );

    for i in 1..num_properties {
        let id = format!("prop_{}", i);
        let property = match i % 6 {
            0 => json!({"id": id, "type": "number", "number": i}),
            1 => json!({"id": id, "type": "select", "select": {"name": "Option 1", "color": "red"}}),
            2 => json!({
                "id": id,
                "type": "multi_select",
                "multi_select": [{"name": "a", "color": "blue"}, {"name": "b", "color": "green"}]
            }),
            3 => json!({"id": id, "type": "checkbox", "checkbox": i % 2 == 0}),
            4 => json!({"id": id, "type": "date", "date": {"start": "2024-06-18", "end": null, "time_zone": null}}),
            _ => json!({"id": id, "type": "rich_text", "rich_text": rich_text("some notes")}),
        };
        properties.insert(format!("Property_{}", i), property);
    }

    json!({
        "object": "page",
        "id": "12345678-1234-1234-1234-123456789abc",
        "created_time": "2024-01-01T00:00:00.000Z",
        "last_edited_time": "2024-01-01T00:00:00.000Z",
        "created_by": {"object": "user", "id": "11111111-1111-1111-1111-111111111111"},
        "last_edited_by": {"object": "user", "id": "11111111-1111-1111-1111-111111111111"},
        "parent": {"type": "database_id", "database_id": "87654321-4321-4321-4321-cba987654321"},
        "archived": false,
        "url": "https://www.notion.so/12345678123412341234123456789abc",
        "properties": properties
    })
}

fn create_block_listing_json(num_blocks: usize) -> Value {
    let results: Vec<Value> = (0..num_blocks)
        .map(|i| {
            json!({
                "object": "block",
                "id": format!("12345678-1234-1234-1234-{:012}", i),
                "has_children": false,
                "archived": false,
                "type": "paragraph",
                "paragraph": {"rich_text": rich_text("a paragraph of text"), "color": "default"}
            })
        })
        .collect();
    json!({"object": "list", "results": results, "next_cursor": null, "has_more": false})
}

fn bench_page_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_decoding");

    for (count, name) in [(10, "small"), (50, "medium"), (200, "large")] {
        let json = create_sample_page_json(count);
        group.bench_with_input(BenchmarkId::new("decode_page", name), &json, |b, json| {
            b.iter(|| decode_page(black_box(json)));
        });
    }

    let select = json!({"id": "x", "type": "select", "select": {"name": "Option 1", "color": "red"}});
    group.bench_function("decode_property_select", |b| {
        b.iter(|| decode_property("select", black_box(&select)));
    });

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    let page = match decode_page(&create_sample_page_json(50)) {
        Ok(page) => page,
        Err(e) => panic!("sample page should decode: {}", e),
    };

    group.bench_function("encode_all_properties", |b| {
        b.iter(|| {
            page.properties
                .values()
                .map(|p| p.encode())
                .collect::<Result<Vec<_>, _>>()
        });
    });

    let updates: Vec<(String, PropertyUpdate)> = (1..50)
        .filter(|i| i % 6 == 1 || i % 6 == 4)
        .map(|i| (format!("Property_{}", i), PropertyUpdate::from("2024-07-01")))
        .collect();
    group.bench_function("resolve_scalar_updates", |b| {
        b.iter(|| resolve_property_updates(black_box(&page), updates.iter().cloned()));
    });

    group.finish();
}

fn bench_block_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_decoding");

    for (count, name) in [(10, "small"), (100, "full_page")] {
        let json = create_block_listing_json(count);
        group.bench_with_input(
            BenchmarkId::new("decode_block_children", name),
            &json,
            |b, json| {
                b.iter(|| decode_block_children(black_box(json)));
            },
        );
    }

    group.finish();
}

fn bench_id_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("id_parsing");

    for (id, name) in [
        ("12345678-1234-1234-1234-123456789abc", "uuid_with_dashes"),
        ("123456781234123412341234567890ab", "uuid_without_dashes"),
        (
            "https://www.notion.so/Test-Page-123456781234123412341234567890ab",
            "full_url",
        ),
    ] {
        group.bench_with_input(BenchmarkId::new("parse_page_id", name), id, |b, id| {
            b.iter(|| PageId::parse(black_box(id)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_page_decoding,
    bench_encoding,
    bench_block_decoding,
    bench_id_parsing
);
criterion_main!(benches);
