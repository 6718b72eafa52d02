use criterion::{black_box, criterion_group, criterion_main, Criterion};

use xml2json::{convert, json, xml, Direction};

const XML_INPUT: &str = r#"<root id="1"><name>test</name><value>42</value><tag>a</tag><tag>b</tag></root>"#;
const JSON_INPUT: &str = r##"{"root": {"@id": "1", "#text": "t", "name": "test", "tag": ["a", "b"]}}"##;

fn catalog(books: usize) -> String {
    let mut doc = String::from("<catalog>");
    for i in 0..books {
        doc.push_str(&format!(
            r#"<book id="bk{i}"><author>Author {i}</author><title>Title &amp; more</title><price currency="USD">{i}.95</price></book>"#
        ));
    }
    doc.push_str("</catalog>");
    doc
}

fn bench_xml_to_json(c: &mut Criterion) {
    c.bench_function("convert_xml_json", |b| {
        b.iter(|| convert(black_box(XML_INPUT), Direction::XmlToJson))
    });
}

fn bench_json_to_xml(c: &mut Criterion) {
    c.bench_function("convert_json_xml", |b| {
        b.iter(|| convert(black_box(JSON_INPUT), Direction::JsonToXml))
    });
}

fn bench_large_catalog(c: &mut Criterion) {
    let xml_text = catalog(1_000);
    let json_text = convert(&xml_text, Direction::XmlToJson).unwrap_or_default();

    c.bench_function("parse_xml_catalog_1000", |b| {
        b.iter(|| xml::from_str(black_box(&xml_text)))
    });
    c.bench_function("parse_json_catalog_1000", |b| {
        b.iter(|| json::from_str(black_box(&json_text)))
    });
    c.bench_function("convert_catalog_round_trip_1000", |b| {
        b.iter(|| {
            convert(black_box(&xml_text), Direction::XmlToJson)
                .and_then(|json| convert(&json, Direction::JsonToXml))
        })
    });
}

criterion_group!(
    benches,
    bench_xml_to_json,
    bench_json_to_xml,
    bench_large_catalog
);
criterion_main!(benches);
