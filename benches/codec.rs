use chrono::{FixedOffset, TimeZone};
use criterion::{criterion_group, criterion_main, Criterion};

use postbox::model::address::Address;
use postbox::model::message::Message;
use postbox::parser::fragment;

fn sample_date() -> chrono::DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .unwrap()
}

fn singlepart_message() -> Message {
    Message::singlepart(
        Address::new("Jane Doe", "jane", "example.com").unwrap(),
        vec![Address::new("", "john", "example.com").unwrap()],
        "a sample subject line".to_string(),
        sample_date(),
        "The quick brown fox jumps over the lazy dog.\n".repeat(20),
        false,
    )
    .unwrap()
}

fn multipart_message() -> Message {
    Message::multipart(
        Address::new("Jane Doe", "jane", "example.com").unwrap(),
        vec![Address::new("", "john", "example.com").unwrap()],
        "a sample subject line".to_string(),
        sample_date(),
        "plain text alternative\n".repeat(20),
        "<html><body>hello world</body></html>".repeat(20),
    )
    .unwrap()
}

fn encode_singlepart(c: &mut Criterion) {
    let message = singlepart_message();
    c.bench_function("encode singlepart message", |b| {
        b.iter(|| message.encode());
    });
}

fn decode_singlepart(c: &mut Criterion) {
    let encoded = singlepart_message().encode();
    c.bench_function("decode singlepart message", |b| {
        b.iter(|| {
            let fragments = fragment::decode(&encoded);
            Message::from_fragments(&fragments).unwrap()
        });
    });
}

fn encode_multipart(c: &mut Criterion) {
    let message = multipart_message();
    c.bench_function("encode multipart message", |b| {
        b.iter(|| message.encode());
    });
}

fn decode_multipart(c: &mut Criterion) {
    let encoded = multipart_message().encode();
    c.bench_function("decode multipart message", |b| {
        b.iter(|| {
            let fragments = fragment::decode(&encoded);
            Message::from_fragments(&fragments).unwrap()
        });
    });
}

criterion_group!(
    codec,
    encode_singlepart,
    decode_singlepart,
    encode_multipart,
    decode_multipart
);
criterion_main!(codec);
