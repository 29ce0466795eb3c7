use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http_comparator::{HttparseRequestParser, Request, RequestParser, RequestsComparator};

const SAMPLE: &str = "GET /somepath HTTP/1.1\nHost: ifconfig.me\nUser-Agent: curl/8.5.0\nAccept: */*\nContent-Type: text/html; charset=ISO-8859-4\r\n\r\n{\"json_key\": 10}";
const REORDERED: &str = "GET /somepath HTTP/1.1\nContent-Type: text/html; charset=ISO-8859-4\nAccept: */*\nUser-Agent: curl/8.5.0\nHost: ifconfig.me\r\n\r\n";

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("http_parse");
    let parser = HttparseRequestParser::default();

    group.bench_function(BenchmarkId::new("httparse parser", "sample http"), |c| {
        c.iter(|| parser.parse(black_box(SAMPLE)))
    });
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    let comparator = RequestsComparator::new();
    let parsed: Request = comparator.parser().parse(SAMPLE).unwrap();

    group.bench_function(BenchmarkId::new("text vs text", "sample http"), |c| {
        c.iter(|| comparator.compare(black_box(SAMPLE), black_box(REORDERED)))
    });
    group.bench_function(BenchmarkId::new("structured vs text", "sample http"), |c| {
        c.iter(|| comparator.compare(black_box(&parsed), black_box(REORDERED)))
    });
    group.bench_function(
        BenchmarkId::new("structured vs structured", "sample http"),
        |c| c.iter(|| comparator.compare(black_box(&parsed), black_box(&parsed))),
    );
}

criterion_group!(http_parse, bench_parsing);
criterion_group!(compare, bench_compare);

criterion_main!(http_parse, compare);
