use criterion::{criterion_group, criterion_main, Criterion};

use uri_value::{relativize, resolve, Uri};

pub fn criterion_benchmark(c: &mut Criterion) {
    let base = Uri::parse("https://sub.example.com/foo1/foo2/foo3/foo4/foo5")
        .expect("should be a valid URI");
    let reference = Uri::parse(concat!(
        "bar1/bar2/bar3/../bar4/../../bar5/bar6/bar7/../../../../..",
        "/bar8/../../../bar9/././././././bar10/bar11",
    ))
    .expect("should be a valid URI reference");

    c.bench_function("resolve", |b| b.iter(|| resolve(&base, &reference)));

    let target = Uri::parse("https://sub.example.com/foo1/other/leaf?q=1")
        .expect("should be a valid URI");
    c.bench_function("relativize", |b| b.iter(|| relativize(&base, &target)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
