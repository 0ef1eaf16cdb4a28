use arbfloat::{BigFloat, BigNat};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn test_bignat_mul() {
    let a = BigNat::pseudorandom(200, 12345);
    let b = BigNat::pseudorandom(100, 67890);
    black_box(a * b);
}

fn test_bignat_divide() {
    let mut a = BigNat::pseudorandom(40, 1);
    let b = BigNat::pseudorandom(20, 2);
    black_box(a.divide(&b, 200));
}

fn test_bignat_as_decimal() {
    let a = BigNat::pseudorandom(30, 424242);
    black_box(a.as_decimal());
}

fn test_float_div() {
    let a = BigFloat::from_u64(1);
    let b = BigFloat::from_u64(3);
    for _ in 0..100 {
        black_box(&a / &b);
    }
}

fn test_float_sqrt() {
    black_box(BigFloat::from_f64(1.2341432143e28).sqrt());
}

fn test_parse() {
    black_box(BigFloat::from(
        "123456789.12345678901234567890123456789e-7",
    ));
}

fn test_print() {
    let f = BigFloat::from_f64(core::f64::consts::PI)
        / BigFloat::from_f64(1024.0);
    black_box(f.to_decimal_string(0));
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("bignat_mul", |b| b.iter(test_bignat_mul));
    c.bench_function("bignat_divide", |b| b.iter(test_bignat_divide));
    c.bench_function("bignat_as_decimal", |b| b.iter(test_bignat_as_decimal));
    c.bench_function("float_div", |b| b.iter(test_float_div));
    c.bench_function("float_sqrt", |b| b.iter(test_float_sqrt));
    c.bench_function("parse", |b| b.iter(test_parse));
    c.bench_function("print", |b| b.iter(test_print));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
