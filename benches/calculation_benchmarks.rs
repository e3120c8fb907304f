//! Performance benchmarks for the payroll record keeper.
//!
//! Covers the hot paths of a report run:
//! - Tax for a single employee, with and without configured rules
//! - A tax report's worth of computations over 1000 employees
//! - Encoding and decoding a 1000-record file
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_records::calculation::TaxCalculator;
use payroll_records::models::{Compensation, Employee};
use payroll_records::store::codec::{decode_records, encode_records};

/// Builds `count` employees, alternating full-time and part-time.
fn create_employees(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| {
            let compensation = if i % 2 == 0 {
                Compensation::full_time(Decimal::new(45_000 + i as i64 * 10, 0))
            } else {
                Compensation::part_time(Decimal::new(2_250, 2), Decimal::new(80 + (i % 40) as i64, 0))
            }
            .expect("Failed to build compensation");
            Employee::new(
                format!("E{:04}", i),
                format!("Employee {}", i),
                format!("{} Main Street", i),
                format!("555-{:04}", i),
                compensation,
            )
            .expect("Failed to build employee")
        })
        .collect()
}

fn configured_calculator() -> TaxCalculator {
    TaxCalculator::new()
        .with_bracket(Decimal::new(30_000, 0), Decimal::new(5, 2))
        .with_bracket(Decimal::new(50_000, 0), Decimal::new(10, 2))
        .with_deduction("standard", Decimal::new(200, 0))
}

/// Benchmark: Tax for one employee.
fn bench_single_tax(c: &mut Criterion) {
    let employee = create_employees(1).remove(0);
    let plain = TaxCalculator::new();
    let configured = configured_calculator();

    let mut group = c.benchmark_group("single_tax");
    group.bench_function("base_rate_only", |b| {
        b.iter(|| black_box(plain.compute_tax(black_box(&employee))))
    });
    group.bench_function("brackets_and_deductions", |b| {
        b.iter(|| black_box(configured.compute_tax(black_box(&employee))))
    });
    group.finish();
}

/// Benchmark: Tax for every employee, as a tax report does.
fn bench_tax_report(c: &mut Criterion) {
    let calculator = configured_calculator();

    let mut group = c.benchmark_group("tax_report");
    for count in [10, 100, 1000] {
        let employees = create_employees(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), &employees, |b, employees| {
            b.iter(|| {
                let total: Decimal = employees.iter().map(|e| calculator.compute_tax(e)).sum();
                black_box(total)
            })
        });
    }
    group.finish();
}

/// Benchmark: Records file encode and decode.
fn bench_codec(c: &mut Criterion) {
    let employees = create_employees(1000);
    let content = encode_records(&employees);

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("encode_1000", |b| {
        b.iter(|| black_box(encode_records(black_box(&employees))))
    });
    group.bench_function("decode_1000", |b| {
        b.iter(|| black_box(decode_records(black_box(&content)).expect("Failed to decode")))
    });
    group.finish();
}

criterion_group!(benches, bench_single_tax, bench_tax_report, bench_codec);
criterion_main!(benches);
