//! Performance benchmarks for the payroll engine.
//!
//! Covers the pure calculator (one payslip, school-wide runs of 50 and 500
//! staff) and the HTTP calculate endpoint.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use bursar_engine::api::{create_router, AppState};
use bursar_engine::calculation::{calculate_payslip, run_payroll_for_school};
use bursar_engine::models::{
    PayPeriod, PayeBracket, PayrollSettings, SalaryComponent, SalaryInfo, StaffRole, TeamMember,
};
use bursar_engine::repository::InMemoryRepository;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn standard_settings() -> PayrollSettings {
    PayrollSettings {
        employee_pension_rate: Decimal::new(8, 2),
        paye_brackets: vec![
            PayeBracket::bounded(Decimal::new(7, 2), Decimal::from(300_000)),
            PayeBracket::bounded(Decimal::new(11, 2), Decimal::from(600_000)),
            PayeBracket::bounded(Decimal::new(15, 2), Decimal::from(1_100_000)),
            PayeBracket::bounded(Decimal::new(19, 2), Decimal::from(1_600_000)),
            PayeBracket::bounded(Decimal::new(21, 2), Decimal::from(3_200_000)),
            PayeBracket::unbounded(Decimal::new(24, 2)),
        ],
    }
}

/// Creates a staff list with varied salaries.
fn create_staff(count: usize) -> Vec<TeamMember> {
    (0..count)
        .map(|i| TeamMember {
            id: format!("tm_{:04}", i),
            school_id: "sch_bench".to_string(),
            name: format!("Staff {}", i),
            role: if i % 5 == 0 {
                StaffRole::SupportStaff
            } else {
                StaffRole::Teacher
            },
            salary: Some(SalaryInfo::new(
                Decimal::from(60_000 + (i as i64 % 40) * 5_000),
                vec![
                    SalaryComponent::new("Transport", Decimal::from(15_000)),
                    SalaryComponent::new("Housing", Decimal::from(20_000)),
                ],
                vec![SalaryComponent::new("Cooperative", Decimal::from(2_500))],
            )),
        })
        .collect()
}

fn march() -> PayPeriod {
    PayPeriod::new(2026, 3).expect("valid period")
}

/// Benchmark: one payslip through all stages.
fn bench_single_payslip(c: &mut Criterion) {
    let settings = standard_settings();
    let member = create_staff(1).remove(0);

    c.bench_function("single_payslip", |b| {
        b.iter(|| black_box(calculate_payslip(black_box(&member), march(), &settings)))
    });
}

/// Benchmark: school-wide payroll runs.
fn bench_payroll_run(c: &mut Criterion) {
    let settings = standard_settings();
    let mut group = c.benchmark_group("payroll_run");

    for size in [50usize, 500] {
        let staff = create_staff(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &staff, |b, staff| {
            b.iter(|| black_box(run_payroll_for_school(staff, march(), &settings)))
        });
    }

    group.finish();
}

/// Benchmark: the stateless calculate endpoint.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(InMemoryRepository::new()));
    let body = serde_json::json!({
        "member": create_staff(1).remove(0),
        "year": 2026,
        "month": 3,
        "settings": standard_settings()
    })
    .to_string();

    c.bench_function("calculate_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payslips/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_payslip,
    bench_payroll_run,
    bench_calculate_endpoint
);
criterion_main!(benches);
