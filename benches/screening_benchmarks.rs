//! Performance benchmarks for the screening run.
//!
//! The engine is a [`StaticEngine`], so these measure the calculator layer
//! alone: dependency resolution, tax-unit partitioning, request assembly and
//! program evaluation.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use eligibility_engine::config::ConfigLoader;
use eligibility_engine::engine::StaticEngine;
use eligibility_engine::models::{
    Expense, ExpenseType, Frequency, Household, HouseholdMember, IncomeStream, IncomeType,
    MemberId, Relationship,
};
use eligibility_engine::registry::Registry;
use eligibility_engine::screening::Screener;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/screener").expect("Failed to load config")
}

/// A Massachusetts household of `size` members: a working head, a spouse,
/// then children.
fn ma_household(size: u32) -> Household {
    let head = HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 38).with_income(
        IncomeStream::new(IncomeType::Wages, Decimal::from(3200), Frequency::Monthly),
    );
    let household = Household::new(format!("bench-{size}"), "MA", size)
        .with_member(head)
        .with_expense(Expense::new(ExpenseType::Rent, Decimal::from(1900), Frequency::Monthly));

    (2..=size).fold(household, |household, id| {
        let member = if id == 2 {
            HouseholdMember::new(MemberId(id), Relationship::Spouse, 36)
        } else {
            HouseholdMember::new(MemberId(id), Relationship::Child, id)
        };
        household.with_member(member)
    })
}

/// Benchmark: federal and MA programs for a family of four.
fn bench_single_screen(c: &mut Criterion) {
    let config = load_config();
    let registry = Registry::build(config.variables()).expect("Invalid registry");
    let engine = StaticEngine::new(config.engine().clone()).with_default(Decimal::ZERO);
    let screener = Screener::new(&registry, config.parameters(), &engine);
    let household = ma_household(4);

    c.bench_function("screen_family_of_four", |b| {
        b.iter(|| black_box(screener.screen_jurisdictions(black_box(&household))))
    });
}

/// Benchmark: screening cost as the household grows.
fn bench_household_size(c: &mut Criterion) {
    let config = load_config();
    let registry = Registry::build(config.variables()).expect("Invalid registry");
    let engine = StaticEngine::new(config.engine().clone()).with_default(Decimal::ZERO);
    let screener = Screener::new(&registry, config.parameters(), &engine);

    let mut group = c.benchmark_group("household_size");
    for size in [1u32, 4, 8] {
        let household = ma_household(size);
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &household, |b, household| {
            b.iter(|| black_box(screener.screen_jurisdictions(household)))
        });
    }
    group.finish();
}

/// Benchmark: tax-unit partitioning on its own.
fn bench_partition(c: &mut Criterion) {
    let household = ma_household(8);

    c.bench_function("partition_household_of_eight", |b| {
        b.iter(|| black_box(black_box(&household).tax_unit_structure()))
    });
}

criterion_group!(benches, bench_single_screen, bench_household_size, bench_partition);
criterion_main!(benches);
