//! End-to-end pipeline benchmark
//!
//! The whole computation runs over at most 30 rows, so this mostly guards
//! against accidental quadratic blowups in the OLS refits.
//!
//! Run with: cargo bench --bench pipeline

use arabica_stats::anova::{fit_anova, FactorColumn};
use arabica_stats::dataset::{self, Factor, Variable};
use arabica_stats::normality::check_normality;
use arabica_stats::pipeline::AnalysisReport;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_load(c: &mut Criterion) {
    c.bench_function("dataset_load", |b| {
        b.iter(|| black_box(dataset::load().unwrap()));
    });
}

fn bench_shapiro(c: &mut Criterion) {
    let ds = dataset::load().unwrap();
    c.bench_function("shapiro_wilk_8_variables", |b| {
        b.iter(|| black_box(check_normality(&ds.combined, &Variable::ALL).unwrap()));
    });
}

fn bench_anova(c: &mut Criterion) {
    let ds = dataset::load().unwrap();
    let treatments: Vec<_> = ds
        .chlorophyll
        .iter()
        .map(|r| r.treatment().clone())
        .collect();
    let response: Vec<f64> = ds
        .chlorophyll
        .iter()
        .map(|r| r.chlorophyll_total())
        .collect();
    let factors: Vec<FactorColumn> = Factor::MODEL_ORDER
        .iter()
        .map(|&f| FactorColumn::from_treatments(&treatments, f))
        .collect();
    c.bench_function("anova_type_ii", |b| {
        b.iter(|| black_box(fit_anova(&response, &factors).unwrap()));
    });
}

fn bench_full_report(c: &mut Criterion) {
    c.bench_function("full_report", |b| {
        b.iter(|| black_box(AnalysisReport::compute().unwrap()));
    });
}

criterion_group!(benches, bench_load, bench_shapiro, bench_anova, bench_full_report);
criterion_main!(benches);
