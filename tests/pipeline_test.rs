//! End-to-end pipeline scenarios
//!
//! Exercises the public surface the way the report layer consumes it:
//! load -> assumption tests -> ANOVA -> diagnostics -> KPIs, asserting the
//! documented regression fixtures of the published analysis.

use arabica_stats::anova::{fit_anova, FactorColumn};
use arabica_stats::dataset::{self, Factor, Variable};
use arabica_stats::diagnostics::diagnostics;
use arabica_stats::homogeneity::{check_homogeneity, VarianceConclusion};
use arabica_stats::kpi::compute_kpis;
use arabica_stats::normality::{check_normality, NormalityConclusion};
use arabica_stats::pipeline::AnalysisReport;

// =============================================================================
// Scenario 1: load + join
// =============================================================================

#[test]
fn scenario_join_produces_intersection_table() {
    let ds = dataset::load().expect("load failed");

    assert_eq!(ds.chlorophyll.len(), 30);
    assert_eq!(ds.nutrients.len(), 22);
    // Only treatments measured on both sides survive.
    assert_eq!(ds.combined.len(), 10);
    assert!(ds.combined.len() <= ds.chlorophyll.len().min(ds.nutrients.len()));

    // First joined row in chlorophyll-table order, both sides carried over.
    let first = &ds.combined[0];
    assert_eq!(first.treatment().to_string(), "Co.A.168");
    assert!((first.value(Variable::ChlorophyllA) - 1.63).abs() < 1e-12);
    assert!((first.value(Variable::Nitrogen) - 25.87).abs() < 1e-12);
}

// =============================================================================
// Scenario 2: normality over the joined table
// =============================================================================

#[test]
fn scenario_only_chlorophyll_a_fails_normality() {
    let ds = dataset::load().expect("load failed");
    let results = check_normality(&ds.combined, &Variable::ALL).expect("shapiro failed");

    let not_normal: Vec<_> = results
        .iter()
        .filter(|r| r.conclusion == NormalityConclusion::NotNormal)
        .map(|r| r.variable)
        .collect();
    assert_eq!(not_normal, vec![Variable::ChlorophyllA]);

    for r in &results {
        assert!(r.statistic > 0.0 && r.statistic <= 1.0);
        assert!((0.0..=1.0).contains(&r.p_value));
    }
}

// =============================================================================
// Scenario 3: ANOVA on total chlorophyll
// =============================================================================

#[test]
fn scenario_anova_decomposes_total_chlorophyll() {
    let ds = dataset::load().expect("load failed");
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

    let fit = fit_anova(&response, &factors).expect("anova failed");

    // Three factor rows plus one residual row.
    assert_eq!(fit.table.len(), 4);
    assert_eq!(fit.table[3].term, "Residual");
    for row in &fit.table {
        assert!(row.sum_sq >= 0.0);
        if let Some(p) = row.p_value {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    // df identity: sum of factor df plus residual df = N - 1.
    let df_sum: usize = fit.table.iter().map(|r| r.df).sum();
    assert_eq!(df_sum, response.len() - 1);

    // Diagnostics: standardized residuals have mean 0, sd 1.
    let diag = diagnostics(&fit.fitted, &fit.residuals).expect("diagnostics failed");
    let std: Vec<f64> = diag.points.iter().map(|p| p.standardized).collect();
    let mean = std.iter().sum::<f64>() / std.len() as f64;
    let var = std.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (std.len() - 1) as f64;
    assert!(mean.abs() < 1e-10);
    assert!((var - 1.0).abs() < 1e-10);
}

// =============================================================================
// Scenario 4: KPI tie-break
// =============================================================================

#[test]
fn scenario_best_treatment_kpi_takes_first_of_ties() {
    let ds = dataset::load().expect("load failed");

    // The maximum 3.08 occurs twice (Co.P.440, then Ma.P.440).
    let ties: Vec<_> = ds
        .chlorophyll
        .iter()
        .filter(|r| (r.chlorophyll_total() - 3.08).abs() < 1e-12)
        .map(|r| r.treatment().to_string())
        .collect();
    assert_eq!(ties, vec!["Co.P.440".to_string(), "Ma.P.440".to_string()]);

    let report = AnalysisReport::compute().expect("pipeline failed");
    assert_eq!(report.kpis.best_treatment.to_string(), "Co.P.440");
    assert!((report.kpis.best_chlorophyll_total - 3.08).abs() < 1e-12);
}

// =============================================================================
// Full report consistency
// =============================================================================

#[test]
fn full_report_sections_agree_with_each_other() {
    let report = AnalysisReport::compute().expect("pipeline failed");

    let normal = report
        .normality
        .iter()
        .filter(|r| r.conclusion == NormalityConclusion::Normal)
        .count();
    assert_eq!(report.kpis.normal_variables, normal);

    let homogeneous = report
        .homogeneity
        .iter()
        .filter(|r| r.conclusion == VarianceConclusion::Homogeneous)
        .count();
    assert_eq!(report.kpis.homogeneous_variables, homogeneous);

    let expected = 1.0 - report.anova.residual_row().sum_sq / report.anova.total_sum_sq();
    assert!((report.kpis.variance_explained - expected).abs() < 1e-12);
    assert!((0.0..=1.0).contains(&report.kpis.variance_explained));

    // KPI aggregation is a pure function of its inputs.
    let recomputed = compute_kpis(
        &report.normality,
        &report.homogeneity,
        &report.anova,
        &report.dataset.chlorophyll,
        &report.dataset.combined,
    )
    .expect("kpi recomputation failed");
    assert_eq!(recomputed, report.kpis);
}

#[test]
fn homogeneity_matches_published_analysis() {
    let ds = dataset::load().expect("load failed");
    let results =
        check_homogeneity(&ds.combined, &Variable::ALL, Factor::Radiation).expect("levene failed");

    let different: Vec<_> = results
        .iter()
        .filter(|r| r.conclusion == VarianceConclusion::Different)
        .map(|r| r.variable)
        .collect();
    assert_eq!(different, vec![Variable::ChlorophyllA]);
}
