//! Full analysis report dump
//!
//! Computes the entire pipeline and prints the JSON document the
//! presentation layer would consume, plus a short human summary.
//!
//! Run with: cargo run --example full_report

use arabica_stats::pipeline::AnalysisReport;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let report = AnalysisReport::compute()?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    eprintln!();
    eprintln!("=== Summary ===");
    eprintln!(
        "combined table: {} of {} chlorophyll / {} nutrient treatments",
        report.dataset.combined.len(),
        report.dataset.chlorophyll.len(),
        report.dataset.nutrients.len(),
    );
    eprintln!(
        "normality: {}/{} variables normal",
        report.kpis.normal_variables, report.kpis.total_variables
    );
    eprintln!(
        "homoscedasticity: {}/{} variables homogeneous",
        report.kpis.homogeneous_variables, report.kpis.total_variables
    );
    eprintln!(
        "ANOVA: {} significant factor(s), {:.1}% variance explained",
        report.kpis.significant_factors,
        report.kpis.variance_explained * 100.0
    );
    eprintln!(
        "best treatment: {} at {:.2} mg/g (+{:.1}% vs control)",
        report.kpis.best_treatment,
        report.kpis.best_chlorophyll_total,
        report.kpis.improvement_over_control_pct
    );
    eprintln!(
        "K vs total chlorophyll: r = {:.2}",
        report.kpis.potassium_correlation
    );

    Ok(())
}
