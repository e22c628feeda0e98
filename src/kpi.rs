//! Scalar KPI aggregation over the pipeline outputs
//!
//! Pure summaries of the test results, the ANOVA decomposition and two
//! direct queries over the source tables: the best-performing treatment and
//! its improvement over the untreated control mean.

use crate::anova::AnovaFit;
use crate::dataset::{ChlorophyllRecord, CombinedRecord, TreatmentCode, Variable};
use crate::error::{Error, Result};
use crate::homogeneity::{VarianceConclusion, VarianceResult};
use crate::normality::{NormalityConclusion, NormalityResult};
use crate::stats;
use serde::{Deserialize, Serialize};

/// Biostimulant code of the untreated control rows.
pub const CONTROL_CODE: &str = "T";

/// Scalar summary indicators for the report's KPI panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Variables concluding Normal
    pub normal_variables: usize,
    /// Variables concluding Homogeneous
    pub homogeneous_variables: usize,
    /// Variables tested (denominator of the two counts above)
    pub total_variables: usize,
    /// ANOVA factors with p < 0.05, residual excluded
    pub significant_factors: usize,
    /// 1 − SS_residual / SS_total, in [0, 1]
    pub variance_explained: f64,
    /// Treatment with the highest total chlorophyll (first occurrence wins ties)
    pub best_treatment: TreatmentCode,
    /// Total chlorophyll of the best treatment
    pub best_chlorophyll_total: f64,
    /// Percent improvement of the best treatment over the control mean
    pub improvement_over_control_pct: f64,
    /// Pearson r between potassium and total chlorophyll on the joined table
    pub potassium_correlation: f64,
}

/// Aggregate the KPI panel from the other components' outputs.
///
/// # Errors
///
/// Returns [`Error::NoControlGroup`] when the chlorophyll table holds no
/// biostimulant-`"T"` rows, [`Error::InvalidInput`] when it is empty, and
/// propagates correlation failures from the joined table.
pub fn compute_kpis(
    normality: &[NormalityResult],
    homogeneity: &[VarianceResult],
    anova: &AnovaFit,
    chlorophyll: &[ChlorophyllRecord],
    combined: &[CombinedRecord],
) -> Result<KpiSummary> {
    let normal_variables = normality
        .iter()
        .filter(|r| r.conclusion == NormalityConclusion::Normal)
        .count();
    let homogeneous_variables = homogeneity
        .iter()
        .filter(|r| r.conclusion == VarianceConclusion::Homogeneous)
        .count();
    let significant_factors = anova
        .table
        .iter()
        .filter(|row| row.p_value.is_some_and(|p| p < 0.05))
        .count();

    let variance_explained = 1.0 - anova.residual_row().sum_sq / anova.total_sum_sq();

    let best = chlorophyll
        .iter()
        .reduce(|best, row| {
            // Strict comparison keeps the first occurrence on ties.
            if row.chlorophyll_total() > best.chlorophyll_total() {
                row
            } else {
                best
            }
        })
        .ok_or_else(|| Error::InvalidInput("empty chlorophyll table".to_string()))?;

    let control: Vec<f64> = chlorophyll
        .iter()
        .filter(|r| r.treatment().biostimulant() == CONTROL_CODE)
        .map(ChlorophyllRecord::chlorophyll_total)
        .collect();
    if control.is_empty() {
        return Err(Error::NoControlGroup {
            code: CONTROL_CODE.to_string(),
        });
    }
    let control_mean = stats::mean(&control);
    let improvement_over_control_pct =
        (best.chlorophyll_total() - control_mean) / control_mean * 100.0;

    let potassium_correlation = stats::pearson(
        &Variable::Potassium.column(combined),
        &Variable::ChlorophyllTotal.column(combined),
    )?;

    let summary = KpiSummary {
        normal_variables,
        homogeneous_variables,
        total_variables: normality.len(),
        significant_factors,
        variance_explained,
        best_treatment: best.treatment().clone(),
        best_chlorophyll_total: best.chlorophyll_total(),
        improvement_over_control_pct,
        potassium_correlation,
    };
    tracing::debug!(?summary, "kpis aggregated");
    Ok(summary)
}
