//! One-call analysis report
//!
//! Runs the whole pipeline in the order the report consumes it: load and
//! join the tables, test assumptions, fit the ANOVA on total chlorophyll,
//! derive residual diagnostics, compute the correlation matrix, aggregate
//! KPIs. The computation is a pure function of the compiled-in data; callers
//! wanting caching wrap this at their own boundary.

use crate::anova::{fit_anova, AnovaFit, FactorColumn};
use crate::dataset::{self, Dataset, Factor, Variable};
use crate::diagnostics::{diagnostics, ResidualDiagnostics};
use crate::error::Result;
use crate::homogeneity::{check_homogeneity, VarianceResult};
use crate::kpi::{compute_kpis, KpiSummary};
use crate::normality::{check_normality, NormalityResult};
use crate::stats::correlation_matrix;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the presentation layer reads, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The three materialized tables
    pub dataset: Dataset,
    /// Shapiro-Wilk results, one per variable in presentation order
    pub normality: Vec<NormalityResult>,
    /// Levene results grouped by radiation level, same order
    pub homogeneity: Vec<VarianceResult>,
    /// Three-factor ANOVA of total chlorophyll over the chlorophyll table
    pub anova: AnovaFit,
    /// Residual diagnostics of that fit
    pub diagnostics: ResidualDiagnostics,
    /// 8×8 correlation matrix over the combined table, [`Variable::ALL`] order
    pub correlations: Vec<Vec<f64>>,
    /// Scalar KPI panel
    pub kpis: KpiSummary,
    /// When this report was computed
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Compute the full report.
    ///
    /// # Errors
    ///
    /// Propagates any precondition failure from the underlying components;
    /// with the compiled-in datasets none occur.
    pub fn compute() -> Result<Self> {
        let span = tracing::info_span!("analysis_report");
        let _guard = span.enter();

        let ds = dataset::load()?;
        let normality = check_normality(&ds.combined, &Variable::ALL)?;
        let homogeneity = check_homogeneity(&ds.combined, &Variable::ALL, Factor::Radiation)?;

        // The ANOVA runs on the chlorophyll table, which covers all three
        // radiation levels; the joined table only spans two.
        let treatments: Vec<_> = ds
            .chlorophyll
            .iter()
            .map(|r| r.treatment().clone())
            .collect();
        let response: Vec<f64> = ds
            .chlorophyll
            .iter()
            .map(dataset::ChlorophyllRecord::chlorophyll_total)
            .collect();
        let factors: Vec<FactorColumn> = Factor::MODEL_ORDER
            .iter()
            .map(|&f| FactorColumn::from_treatments(&treatments, f))
            .collect();
        let anova = fit_anova(&response, &factors)?;
        let diag = diagnostics(&anova.fitted, &anova.residuals)?;

        let correlations = correlation_matrix(&ds.combined, &Variable::ALL)?;
        let kpis = compute_kpis(&normality, &homogeneity, &anova, &ds.chlorophyll, &ds.combined)?;

        tracing::info!(
            rows = ds.combined.len(),
            normal = kpis.normal_variables,
            significant = kpis.significant_factors,
            "report computed"
        );

        Ok(Self {
            dataset: ds,
            normality,
            homogeneity,
            anova,
            diagnostics: diag,
            correlations,
            kpis,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_computes_every_section() {
        let report = AnalysisReport::compute().unwrap();
        assert_eq!(report.normality.len(), 8);
        assert_eq!(report.homogeneity.len(), 8);
        assert_eq!(report.anova.table.len(), 4);
        assert_eq!(report.diagnostics.points.len(), 30);
        assert_eq!(report.correlations.len(), 8);
        assert!(report.generated_at.timestamp() > 0);
    }

    #[test]
    fn test_report_serializes_for_the_presentation_layer() {
        let report = AnalysisReport::compute().unwrap();
        let json = serde_json::to_string(&report).expect("serialization failed");
        let back: AnalysisReport = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(report.kpis, back.kpis);
        assert_eq!(report.anova, back.anova);
    }

    #[test]
    fn test_recomputation_is_deterministic_up_to_timestamp() {
        let a = AnalysisReport::compute().unwrap();
        let b = AnalysisReport::compute().unwrap();
        assert_eq!(a.dataset, b.dataset);
        assert_eq!(a.normality, b.normality);
        assert_eq!(a.homogeneity, b.homogeneity);
        assert_eq!(a.anova, b.anova);
        assert_eq!(a.diagnostics, b.diagnostics);
        assert_eq!(a.kpis, b.kpis);
    }
}
