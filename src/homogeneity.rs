//! Levene variance-homogeneity checks
//!
//! Median-centered Levene statistic (the Brown-Forsythe variant):
//! Z_ij = |X_ij − median(group i)|, then
//! W = (N−k)/(k−1) · Σ nᵢ(Z̄ᵢ − Z̄)² / ΣΣ(Z_ij − Z̄ᵢ)²,
//! referred to an F(k−1, N−k) distribution.

use crate::dataset::{CombinedRecord, Factor, Variable};
use crate::error::{Error, Result};
use crate::normality::ALPHA;
use crate::stats;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use std::collections::BTreeMap;

/// Two-valued outcome of a homoscedasticity test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarianceConclusion {
    /// p > alpha: equal variances are not rejected
    Homogeneous,
    /// p <= alpha: group variances differ
    Different,
}

/// Levene result for one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceResult {
    /// Variable under test
    pub variable: Variable,
    /// Levene W statistic
    pub statistic: f64,
    /// p-value under H0 (equal group variances)
    pub p_value: f64,
    /// Conclusion at alpha = 0.05
    pub conclusion: VarianceConclusion,
}

/// Run Levene's test for each requested variable, grouping the combined
/// table's rows by the given factor. Results follow request order.
///
/// # Errors
///
/// Returns [`Error::InsufficientGroups`] when fewer than two factor levels
/// hold at least two observations, and [`Error::ZeroVariance`] when every
/// observation sits on its group median.
pub fn check_homogeneity(
    rows: &[CombinedRecord],
    variables: &[Variable],
    grouping: Factor,
) -> Result<Vec<VarianceResult>> {
    variables
        .iter()
        .map(|&variable| {
            let groups = partition(rows, variable, grouping);
            let (statistic, p_value) = levene(&groups, variable)?;
            let conclusion = if p_value > ALPHA {
                VarianceConclusion::Homogeneous
            } else {
                VarianceConclusion::Different
            };
            tracing::debug!(%variable, %grouping, statistic, p_value, ?conclusion, "levene");
            Ok(VarianceResult {
                variable,
                statistic,
                p_value,
                conclusion,
            })
        })
        .collect()
}

/// Split one variable's column by factor level, levels in sorted order.
fn partition(rows: &[CombinedRecord], variable: Variable, grouping: Factor) -> Vec<Vec<f64>> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in rows {
        groups
            .entry(row.treatment().level(grouping))
            .or_default()
            .push(row.value(variable));
    }
    groups.into_values().collect()
}

/// Median-centered Levene statistic and its F p-value.
fn levene(groups: &[Vec<f64>], variable: Variable) -> Result<(f64, f64)> {
    let usable = groups.iter().filter(|g| g.len() >= 2).count();
    if usable < 2 {
        return Err(Error::InsufficientGroups {
            variable: variable.name().to_string(),
            usable,
        });
    }

    let k = groups.len();
    let n_total: usize = groups.iter().map(Vec::len).sum();

    // Absolute deviations from each group's median.
    let z: Vec<Vec<f64>> = groups
        .iter()
        .map(|g| {
            let med = stats::median(g);
            g.iter().map(|x| (x - med).abs()).collect()
        })
        .collect();

    let group_means: Vec<f64> = z.iter().map(|zi| stats::mean(zi)).collect();
    let grand_mean = z.iter().flatten().sum::<f64>() / n_total as f64;

    let between: f64 = z
        .iter()
        .zip(&group_means)
        .map(|(zi, zbar)| zi.len() as f64 * (zbar - grand_mean).powi(2))
        .sum();
    let within: f64 = z
        .iter()
        .zip(&group_means)
        .map(|(zi, zbar)| zi.iter().map(|v| (v - zbar).powi(2)).sum::<f64>())
        .sum();
    if within == 0.0 {
        return Err(Error::ZeroVariance {
            variable: variable.name().to_string(),
        });
    }

    let df1 = (k - 1) as f64;
    let df2 = (n_total - k) as f64;
    let w = (df2 / df1) * between / within;

    let f_dist = FisherSnedecor::new(df1, df2)
        .map_err(|e| Error::InvalidInput(format!("F({df1}, {df2}) is undefined: {e}")))?;
    let p = (1.0 - f_dist.cdf(w)).clamp(0.0, 1.0);
    Ok((w, p))
}
