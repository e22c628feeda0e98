//! Three-factor OLS ANOVA with Type II sum-of-squares decomposition
//!
//! Fits `response ~ C(f1) + C(f2) + C(f3)` with reference-level dummy
//! coding (first sorted level dropped), then attributes variance per factor
//! as SS(factor) = RSS(model without the factor) − RSS(full model). With no
//! interaction terms in the model this is the Type II convention: every
//! main effect is adjusted for the other two.

use crate::dataset::{Factor, TreatmentCode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use std::collections::BTreeSet;

/// One categorical column of the design: a name plus the level label of
/// every observation, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorColumn {
    /// Factor name as it appears in the ANOVA table
    pub name: String,
    /// Per-row level labels
    pub levels: Vec<String>,
}

impl FactorColumn {
    /// Extract one factor's level column from a sequence of treatments.
    #[must_use]
    pub fn from_treatments(treatments: &[TreatmentCode], factor: Factor) -> Self {
        Self {
            name: factor.name().to_string(),
            levels: treatments.iter().map(|t| t.level(factor)).collect(),
        }
    }

    /// Distinct levels in sorted order; the first is the reference level.
    fn distinct_levels(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.levels.iter().map(String::as_str).collect();
        set.into_iter().collect()
    }
}

/// One row of the ANOVA table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaRow {
    /// Factor name, or `"Residual"` for the error row
    pub term: String,
    /// Sum of squares attributed to the term
    pub sum_sq: f64,
    /// Degrees of freedom
    pub df: usize,
    /// F statistic; `None` for the residual row
    pub f_statistic: Option<f64>,
    /// p-value; `None` for the residual row
    pub p_value: Option<f64>,
}

/// A fitted ANOVA: the decomposition table plus per-row fitted values and
/// residuals in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaFit {
    /// Factor rows followed by the residual row
    pub table: Vec<AnovaRow>,
    /// Fitted value per input row
    pub fitted: Vec<f64>,
    /// Raw residual per input row
    pub residuals: Vec<f64>,
}

impl AnovaFit {
    /// The trailing residual row.
    ///
    /// # Panics
    ///
    /// Never: construction always appends the residual row last.
    #[must_use]
    pub fn residual_row(&self) -> &AnovaRow {
        self.table.last().expect("table always has a residual row")
    }

    /// Total sum of squares across all terms.
    #[must_use]
    pub fn total_sum_sq(&self) -> f64 {
        self.table.iter().map(|r| r.sum_sq).sum()
    }
}

/// Fit the additive ANOVA of `response` on the given categorical factors.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] on empty or mismatched columns, and
/// [`Error::SingularDesign`] when the dummy-coded design matrix is
/// rank-deficient or leaves no residual degrees of freedom.
pub fn fit_anova(response: &[f64], factors: &[FactorColumn]) -> Result<AnovaFit> {
    let n = response.len();
    if n == 0 || factors.is_empty() {
        return Err(Error::InvalidInput(
            "ANOVA needs a response column and at least one factor".to_string(),
        ));
    }
    for f in factors {
        if f.levels.len() != n {
            return Err(Error::InvalidInput(format!(
                "factor {} has {} rows, response has {n}",
                f.name,
                f.levels.len()
            )));
        }
    }

    let full = design_matrix(factors, None);
    let full_fit = ols(&full, response)?;

    let factor_dfs: Vec<usize> = factors.iter().map(|f| f.distinct_levels().len() - 1).collect();
    let df_resid = (n - 1).checked_sub(factor_dfs.iter().sum::<usize>()).ok_or_else(|| {
        Error::SingularDesign(format!(
            "{} factor df exceed the {n} observations",
            factor_dfs.iter().sum::<usize>()
        ))
    })?;
    if df_resid == 0 {
        return Err(Error::SingularDesign(
            "no residual degrees of freedom left".to_string(),
        ));
    }

    let mse = full_fit.rss / df_resid as f64;
    let mut table = Vec::with_capacity(factors.len() + 1);
    for (j, factor) in factors.iter().enumerate() {
        // Type II: refit with this factor removed, all others retained.
        let reduced = design_matrix(factors, Some(j));
        let reduced_fit = ols(&reduced, response)?;
        let sum_sq = (reduced_fit.rss - full_fit.rss).max(0.0);
        let df = factor_dfs[j];
        let f_stat = (sum_sq / df as f64) / mse;
        let p = f_survival(f_stat, df as f64, df_resid as f64)?;
        tracing::debug!(factor = %factor.name, sum_sq, df, f_stat, p, "anova term");
        table.push(AnovaRow {
            term: factor.name.clone(),
            sum_sq,
            df,
            f_statistic: Some(f_stat),
            p_value: Some(p),
        });
    }
    table.push(AnovaRow {
        term: "Residual".to_string(),
        sum_sq: full_fit.rss,
        df: df_resid,
        f_statistic: None,
        p_value: None,
    });

    let residuals = response
        .iter()
        .zip(&full_fit.fitted)
        .map(|(y, yhat)| y - yhat)
        .collect();

    Ok(AnovaFit {
        table,
        fitted: full_fit.fitted,
        residuals,
    })
}

/// Dummy-coded design matrix: intercept plus, for every factor except
/// `skip`, one indicator column per non-reference level.
fn design_matrix(factors: &[FactorColumn], skip: Option<usize>) -> Vec<Vec<f64>> {
    let n = factors[0].levels.len();
    let mut rows = vec![vec![1.0]; n];
    for (j, factor) in factors.iter().enumerate() {
        if skip == Some(j) {
            continue;
        }
        let levels = factor.distinct_levels();
        for level in &levels[1..] {
            for (i, row) in rows.iter_mut().enumerate() {
                row.push(if factor.levels[i] == *level { 1.0 } else { 0.0 });
            }
        }
    }
    rows
}

struct OlsFit {
    fitted: Vec<f64>,
    rss: f64,
}

/// Least squares via the normal equations, Gaussian elimination with
/// partial pivoting. The designs here are tiny (at most ~10 columns), so
/// the numerically fancier decompositions buy nothing.
fn ols(design: &[Vec<f64>], response: &[f64]) -> Result<OlsFit> {
    let n = design.len();
    let p = design[0].len();

    // Augmented normal-equation system [X'X | X'y].
    let mut system = vec![vec![0.0; p + 1]; p];
    for (a, row_a) in system.iter_mut().enumerate() {
        for b in 0..p {
            row_a[b] = (0..n).map(|i| design[i][a] * design[i][b]).sum();
        }
        row_a[p] = (0..n).map(|i| design[i][a] * response[i]).sum();
    }

    for col in 0..p {
        let pivot_row = (col..p)
            .max_by(|&r1, &r2| {
                system[r1][col]
                    .abs()
                    .partial_cmp(&system[r2][col].abs())
                    .expect("finite design entries")
            })
            .expect("non-empty column range");
        if system[pivot_row][col].abs() < 1e-9 {
            return Err(Error::SingularDesign(format!(
                "rank-deficient design: pivot {col} vanished"
            )));
        }
        system.swap(col, pivot_row);
        let pivot = system[col].clone();
        for (row, coeffs) in system.iter_mut().enumerate() {
            if row == col {
                continue;
            }
            let ratio = coeffs[col] / pivot[col];
            for c in col..=p {
                coeffs[c] -= ratio * pivot[c];
            }
        }
    }

    let beta: Vec<f64> = (0..p).map(|i| system[i][p] / system[i][i]).collect();
    let fitted: Vec<f64> = design
        .iter()
        .map(|row| row.iter().zip(&beta).map(|(x, b)| x * b).sum())
        .collect();
    let rss = response
        .iter()
        .zip(&fitted)
        .map(|(y, yhat)| (y - yhat).powi(2))
        .sum();
    Ok(OlsFit { fitted, rss })
}

/// Upper-tail probability of an F(df1, df2) variate.
fn f_survival(f_stat: f64, df1: f64, df2: f64) -> Result<f64> {
    let dist = FisherSnedecor::new(df1, df2)
        .map_err(|e| Error::InvalidInput(format!("F({df1}, {df2}) is undefined: {e}")))?;
    Ok((1.0 - dist.cdf(f_stat)).clamp(0.0, 1.0))
}
