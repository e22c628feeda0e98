//! Residual diagnostics for the fitted ANOVA
//!
//! Standardizes the model residuals and prepares the two plotting
//! sequences: per-row points in original observation order (residuals vs
//! fitted, residuals vs order) and the sorted QQ pairing against theoretical
//! normal quantiles. The two orderings are distinct outputs and must not be
//! conflated.

use crate::error::{Error, Result};
use crate::stats;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// One observation's diagnostic point, in original row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualPoint {
    /// Fitted value from the model
    pub fitted: f64,
    /// Standardized residual (zero mean, unit sample variance)
    pub standardized: f64,
    /// 1-based position in the original observation sequence
    pub order: usize,
}

/// One QQ-plot point: the i-th theoretical normal quantile paired with the
/// i-th smallest standardized residual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QqPoint {
    /// Φ⁻¹((i − 0.5)/n)
    pub theoretical: f64,
    /// i-th order statistic of the standardized residuals
    pub observed: f64,
}

/// Full diagnostic output for one fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualDiagnostics {
    /// Per-row points, original order
    pub points: Vec<ResidualPoint>,
    /// Sorted QQ pairing, ascending
    pub qq: Vec<QqPoint>,
}

/// Derive standardized residuals, order indices and QQ quantiles from the
/// fitted/residual pairs of an ANOVA fit.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] on mismatched or undersized inputs and
/// [`Error::ZeroVariance`] when all residuals are equal.
pub fn diagnostics(fitted: &[f64], residuals: &[f64]) -> Result<ResidualDiagnostics> {
    if fitted.len() != residuals.len() {
        return Err(Error::InvalidInput(format!(
            "fitted/residual length mismatch: {} vs {}",
            fitted.len(),
            residuals.len()
        )));
    }
    let n = residuals.len();
    if n < 2 {
        return Err(Error::InvalidInput(
            "diagnostics need at least 2 residuals".to_string(),
        ));
    }

    let mean = stats::mean(residuals);
    let sd = stats::sample_std(residuals);
    if sd == 0.0 {
        return Err(Error::ZeroVariance {
            variable: "residuals".to_string(),
        });
    }
    let standardized: Vec<f64> = residuals.iter().map(|r| (r - mean) / sd).collect();

    let points = fitted
        .iter()
        .zip(&standardized)
        .enumerate()
        .map(|(i, (&fitted, &standardized))| ResidualPoint {
            fitted,
            standardized,
            order: i + 1,
        })
        .collect();

    let mut sorted = standardized;
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite residuals"));
    let std_normal = Normal::new(0.0, 1.0).expect("unit normal");
    let qq = sorted
        .iter()
        .enumerate()
        .map(|(i, &observed)| QqPoint {
            theoretical: std_normal.inverse_cdf((i as f64 + 0.5) / n as f64),
            observed,
        })
        .collect();

    Ok(ResidualDiagnostics { points, qq })
}
