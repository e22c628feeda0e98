//! Shapiro-Wilk normality checks
//!
//! W = (Σ aᵢ·x₍ᵢ₎)² / Σ(xᵢ − x̄)², with coefficients aᵢ derived from the
//! expected order statistics of a standard normal sample. Coefficients and
//! p-value transforms follow Royston's AS R94 formulation, valid for
//! 3 ≤ n ≤ 5000; this pipeline operates far inside that range.

use crate::dataset::{CombinedRecord, Variable};
use crate::error::{Error, Result};
use crate::stats;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Fixed significance level of the report.
pub const ALPHA: f64 = 0.05;

/// Two-valued outcome of a normality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalityConclusion {
    /// p > alpha: normality is not rejected
    Normal,
    /// p <= alpha: normality is rejected
    NotNormal,
}

/// Shapiro-Wilk result for one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    /// Variable under test
    pub variable: Variable,
    /// W statistic, in (0, 1]
    pub statistic: f64,
    /// p-value under H0 (sample is normal)
    pub p_value: f64,
    /// Conclusion at alpha = 0.05
    pub conclusion: NormalityConclusion,
}

/// Run the Shapiro-Wilk test over each requested variable of the combined
/// table, in request order.
///
/// # Errors
///
/// Returns [`Error::InsufficientSample`] when fewer than 3 rows are present
/// and [`Error::ZeroVariance`] when a variable is constant.
pub fn check_normality(
    rows: &[CombinedRecord],
    variables: &[Variable],
) -> Result<Vec<NormalityResult>> {
    variables
        .iter()
        .map(|&variable| {
            let column = variable.column(rows);
            let (statistic, p_value) = shapiro_wilk(&column, variable)?;
            let conclusion = if p_value > ALPHA {
                NormalityConclusion::Normal
            } else {
                NormalityConclusion::NotNormal
            };
            tracing::debug!(%variable, statistic, p_value, ?conclusion, "shapiro-wilk");
            Ok(NormalityResult {
                variable,
                statistic,
                p_value,
                conclusion,
            })
        })
        .collect()
}

/// Shapiro-Wilk W statistic and p-value for one sample.
fn shapiro_wilk(sample: &[f64], variable: Variable) -> Result<(f64, f64)> {
    let n = sample.len();
    if n < 3 {
        return Err(Error::InsufficientSample {
            variable: variable.name().to_string(),
            n,
            required: 3,
        });
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("non-finite measurement"));

    let mean = stats::mean(&sorted);
    let ss: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
    if ss == 0.0 {
        return Err(Error::ZeroVariance {
            variable: variable.name().to_string(),
        });
    }

    let a = royston_coefficients(n);
    let num: f64 = a.iter().zip(&sorted).map(|(ai, xi)| ai * xi).sum();
    let w = (num * num / ss).min(1.0);

    Ok((w, royston_p_value(w, n)))
}

/// Royston's approximation to the Shapiro-Wilk coefficients.
///
/// Blom scores m_i = Phi^-1((i - 3/8)/(n + 1/4)) are rescaled under the
/// order-statistic covariance structure, with polynomial corrections for the
/// outermost one (n <= 5) or two (n > 5) coefficients.
fn royston_coefficients(n: usize) -> Vec<f64> {
    let std_normal = Normal::new(0.0, 1.0).expect("unit normal");
    let nf = n as f64;

    let m: Vec<f64> = (1..=n)
        .map(|i| std_normal.inverse_cdf((i as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let ssm: f64 = m.iter().map(|v| v * v).sum();
    let rsn = 1.0 / nf.sqrt();

    if n == 3 {
        // Exact coefficients for the smallest sample.
        let a1 = std::f64::consts::FRAC_1_SQRT_2;
        return vec![-a1, 0.0, a1];
    }

    let an = -2.706_056 * rsn.powi(5) + 4.434_685 * rsn.powi(4) - 2.071_190 * rsn.powi(3)
        - 0.147_981 * rsn.powi(2)
        + 0.221_157 * rsn
        + m[n - 1] / ssm.sqrt();

    let mut a: Vec<f64>;
    if n > 5 {
        let an1 = -3.582_633 * rsn.powi(5) + 5.682_633 * rsn.powi(4) - 1.752_461 * rsn.powi(3)
            - 0.293_762 * rsn.powi(2)
            + 0.042_981 * rsn
            + m[n - 2] / ssm.sqrt();
        let phi = (ssm - 2.0 * m[n - 1].powi(2) - 2.0 * m[n - 2].powi(2))
            / (1.0 - 2.0 * an.powi(2) - 2.0 * an1.powi(2));
        a = m.iter().map(|v| v / phi.sqrt()).collect();
        a[n - 1] = an;
        a[0] = -an;
        a[n - 2] = an1;
        a[1] = -an1;
    } else {
        let phi = (ssm - 2.0 * m[n - 1].powi(2)) / (1.0 - 2.0 * an.powi(2));
        a = m.iter().map(|v| v / phi.sqrt()).collect();
        a[n - 1] = an;
        a[0] = -an;
    }
    a
}

/// Royston's p-value transforms: exact arcsine form for n = 3, lognormal
/// approximations below and above n = 12.
fn royston_p_value(w: f64, n: usize) -> f64 {
    let std_normal = Normal::new(0.0, 1.0).expect("unit normal");
    let nf = n as f64;

    if n == 3 {
        let p = (6.0 / std::f64::consts::PI) * ((w.sqrt()).asin() - (0.75f64.sqrt()).asin());
        return p.clamp(0.0, 1.0);
    }

    let (z, mu, sigma) = if n <= 11 {
        let gamma = 0.459 * nf - 2.273;
        let arg = gamma - (1.0 - w).ln();
        if arg <= 0.0 {
            // W below the transform's support; as non-normal as it gets.
            return 0.0;
        }
        let w_t = -arg.ln();
        let mu = 0.544 - 0.399_78 * nf + 0.025_054 * nf * nf - 0.000_671_4 * nf.powi(3);
        let sigma = (1.3822 - 0.778_57 * nf + 0.062_767 * nf * nf - 0.002_032_2 * nf.powi(3)).exp();
        (w_t, mu, sigma)
    } else {
        let y = nf.ln();
        let w_t = (1.0 - w).ln();
        let mu = -1.5861 - 0.310_82 * y - 0.083_751 * y * y + 0.003_891_5 * y.powi(3);
        let sigma = (-0.4803 - 0.082_676 * y + 0.003_030_2 * y * y).exp();
        (w_t, mu, sigma)
    };

    (1.0 - std_normal.cdf((z - mu) / sigma)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    #[test]
    fn test_rejects_undersized_sample() {
        let ds = dataset::load().unwrap();
        let err = check_normality(&ds.combined[..2], &[Variable::Nitrogen]).unwrap_err();
        assert!(matches!(err, Error::InsufficientSample { n: 2, .. }));
    }

    #[test]
    fn test_statistic_bounds_on_real_data() {
        let ds = dataset::load().unwrap();
        let results = check_normality(&ds.combined, &Variable::ALL).unwrap();
        assert_eq!(results.len(), 8);
        for r in &results {
            assert!(r.statistic > 0.0 && r.statistic <= 1.0, "{}", r.variable);
            assert!((0.0..=1.0).contains(&r.p_value), "{}", r.variable);
        }
    }

    #[test]
    fn test_results_follow_request_order() {
        let ds = dataset::load().unwrap();
        let order = [Variable::Magnesium, Variable::ChlorophyllA];
        let results = check_normality(&ds.combined, &order).unwrap();
        assert_eq!(results[0].variable, Variable::Magnesium);
        assert_eq!(results[1].variable, Variable::ChlorophyllA);
    }

    #[test]
    fn test_chlorophyll_a_flagged_non_normal() {
        // Regression fixture: on the joined table only chlorophyll a fails
        // the test, matching the published analysis.
        let ds = dataset::load().unwrap();
        let results = check_normality(&ds.combined, &Variable::ALL).unwrap();
        for r in &results {
            let expected = if r.variable == Variable::ChlorophyllA {
                NormalityConclusion::NotNormal
            } else {
                NormalityConclusion::Normal
            };
            assert_eq!(r.conclusion, expected, "{}", r.variable);
        }
        let chl_a = &results[0];
        assert!((chl_a.statistic - 0.8219).abs() < 5e-3);
        assert!((chl_a.p_value - 0.0267).abs() < 5e-3);
    }

    #[test]
    fn test_near_uniform_sample_scores_high_w() {
        // An evenly spaced sample is close to the normal scores ordering,
        // so W should sit near 1 and not be rejected.
        let t = dataset::TreatmentCode::new("Co", "T", 168);
        let rows: Vec<CombinedRecord> = (0..12)
            .map(|i| {
                let v = 1.0 + 0.1 * f64::from(i);
                CombinedRecord::from_parts(
                    &dataset::ChlorophyllRecord::new(t.clone(), v, v, v),
                    &dataset::NutrientRecord::new(t.clone(), v, v, v, v, v),
                )
            })
            .collect();
        let r = &check_normality(&rows, &[Variable::Nitrogen]).unwrap()[0];
        assert!(r.statistic > 0.9);
        assert_eq!(r.conclusion, NormalityConclusion::Normal);
    }

    #[test]
    fn test_constant_sample_is_zero_variance() {
        let t = dataset::TreatmentCode::new("Co", "T", 168);
        let rows: Vec<CombinedRecord> = (0..5)
            .map(|_| {
                CombinedRecord::from_parts(
                    &dataset::ChlorophyllRecord::new(t.clone(), 1.0, 1.0, 2.0),
                    &dataset::NutrientRecord::new(t.clone(), 25.0, 15.0, 18.0, 13.0, 4.0),
                )
            })
            .collect();
        let err = check_normality(&rows, &[Variable::Calcium]).unwrap_err();
        assert!(matches!(err, Error::ZeroVariance { .. }));
    }
}
