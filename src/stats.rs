//! Shared descriptive-statistics kernels
//!
//! Small numeric helpers used by every test module: sample moments with
//! ddof = 1, medians, Pearson correlation, and the per-group five-number
//! summaries the exploratory charts consume.

use crate::dataset::{CombinedRecord, Factor, Variable};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arithmetic mean. Zero for an empty slice is never returned; callers
/// guarantee non-empty input.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with ddof = 1.
#[must_use]
pub fn sample_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Sample standard deviation with ddof = 1.
#[must_use]
pub fn sample_std(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Median of a sample (average of the two central order statistics for
/// even n).
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("non-finite measurement"));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Pearson correlation coefficient between two equal-length columns.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] on length mismatch or fewer than two
/// observations, [`Error::ZeroVariance`] if either column is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::InvalidInput(format!(
            "column lengths differ: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(Error::InvalidInput(
            "correlation needs at least 2 observations".to_string(),
        ));
    }
    let (mx, my) = (mean(x), mean(y));
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for i in 0..x.len() {
        let (dx, dy) = (x[i] - mx, y[i] - my);
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return Err(Error::ZeroVariance {
            variable: "correlation input".to_string(),
        });
    }
    Ok(cov / (vx * vy).sqrt())
}

/// Full correlation matrix over the requested variables of the combined
/// table, in variable order. Symmetric with unit diagonal.
///
/// # Errors
///
/// Propagates [`pearson`] failures (constant columns, too few rows).
pub fn correlation_matrix(rows: &[CombinedRecord], variables: &[Variable]) -> Result<Vec<Vec<f64>>> {
    let columns: Vec<Vec<f64>> = variables.iter().map(|v| v.column(rows)).collect();
    let mut matrix = vec![vec![1.0; variables.len()]; variables.len()];
    for i in 0..variables.len() {
        for j in (i + 1)..variables.len() {
            let r = pearson(&columns[i], &columns[j])?;
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    Ok(matrix)
}

/// Five-number summary (plus mean and count) of one variable within one
/// factor level, the shape the boxplot layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Factor level this group belongs to
    pub level: String,
    /// Observations in the group
    pub n: usize,
    /// Minimum
    pub min: f64,
    /// First quartile (midpoint interpolation)
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Maximum
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
}

/// Describe one variable of the combined table per level of a factor,
/// levels in lexicographic order.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an empty table.
pub fn describe(
    rows: &[CombinedRecord],
    variable: Variable,
    grouping: Factor,
) -> Result<Vec<GroupSummary>> {
    if rows.is_empty() {
        return Err(Error::InvalidInput("empty table".to_string()));
    }
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in rows {
        groups
            .entry(row.treatment().level(grouping))
            .or_default()
            .push(row.value(variable));
    }
    Ok(groups
        .into_iter()
        .map(|(level, mut values)| {
            values.sort_by(|a, b| a.partial_cmp(b).expect("non-finite measurement"));
            GroupSummary {
                n: values.len(),
                min: values[0],
                q1: quartile(&values, 0.25),
                median: median(&values),
                q3: quartile(&values, 0.75),
                max: values[values.len() - 1],
                mean: mean(&values),
                level,
            }
        })
        .collect())
}

/// Linear-interpolation quantile over a pre-sorted sample.
fn quartile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&xs) - 5.0).abs() < 1e-12);
        assert!((sample_variance(&xs) - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < 1e-12);
        assert!((median(&[4.0, 1.0, 3.0, 2.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        let neg: Vec<f64> = y.iter().map(|v| -v).collect();
        assert!((pearson(&x, &neg).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_rejects_constant_column() {
        let err = pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::ZeroVariance { .. }));
    }

    #[test]
    fn test_correlation_matrix_is_symmetric() {
        let rows = crate::dataset::load().unwrap().combined;
        let m = correlation_matrix(&rows, &Variable::ALL).unwrap();
        for i in 0..8 {
            assert!((m[i][i] - 1.0).abs() < 1e-12);
            for j in 0..8 {
                assert!((m[i][j] - m[j][i]).abs() < 1e-12);
                assert!(m[i][j] >= -1.0 - 1e-12 && m[i][j] <= 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn test_describe_groups_by_radiation() {
        let rows = crate::dataset::load().unwrap().combined;
        let summaries = describe(&rows, Variable::ChlorophyllTotal, Factor::Radiation).unwrap();
        // Combined table spans radiation levels 168 and 278 only.
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].level, "168");
        assert_eq!(summaries[1].level, "278");
        assert_eq!(summaries.iter().map(|s| s.n).sum::<usize>(), rows.len());
        for s in &summaries {
            assert!(s.min <= s.q1 && s.q1 <= s.median && s.median <= s.q3 && s.q3 <= s.max);
        }
    }
}
