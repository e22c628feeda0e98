//! # Arabica-Stats: Factorial Experiment Analysis Pipeline
//!
//! Statistical core behind an interactive report on root biostimulation and
//! solar radiation in *Coffea arabica L.* (Aguilar-Luna et al., 2024). The
//! crate loads two fixed measurement tables, joins them on the factorial
//! treatment key and computes everything the report displays:
//!
//! - Shapiro-Wilk normality tests over the eight numeric variables
//! - Levene homoscedasticity tests across radiation levels
//! - A three-factor OLS ANOVA with Type II sum-of-squares decomposition
//! - Residual diagnostics (standardized residuals, QQ quantiles)
//! - Scalar KPIs (significant factors, variance explained, best treatment)
//!
//! Presentation (charts, narrative, layout) is an external consumer; the
//! pipeline is a pure function of its compiled-in inputs.
//!
//! ## Example Usage
//!
//! ```rust
//! use arabica_stats::pipeline::AnalysisReport;
//!
//! let report = AnalysisReport::compute()?;
//! println!(
//!     "{}/{} variables normal, {} significant factors",
//!     report.kpis.normal_variables,
//!     report.kpis.total_variables,
//!     report.kpis.significant_factors,
//! );
//! # Ok::<(), arabica_stats::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod anova;
pub mod dataset;
pub mod diagnostics;
pub mod error;
pub mod homogeneity;
pub mod kpi;
pub mod normality;
pub mod pipeline;
pub mod stats;

pub use error::{Error, Result};
