//! Error types for arabica-stats
//!
//! Every failure is a data-shape precondition violation or a numerical edge
//! case; inputs are constant, so none of these are retryable.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// arabica-stats error types
#[derive(Error, Debug)]
pub enum Error {
    /// Treatment code does not have the `Variety.Biostimulant.Radiation` shape
    #[error("malformed treatment code {code:?}: {reason}")]
    MalformedCode {
        /// The offending code literal
        code: String,
        /// What was wrong with it
        reason: String,
    },

    /// Too few observations for the requested test
    #[error("insufficient sample for {variable}: n = {n}, need at least {required}")]
    InsufficientSample {
        /// Variable under test
        variable: String,
        /// Observations available
        n: usize,
        /// Minimum the test supports
        required: usize,
    },

    /// Too few usable groups for a between-group variance test
    #[error("insufficient groups for {variable}: {usable} group(s) with >= 2 observations, need at least 2")]
    InsufficientGroups {
        /// Variable under test
        variable: String,
        /// Groups holding at least two observations
        usable: usize,
    },

    /// Design matrix is rank-deficient (e.g. a factor level with zero rows)
    #[error("singular design matrix: {0}")]
    SingularDesign(String),

    /// All observations identical; the test statistic is undefined
    #[error("zero variance in {variable}: statistic is undefined")]
    ZeroVariance {
        /// Variable under test
        variable: String,
    },

    /// No rows carry the control biostimulant code
    #[error("no control group: no rows with biostimulant code {code:?}")]
    NoControlGroup {
        /// Control code that was looked for
        code: String,
    },

    /// Caller passed structurally invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
