//! Dataset loading and the treatment-key join
//!
//! The experiment's two measurement tables are compiled-in constants. `load`
//! materializes them as typed records, decomposing each treatment code into
//! its three factor levels, and builds the combined table as the inner
//! equi-join on (variety, biostimulant, radiation).
//!
//! The two tables cover different treatment subsets, so the join drops rows
//! that were measured on only one side. That filtering is intentional: only
//! jointly-measured treatments are analyzable across physiology and
//! nutrition.

mod literals;
mod records;
mod treatment;

pub use records::{ChlorophyllRecord, CombinedRecord, NutrientRecord, Variable};
pub use treatment::{Factor, TreatmentCode};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The three materialized tables of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Chlorophyll measurements, 30 treatments
    pub chlorophyll: Vec<ChlorophyllRecord>,
    /// Leaf-nutrient measurements, 22 treatments
    pub nutrients: Vec<NutrientRecord>,
    /// Inner join on the treatment key, chlorophyll-table row order
    pub combined: Vec<CombinedRecord>,
}

/// Materialize the fixed experimental tables and their join.
///
/// Deterministic: repeated calls return structurally identical tables.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedCode`] if a compiled-in treatment code
/// does not decompose into three tokens with an integer radiation level.
pub fn load() -> Result<Dataset> {
    let chlorophyll: Vec<ChlorophyllRecord> = literals::CHLOROPHYLL
        .iter()
        .map(|&(code, a, b, total)| Ok(ChlorophyllRecord::new(code.parse()?, a, b, total)))
        .collect::<Result<_>>()?;

    let nutrients: Vec<NutrientRecord> = literals::NUTRIENTS
        .iter()
        .map(|&(code, n, p, k, ca, mg)| Ok(NutrientRecord::new(code.parse()?, n, p, k, ca, mg)))
        .collect::<Result<_>>()?;

    let combined = join(&chlorophyll, &nutrients);
    tracing::debug!(
        chlorophyll = chlorophyll.len(),
        nutrients = nutrients.len(),
        combined = combined.len(),
        "datasets loaded"
    );

    Ok(Dataset {
        chlorophyll,
        nutrients,
        combined,
    })
}

/// Inner equi-join on the treatment key, preserving chlorophyll row order.
fn join(chlorophyll: &[ChlorophyllRecord], nutrients: &[NutrientRecord]) -> Vec<CombinedRecord> {
    let by_key: HashMap<(&str, &str, u32), &NutrientRecord> = nutrients
        .iter()
        .map(|rec| (rec.treatment().key(), rec))
        .collect();

    chlorophyll
        .iter()
        .filter_map(|chl| {
            by_key
                .get(&chl.treatment().key())
                .map(|nut| CombinedRecord::from_parts(chl, nut))
        })
        .collect()
}
