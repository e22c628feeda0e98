//! Typed records for the two source tables and their join

use super::treatment::TreatmentCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the chlorophyll table: pigment concentrations in mg·g⁻¹ of
/// fresh matter for a single treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChlorophyllRecord {
    treatment: TreatmentCode,
    chlorophyll_a: f64,
    chlorophyll_b: f64,
    chlorophyll_total: f64,
}

impl ChlorophyllRecord {
    /// Create a record. Total is taken as measured, not recomputed from a+b.
    #[must_use]
    pub const fn new(treatment: TreatmentCode, a: f64, b: f64, total: f64) -> Self {
        Self {
            treatment,
            chlorophyll_a: a,
            chlorophyll_b: b,
            chlorophyll_total: total,
        }
    }

    /// Treatment this row was measured under.
    #[must_use]
    pub const fn treatment(&self) -> &TreatmentCode {
        &self.treatment
    }

    /// Chlorophyll *a* concentration.
    #[must_use]
    pub const fn chlorophyll_a(&self) -> f64 {
        self.chlorophyll_a
    }

    /// Chlorophyll *b* concentration.
    #[must_use]
    pub const fn chlorophyll_b(&self) -> f64 {
        self.chlorophyll_b
    }

    /// Total chlorophyll concentration.
    #[must_use]
    pub const fn chlorophyll_total(&self) -> f64 {
        self.chlorophyll_total
    }
}

/// One row of the leaf-nutrient table: mineral concentrations in g·kg⁻¹ of
/// dry matter for a single treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientRecord {
    treatment: TreatmentCode,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    calcium: f64,
    magnesium: f64,
}

impl NutrientRecord {
    /// Create a record.
    #[must_use]
    pub const fn new(
        treatment: TreatmentCode,
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        calcium: f64,
        magnesium: f64,
    ) -> Self {
        Self {
            treatment,
            nitrogen,
            phosphorus,
            potassium,
            calcium,
            magnesium,
        }
    }

    /// Treatment this row was measured under.
    #[must_use]
    pub const fn treatment(&self) -> &TreatmentCode {
        &self.treatment
    }

    /// Foliar nitrogen.
    #[must_use]
    pub const fn nitrogen(&self) -> f64 {
        self.nitrogen
    }

    /// Foliar phosphorus.
    #[must_use]
    pub const fn phosphorus(&self) -> f64 {
        self.phosphorus
    }

    /// Foliar potassium.
    #[must_use]
    pub const fn potassium(&self) -> f64 {
        self.potassium
    }

    /// Foliar calcium.
    #[must_use]
    pub const fn calcium(&self) -> f64 {
        self.calcium
    }

    /// Foliar magnesium.
    #[must_use]
    pub const fn magnesium(&self) -> f64 {
        self.magnesium
    }
}

/// The natural-key join of a chlorophyll row and a nutrient row measured
/// under the same (variety, biostimulant, radiation) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRecord {
    treatment: TreatmentCode,
    chlorophyll_a: f64,
    chlorophyll_b: f64,
    chlorophyll_total: f64,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    calcium: f64,
    magnesium: f64,
}

impl CombinedRecord {
    /// Join two rows that share a treatment key.
    #[must_use]
    pub fn from_parts(chl: &ChlorophyllRecord, nut: &NutrientRecord) -> Self {
        debug_assert_eq!(chl.treatment().key(), nut.treatment().key());
        Self {
            treatment: chl.treatment().clone(),
            chlorophyll_a: chl.chlorophyll_a(),
            chlorophyll_b: chl.chlorophyll_b(),
            chlorophyll_total: chl.chlorophyll_total(),
            nitrogen: nut.nitrogen(),
            phosphorus: nut.phosphorus(),
            potassium: nut.potassium(),
            calcium: nut.calcium(),
            magnesium: nut.magnesium(),
        }
    }

    /// Treatment this row was measured under.
    #[must_use]
    pub const fn treatment(&self) -> &TreatmentCode {
        &self.treatment
    }

    /// Typed access to one of the eight numeric variables.
    #[must_use]
    pub const fn value(&self, variable: Variable) -> f64 {
        match variable {
            Variable::ChlorophyllA => self.chlorophyll_a,
            Variable::ChlorophyllB => self.chlorophyll_b,
            Variable::ChlorophyllTotal => self.chlorophyll_total,
            Variable::Nitrogen => self.nitrogen,
            Variable::Phosphorus => self.phosphorus,
            Variable::Potassium => self.potassium,
            Variable::Calcium => self.calcium,
            Variable::Magnesium => self.magnesium,
        }
    }
}

/// The eight numeric variables of the combined table, in the enumeration
/// order the report presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// Chlorophyll *a* pigment
    ChlorophyllA,
    /// Chlorophyll *b* pigment
    ChlorophyllB,
    /// Total chlorophyll
    ChlorophyllTotal,
    /// Foliar nitrogen
    Nitrogen,
    /// Foliar phosphorus
    Phosphorus,
    /// Foliar potassium
    Potassium,
    /// Foliar calcium
    Calcium,
    /// Foliar magnesium
    Magnesium,
}

impl Variable {
    /// All eight variables in presentation order.
    pub const ALL: [Self; 8] = [
        Self::ChlorophyllA,
        Self::ChlorophyllB,
        Self::ChlorophyllTotal,
        Self::Nitrogen,
        Self::Phosphorus,
        Self::Potassium,
        Self::Calcium,
        Self::Magnesium,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ChlorophyllA => "Chlorophyll a",
            Self::ChlorophyllB => "Chlorophyll b",
            Self::ChlorophyllTotal => "Chlorophyll total",
            Self::Nitrogen => "Nitrogen",
            Self::Phosphorus => "Phosphorus",
            Self::Potassium => "Potassium",
            Self::Calcium => "Calcium",
            Self::Magnesium => "Magnesium",
        }
    }

    /// Extract this variable from every row, preserving row order.
    #[must_use]
    pub fn column(self, rows: &[CombinedRecord]) -> Vec<f64> {
        rows.iter().map(|r| r.value(self)).collect()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
