//! Treatment codes and design factors
//!
//! A treatment code is the factorial key of the experiment: three
//! dot-separated tokens naming the variety, the biostimulant and the
//! radiation level (`"Co.M.278"`).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One specific combination of factor levels.
///
/// Parsed from the dotted literal form; the variety and biostimulant tokens
/// are kept as opaque short codes (the loader does not validate them against
/// a closed set), the radiation token must parse as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreatmentCode {
    variety: String,
    biostimulant: String,
    radiation: u32,
}

impl TreatmentCode {
    /// Build a code from already-decomposed factor levels.
    #[must_use]
    pub fn new(variety: impl Into<String>, biostimulant: impl Into<String>, radiation: u32) -> Self {
        Self {
            variety: variety.into(),
            biostimulant: biostimulant.into(),
            radiation,
        }
    }

    /// Variety code (e.g. `"Co"`).
    #[must_use]
    pub fn variety(&self) -> &str {
        &self.variety
    }

    /// Biostimulant code (`"T"` is the untreated control).
    #[must_use]
    pub fn biostimulant(&self) -> &str {
        &self.biostimulant
    }

    /// Radiation level in µmol·m⁻²·s⁻¹.
    #[must_use]
    pub const fn radiation(&self) -> u32 {
        self.radiation
    }

    /// The join key: the full (variety, biostimulant, radiation) triple.
    #[must_use]
    pub fn key(&self) -> (&str, &str, u32) {
        (&self.variety, &self.biostimulant, self.radiation)
    }

    /// Level of a given factor, rendered as a string.
    ///
    /// Radiation levels are rendered decimal so they can serve as categorical
    /// labels in group-by and dummy-coding paths.
    #[must_use]
    pub fn level(&self, factor: Factor) -> String {
        match factor {
            Factor::Variety => self.variety.clone(),
            Factor::Biostimulant => self.biostimulant.clone(),
            Factor::Radiation => self.radiation.to_string(),
        }
    }
}

impl FromStr for TreatmentCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split('.').collect();
        if tokens.len() != 3 {
            return Err(Error::MalformedCode {
                code: s.to_string(),
                reason: format!("expected 3 dot-separated tokens, found {}", tokens.len()),
            });
        }
        let radiation: u32 = tokens[2].parse().map_err(|_| Error::MalformedCode {
            code: s.to_string(),
            reason: format!("radiation token {:?} is not an integer", tokens[2]),
        })?;
        Ok(Self::new(tokens[0], tokens[1], radiation))
    }
}

impl fmt::Display for TreatmentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.variety, self.biostimulant, self.radiation)
    }
}

/// A categorical design factor of the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Factor {
    /// Coffee variety
    Variety,
    /// Root biostimulant product
    Biostimulant,
    /// Photosynthetically active radiation level
    Radiation,
}

impl Factor {
    /// The three factors in model order (radiation, biostimulant, variety),
    /// matching the fitted ANOVA formula.
    pub const MODEL_ORDER: [Self; 3] = [Self::Radiation, Self::Biostimulant, Self::Variety];

    /// Human-readable factor name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Variety => "Variety",
            Self::Biostimulant => "Biostimulant",
            Self::Radiation => "Radiation",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let code: TreatmentCode = "Co.M.278".parse().unwrap();
        assert_eq!(code.variety(), "Co");
        assert_eq!(code.biostimulant(), "M");
        assert_eq!(code.radiation(), 278);
        assert_eq!(code.to_string(), "Co.M.278");
    }

    #[test]
    fn test_parse_rejects_wrong_token_count() {
        let err = "Co.M".parse::<TreatmentCode>().unwrap_err();
        assert!(matches!(err, Error::MalformedCode { .. }));
        let err = "Co.M.278.x".parse::<TreatmentCode>().unwrap_err();
        assert!(matches!(err, Error::MalformedCode { .. }));
    }

    #[test]
    fn test_parse_rejects_non_integer_radiation() {
        let err = "Co.M.high".parse::<TreatmentCode>().unwrap_err();
        assert!(matches!(err, Error::MalformedCode { .. }));
    }

    #[test]
    fn test_factor_levels() {
        let code = TreatmentCode::new("Ga", "P", 440);
        assert_eq!(code.level(Factor::Variety), "Ga");
        assert_eq!(code.level(Factor::Biostimulant), "P");
        assert_eq!(code.level(Factor::Radiation), "440");
    }
}
