//! Standard Definitions
//!
//! A standard is described as plain data and converted into a validated
//! [`BreakpointTable`]. Concentrations are JSON *strings* so that
//! `"35.4"` reaches the engine as exactly 35.4; a JSON number would pass
//! through a binary float on the way.
//!
//! ```json
//! {
//!   "name": "epa",
//!   "description": "US EPA Air Quality Index",
//!   "pollutants": [
//!     {
//!       "pollutant": "pm25",
//!       "unit": "ug/m3",
//!       "precision": 1,
//!       "concentration": [["0.0", "12.0"], ["12.1", "35.4"]],
//!       "aqi": [[0, 50], [51, 100]]
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use aqi_core::{parse_concentration, AqiEngine, BreakpointTable, Decimal, Pollutant};
use serde::{Deserialize, Serialize};

use crate::StandardError;

/// Serialized form of a breakpoint standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardDefinition {
    /// Registry key, e.g. `"epa"`
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Breakpoints per pollutant
    pub pollutants: Vec<PollutantDefinition>,
}

/// Serialized breakpoints of one pollutant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantDefinition {
    /// Pollutant identifier, e.g. `"pm25"` or `"o3_8h"`
    pub pollutant: Pollutant,

    /// Concentration unit the breakpoints are expressed in
    pub unit: String,

    /// Fractional digits kept before lookup
    pub precision: u32,

    /// `[low, high]` concentration pairs as decimal strings
    pub concentration: Vec<[String; 2]>,

    /// `[low, high]` AQI pairs, one per concentration pair
    pub aqi: Vec<[u32; 2]>,
}

impl StandardDefinition {
    /// Parse a definition from JSON text
    pub fn from_json(json: &str) -> Result<Self, StandardError> {
        let definition: Self = serde_json::from_str(json)?;
        definition.check_name()?;
        Ok(definition)
    }

    /// Read and parse a definition file
    pub fn from_path(path: &Path) -> Result<Self, StandardError> {
        let json = fs::read_to_string(path).map_err(|source| StandardError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Loading standard definition from {}", path.display());
        Self::from_json(&json)
    }

    /// Serialize back to pretty JSON
    pub fn to_json(&self) -> Result<String, StandardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the validated breakpoint table
    pub fn to_table(&self) -> Result<BreakpointTable, StandardError> {
        let mut builder = BreakpointTable::builder(&self.name);

        for entry in &self.pollutants {
            let concentration = entry
                .concentration
                .iter()
                .map(|[lo, hi]| {
                    Ok((
                        parse_concentration(entry.pollutant, lo)?,
                        parse_concentration(entry.pollutant, hi)?,
                    ))
                })
                .collect::<Result<Vec<(Decimal, Decimal)>, StandardError>>()?;
            let aqi: Vec<(u32, u32)> = entry.aqi.iter().map(|&[lo, hi]| (lo, hi)).collect();

            builder = builder.pollutant(entry.pollutant, entry.precision, &concentration, &aqi);
        }

        Ok(builder.build()?)
    }

    /// Units keyed by pollutant
    pub fn units(&self) -> BTreeMap<Pollutant, String> {
        self.pollutants
            .iter()
            .map(|p| (p.pollutant, p.unit.clone()))
            .collect()
    }

    fn check_name(&self) -> Result<(), StandardError> {
        let valid = !self.name.is_empty()
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if valid {
            Ok(())
        } else {
            Err(StandardError::InvalidDefinition(format!(
                "standard name '{}' must be non-empty ASCII letters, digits, '-' or '_'",
                self.name
            )))
        }
    }
}

/// A loaded standard: its definition plus a ready engine
#[derive(Debug, Clone)]
pub struct Standard {
    definition: StandardDefinition,
    units: BTreeMap<Pollutant, String>,
    engine: AqiEngine,
}

impl Standard {
    /// Validate a definition and build its engine
    pub fn from_definition(definition: StandardDefinition) -> Result<Self, StandardError> {
        let engine = AqiEngine::new(definition.to_table()?);
        let units = definition.units();
        Ok(Self {
            definition,
            units,
            engine,
        })
    }

    /// Parse JSON text into a ready standard
    pub fn from_json(json: &str) -> Result<Self, StandardError> {
        Self::from_definition(StandardDefinition::from_json(json)?)
    }

    /// Load a standard from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, StandardError> {
        Self::from_definition(StandardDefinition::from_path(path)?)
    }

    /// Registry key
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        &self.definition.description
    }

    /// The source definition
    pub fn definition(&self) -> &StandardDefinition {
        &self.definition
    }

    /// Concentration unit for `pollutant`
    pub fn unit(&self, pollutant: Pollutant) -> Option<&str> {
        self.units.get(&pollutant).map(String::as_str)
    }

    /// The interpolation engine over this standard's table
    pub fn engine(&self) -> &AqiEngine {
        &self.engine
    }
}

impl aqi_core::IndexCalculator for Standard {
    fn intermediate_index(
        &self,
        pollutant: Pollutant,
        concentration: Decimal,
    ) -> aqi_core::AqiResult<aqi_core::Aqi> {
        self.engine.intermediate_index(pollutant, concentration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_core::{AqiError, IndexCalculator, Reading, TableDefect};

    const SMALL: &str = r#"{
        "name": "small",
        "description": "two PM2.5 brackets",
        "pollutants": [
            {
                "pollutant": "pm25",
                "unit": "ug/m3",
                "precision": 1,
                "concentration": [["0.0", "12.0"], ["12.1", "35.4"]],
                "aqi": [[0, 50], [51, 100]]
            }
        ]
    }"#;

    #[test]
    fn parses_and_builds_table() {
        let standard = Standard::from_json(SMALL).unwrap();
        assert_eq!(standard.name(), "small");
        assert_eq!(standard.description(), "two PM2.5 brackets");
        assert_eq!(standard.unit(Pollutant::Pm25), Some("ug/m3"));
        assert_eq!(standard.unit(Pollutant::Pm10), None);

        let bp = standard.engine().table().get(Pollutant::Pm25).unwrap();
        assert_eq!(bp.precision(), 1);
        assert_eq!(bp.max_concentration(), Decimal::new(354, 1));
    }

    #[test]
    fn standard_is_an_index_calculator() {
        let standard = Standard::from_json(SMALL).unwrap();
        let readings = [Reading::parse(Pollutant::Pm25, "35.4").unwrap()];
        assert_eq!(standard.index(&readings).unwrap().value(), 100);
    }

    #[test]
    fn rejects_bad_concentration_text() {
        let json = SMALL.replace("\"12.1\"", "\"twelve\"");
        let err = Standard::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            StandardError::Core(AqiError::InvalidConcentration { pollutant: Pollutant::Pm25, .. })
        ));
    }

    #[test]
    fn rejects_malformed_brackets() {
        let json = SMALL.replace("[[0, 50], [51, 100]]", "[[0, 50]]");
        let err = Standard::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            StandardError::Core(AqiError::Configuration {
                defect: TableDefect::LengthMismatch { concentration: 2, aqi: 1 },
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_pollutant_and_bad_json() {
        let json = SMALL.replace("\"pm25\"", "\"radon\"");
        assert!(matches!(StandardDefinition::from_json(&json), Err(StandardError::Parse(_))));
        assert!(matches!(StandardDefinition::from_json("{"), Err(StandardError::Parse(_))));
    }

    #[test]
    fn rejects_unusable_names() {
        let json = SMALL.replace("\"small\"", "\"has space\"");
        assert!(matches!(
            StandardDefinition::from_json(&json),
            Err(StandardError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn json_round_trip_preserves_definition() {
        let definition = StandardDefinition::from_json(SMALL).unwrap();
        let again = StandardDefinition::from_json(&definition.to_json().unwrap()).unwrap();
        assert_eq!(definition, again);
    }
}
