//! AQI breakpoint standards
//!
//! The core engine is table-agnostic; this crate supplies the tables. A
//! standard is a named JSON document listing, per pollutant, its unit, the
//! number of fractional digits kept before lookup, and the concentration
//! and AQI brackets.
//!
//! Two standards are built in:
//!
//! | id    | authority | notes                                          |
//! |-------|-----------|------------------------------------------------|
//! | `epa` | US EPA    | 2012 PM2.5 breakpoints, 2015 ozone standard    |
//! | `mep` | China MEP | HJ 633-2012                                    |
//!
//! Custom standards load from any JSON file in the same format (see
//! [`definition`]) and are validated as strictly as the built-in ones.
//!
//! ## Usage Example
//!
//! ```rust
//! use aqi_standards::{StandardRegistry, GLOBAL_REGISTRY};
//! use aqi_core::{Pollutant, Reading};
//!
//! let epa = GLOBAL_REGISTRY.get("epa")?;
//! let readings = [
//!     Reading::parse(Pollutant::Pm25, "35.4")?,
//!     Reading::parse(Pollutant::Pm10, "155")?,
//! ];
//! assert_eq!(epa.engine().index(&readings)?.value(), 101);
//!
//! // Private registries work the same way
//! let registry = StandardRegistry::with_defaults()?;
//! assert!(registry.contains("mep"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use aqi_core::{Aqi, AqiError, Pollutant, Reading};

pub mod builtin;
pub mod definition;
pub mod registry;

pub use builtin::Builtin;
pub use definition::{PollutantDefinition, Standard, StandardDefinition};
pub use registry::{StandardRegistry, GLOBAL_REGISTRY};

/// Standard-related errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum StandardError {
    #[error("Failed to parse standard: {0}")]
    Parse(String),

    #[error("Standard not found: {0}")]
    NotFound(String),

    #[error("Invalid standard definition: {0}")]
    InvalidDefinition(String),

    #[error("Standard already registered: {0}")]
    Duplicate(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] AqiError),

    #[error("Standard registry lock poisoned")]
    Poisoned,
}

impl From<serde_json::Error> for StandardError {
    fn from(e: serde_json::Error) -> Self {
        StandardError::Parse(e.to_string())
    }
}

/// iAQI of one concentration under a globally registered standard
pub fn to_iaqi(standard: &str, pollutant: Pollutant, concentration: &str) -> Result<Aqi, StandardError> {
    let standard = GLOBAL_REGISTRY.get(standard)?;
    Ok(standard.engine().intermediate_index_str(pollutant, concentration)?)
}

/// Overall AQI of textual readings under a globally registered standard
pub fn to_aqi(standard: &str, readings: &[(Pollutant, &str)]) -> Result<Aqi, StandardError> {
    let standard = GLOBAL_REGISTRY.get(standard)?;
    let readings = readings
        .iter()
        .map(|&(pollutant, text)| Reading::parse(pollutant, text))
        .collect::<Result<Vec<_>, AqiError>>()?;
    Ok(standard.engine().index(&readings)?)
}
