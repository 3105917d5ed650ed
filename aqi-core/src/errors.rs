//! Error Types for AQI Calculation Failures
//!
//! ## Design Philosophy
//!
//! An AQI is an advisory number people act on. A wrong number is worse than
//! no number, so every failure is surfaced to the caller as soon as it is
//! detected:
//!
//! 1. **No Fallbacks**: there is no clamped, saturated or partial result.
//!    A reading above the last breakpoint is an error, not "500".
//!
//! 2. **No Retries**: the computation is deterministic, retrying the same
//!    inputs changes nothing.
//!
//! 3. **Actionable Information**: each variant carries the pollutant and
//!    concentration involved, so a CLI or API layer can tell the user which
//!    reading was rejected and why.
//!
//! ## Error Categories
//!
//! ### Configuration
//! - `Configuration`: a breakpoint table is malformed. Raised while the
//!   table is built, never during a calculation.
//!
//! ### Lookup
//! - `UnsupportedPollutant`: the table has no breakpoints for the pollutant
//! - `OutOfRange`: the truncated concentration falls outside every bracket
//!
//! ### Input
//! - `EmptyInput`: aggregation over zero readings
//! - `InvalidConcentration`: text that is not an exact decimal number
//! - `UnknownPollutant`: text that names no known pollutant
//! - `InvalidReading`: text not shaped like `pm25=35.4`
//!
//! ## Handling Strategy
//!
//! ```rust
//! use aqi_core::{AqiError, AqiEngine, Pollutant};
//!
//! fn report(engine: &AqiEngine, value: &str) {
//!     match engine.intermediate_index_str(Pollutant::Pm25, value) {
//!         Ok(aqi) => println!("PM2.5 sub-index: {}", aqi),
//!         Err(AqiError::OutOfRange { .. }) => {
//!             // Reading beyond the standard's scale - flag the sensor
//!         }
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! ```

use alloc::string::String;

use rust_decimal::Decimal;
use thiserror_no_std::Error;

use crate::pollutant::Pollutant;

/// Result type for AQI operations
pub type AqiResult<T> = Result<T, AqiError>;

/// Reasons a breakpoint table is rejected at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDefect {
    /// Concentration and AQI bracket lists differ in length
    LengthMismatch {
        /// Number of concentration brackets
        concentration: usize,
        /// Number of AQI brackets
        aqi: usize,
    },
    /// A pollutant was declared with no brackets at all
    NoBrackets,
    /// A concentration bracket whose low end is not below its high end
    InvertedConcentration {
        /// Position of the offending bracket
        index: usize,
    },
    /// An AQI bracket whose low end is above its high end
    InvertedAqi {
        /// Position of the offending bracket
        index: usize,
    },
    /// Bracket `index` starts below the high end of the previous one
    Overlap {
        /// Position of the offending bracket
        index: usize,
    },
    /// AQI brackets must not decrease from one bracket to the next
    DescendingAqi {
        /// Position of the offending bracket
        index: usize,
    },
    /// More fractional digits than an exact decimal can hold
    PrecisionTooLarge {
        /// Requested precision
        precision: u32,
    },
    /// The same pollutant was declared twice
    DuplicatePollutant,
    /// A table with no pollutants cannot compute anything
    EmptyTable,
}

impl core::fmt::Display for TableDefect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LengthMismatch { concentration, aqi } => write!(
                f,
                "{} concentration brackets but {} AQI brackets",
                concentration, aqi
            ),
            Self::NoBrackets => write!(f, "no brackets defined"),
            Self::InvertedConcentration { index } => {
                write!(f, "concentration bracket {} has low >= high", index)
            }
            Self::InvertedAqi { index } => write!(f, "AQI bracket {} has low > high", index),
            Self::Overlap { index } => {
                write!(f, "concentration bracket {} overlaps the previous bracket", index)
            }
            Self::DescendingAqi { index } => {
                write!(f, "AQI bracket {} starts below the previous bracket", index)
            }
            Self::PrecisionTooLarge { precision } => {
                write!(f, "precision {} exceeds 28 fractional digits", precision)
            }
            Self::DuplicatePollutant => write!(f, "pollutant declared more than once"),
            Self::EmptyTable => write!(f, "table defines no pollutants"),
        }
    }
}

/// AQI calculation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AqiError {
    /// Breakpoint table is malformed
    #[error("Invalid breakpoint table for {}: {defect}", pollutant_label(.pollutant))]
    Configuration {
        /// Pollutant whose breakpoints are malformed, if the defect is local to one
        pollutant: Option<Pollutant>,
        /// What is wrong with the table
        defect: TableDefect,
    },

    /// Table has no breakpoints for the pollutant
    #[error("Pollutant {pollutant} is not supported by the {table} table")]
    UnsupportedPollutant {
        /// The requested pollutant
        pollutant: Pollutant,
        /// Name of the table that was consulted
        table: String,
    },

    /// Truncated concentration is outside every bracket
    #[error("Concentration {concentration} of {pollutant} is outside the breakpoint range [{min}, {max}]")]
    OutOfRange {
        /// The pollutant being looked up
        pollutant: Pollutant,
        /// The concentration after truncation
        concentration: Decimal,
        /// Lowest concentration the table defines
        min: Decimal,
        /// Highest concentration the table defines
        max: Decimal,
    },

    /// Aggregation requested over zero readings
    #[error("Cannot compute an AQI from zero readings")]
    EmptyInput,

    /// Concentration text is not an exact decimal
    #[error("Invalid concentration '{value}' for {pollutant}")]
    InvalidConcentration {
        /// The pollutant the value was supplied for
        pollutant: Pollutant,
        /// The rejected text
        value: String,
    },

    /// Text that names no known pollutant
    #[error("Unknown pollutant '{0}'")]
    UnknownPollutant(String),

    /// Reading text not of the form `pollutant=concentration`
    #[error("Invalid reading '{0}', expected <pollutant>=<concentration>")]
    InvalidReading(String),
}

fn pollutant_label(pollutant: &Option<Pollutant>) -> &'static str {
    match pollutant {
        Some(p) => p.name(),
        None => "table",
    }
}

impl AqiError {
    pub(crate) fn config(pollutant: Pollutant, defect: TableDefect) -> Self {
        Self::Configuration {
            pollutant: Some(pollutant),
            defect,
        }
    }

    /// Pollutant involved in the failure, when there is one
    pub fn pollutant(&self) -> Option<Pollutant> {
        match self {
            Self::Configuration { pollutant, .. } => *pollutant,
            Self::UnsupportedPollutant { pollutant, .. }
            | Self::OutOfRange { pollutant, .. }
            | Self::InvalidConcentration { pollutant, .. } => Some(*pollutant),
            Self::EmptyInput | Self::UnknownPollutant(_) | Self::InvalidReading(_) => None,
        }
    }
}
