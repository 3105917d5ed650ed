//! Readings and index values
//!
//! Readings are the unit of input: one pollutant, one exact concentration.
//! They are created per calculation and dropped afterwards.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use alloc::vec::Vec;

use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{AqiError, AqiResult};
use crate::pollutant::Pollutant;

/// Parse concentration text as an exact decimal
///
/// Plain (`35.4`) and scientific (`3.54e1`) notation are accepted. The text
/// never passes through a binary float.
///
/// A `Decimal` holds 28 significant digits. Longer plain text loses its
/// excess fractional digits toward zero, as truncation would, so
/// `12.0999…9` can never become `12.1`.
pub fn parse_concentration(pollutant: Pollutant, text: &str) -> AqiResult<Decimal> {
    let trimmed = text.trim();
    let parsed = if trimmed.contains(['e', 'E']) {
        Decimal::from_scientific(trimmed).ok()
    } else {
        parse_plain(trimmed)
    };

    parsed.ok_or_else(|| AqiError::InvalidConcentration {
        pollutant,
        value: text.to_string(),
    })
}

fn parse_plain(text: &str) -> Option<Decimal> {
    if let Ok(exact) = Decimal::from_str_exact(text) {
        return Some(exact);
    }

    let (whole, fraction) = text.split_once('.')?;
    let digits = whole.strip_prefix(['-', '+']).unwrap_or(whole);
    if fraction.is_empty()
        || !fraction.bytes().all(|b| b.is_ascii_digit())
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    // Longest prefix of the fraction that still fits
    (0..fraction.len()).rev().find_map(|keep| {
        let end = whole.len() + 1 + keep;
        let prefix = if keep == 0 { whole } else { &text[..end] };
        Decimal::from_str_exact(prefix).ok()
    })
}

/// A single pollutant measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// What was measured
    pub pollutant: Pollutant,
    /// Measured concentration, in the unit of the standard's table
    pub concentration: Decimal,
}

impl Reading {
    /// Create a reading from an exact concentration
    pub fn new(pollutant: Pollutant, concentration: Decimal) -> Self {
        Self {
            pollutant,
            concentration,
        }
    }

    /// Create a reading from concentration text
    pub fn parse(pollutant: Pollutant, concentration: &str) -> AqiResult<Self> {
        Ok(Self::new(pollutant, parse_concentration(pollutant, concentration)?))
    }
}

impl FromStr for Reading {
    type Err = AqiError;

    /// Parse `pm25=35.4` (or `pm25:35.4`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pollutant, concentration) = s
            .split_once(['=', ':'])
            .ok_or_else(|| AqiError::InvalidReading(s.to_string()))?;

        Self::parse(pollutant.parse()?, concentration)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.pollutant.id(), self.concentration)
    }
}

/// An integer AQI value (overall or per pollutant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Aqi(u32);

impl Aqi {
    /// Wrap a raw index value
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The index as an integer
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Aqi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Aqi> for u32 {
    fn from(aqi: Aqi) -> Self {
        aqi.0
    }
}

impl From<Aqi> for Decimal {
    fn from(aqi: Aqi) -> Self {
        Decimal::from(aqi.0)
    }
}

/// Intermediate index of one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubIndex {
    /// Pollutant of the reading
    pub pollutant: Pollutant,
    /// Concentration after truncation to the table precision
    pub concentration: Decimal,
    /// The pollutant's iAQI
    pub aqi: Aqi,
}

/// Overall AQI with the sub-indices it was derived from
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assessment {
    /// Maximum of all sub-indices
    pub aqi: Aqi,
    /// First pollutant (in input order) whose sub-index equals `aqi`
    pub dominant: Pollutant,
    /// One entry per reading, in input order
    pub sub_indices: Vec<SubIndex>,
}
