//! Breakpoint Tables
//!
//! ## Table Shape
//!
//! A standard (US EPA, China MEP, ...) is nothing more than data. For every
//! pollutant it defines:
//!
//! ```text
//! precision      fractional digits kept before lookup (truncated, never rounded)
//! concentration  [(C_lo, C_hi), ...]  closed intervals, ascending
//! aqi            [(I_lo, I_hi), ...]  same length, same order
//! ```
//!
//! The i-th concentration bracket maps linearly onto the i-th AQI bracket:
//!
//! ```text
//! PM2.5 (EPA)     0.0 - 12.0   ->    0 -  50
//!                12.1 - 35.4   ->   51 - 100
//!                35.5 - 55.4   ->  101 - 150
//!                         ...
//! ```
//!
//! ## Validation
//!
//! Tables are validated once, when built, so the engine never has to check
//! table shape while computing. A table is rejected when:
//!
//! - bracket lists differ in length or are empty
//! - a concentration bracket has `C_lo >= C_hi` (it could not be interpolated)
//! - an AQI bracket has `I_lo > I_hi`
//! - brackets overlap or are out of order (`C_lo[i] < C_hi[i-1]`)
//! - AQI brackets step backwards (`I_lo[i] < I_hi[i-1]`)
//!
//! A bracket may start exactly where the previous one ends (`0 - 50`,
//! `50 - 150`); a value on that shared edge belongs to the lower bracket.
//!
//! Gaps between brackets are allowed. Standards publish brackets at their
//! own precision (`12.0` then `12.1`), so the space between two brackets is
//! unreachable after truncation. A value that lands in a gap of a
//! hand-written table is reported as out of range.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::{AqiError, AqiResult, TableDefect};
use crate::pollutant::Pollutant;

/// Largest scale an exact decimal supports
pub const MAX_PRECISION: u32 = 28;

/// One concentration bracket and the AQI bracket it maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    /// Lowest concentration in the bracket (inclusive)
    pub concentration_low: Decimal,
    /// Highest concentration in the bracket (inclusive)
    pub concentration_high: Decimal,
    /// AQI at `concentration_low`
    pub aqi_low: u32,
    /// AQI at `concentration_high`
    pub aqi_high: u32,
}

impl Breakpoint {
    /// Whether `concentration` lies in this closed bracket
    pub fn contains(&self, concentration: Decimal) -> bool {
        self.concentration_low <= concentration && concentration <= self.concentration_high
    }

    /// Linear interpolation of `concentration` onto the AQI bracket, unrounded
    ///
    /// `(I_hi - I_lo) / (C_hi - C_lo) * (C - C_lo) + I_lo`, evaluated in
    /// exactly that order. Validation guarantees `C_hi > C_lo`.
    pub fn interpolate(&self, concentration: Decimal) -> Decimal {
        let aqi_span = Decimal::from(self.aqi_high) - Decimal::from(self.aqi_low);
        let concentration_span = self.concentration_high - self.concentration_low;

        aqi_span / concentration_span * (concentration - self.concentration_low)
            + Decimal::from(self.aqi_low)
    }
}

/// Breakpoints of a single pollutant
#[derive(Debug, Clone, PartialEq)]
pub struct PollutantBreakpoints {
    pollutant: Pollutant,
    precision: u32,
    brackets: Vec<Breakpoint>,
}

impl PollutantBreakpoints {
    /// Build and validate breakpoints from parallel bracket lists
    pub fn new(
        pollutant: Pollutant,
        precision: u32,
        concentration: &[(Decimal, Decimal)],
        aqi: &[(u32, u32)],
    ) -> AqiResult<Self> {
        if precision > MAX_PRECISION {
            return Err(AqiError::config(
                pollutant,
                TableDefect::PrecisionTooLarge { precision },
            ));
        }

        if concentration.len() != aqi.len() {
            return Err(AqiError::config(
                pollutant,
                TableDefect::LengthMismatch {
                    concentration: concentration.len(),
                    aqi: aqi.len(),
                },
            ));
        }

        if concentration.is_empty() {
            return Err(AqiError::config(pollutant, TableDefect::NoBrackets));
        }

        let mut brackets: Vec<Breakpoint> = Vec::with_capacity(concentration.len());
        for (index, (&(c_lo, c_hi), &(i_lo, i_hi))) in concentration.iter().zip(aqi).enumerate() {
            if c_lo >= c_hi {
                return Err(AqiError::config(
                    pollutant,
                    TableDefect::InvertedConcentration { index },
                ));
            }
            if i_lo > i_hi {
                return Err(AqiError::config(pollutant, TableDefect::InvertedAqi { index }));
            }

            if let Some(previous) = brackets.last() {
                if c_lo < previous.concentration_high {
                    return Err(AqiError::config(pollutant, TableDefect::Overlap { index }));
                }
                if i_lo < previous.aqi_high {
                    return Err(AqiError::config(
                        pollutant,
                        TableDefect::DescendingAqi { index },
                    ));
                }
            }

            brackets.push(Breakpoint {
                concentration_low: c_lo,
                concentration_high: c_hi,
                aqi_low: i_lo,
                aqi_high: i_hi,
            });
        }

        Ok(Self {
            pollutant,
            precision,
            brackets,
        })
    }

    /// The pollutant these breakpoints belong to
    pub fn pollutant(&self) -> Pollutant {
        self.pollutant
    }

    /// Fractional digits kept before lookup
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Brackets in ascending order
    pub fn brackets(&self) -> &[Breakpoint] {
        &self.brackets
    }

    /// Lowest concentration covered
    pub fn min_concentration(&self) -> Decimal {
        self.brackets[0].concentration_low
    }

    /// Highest concentration covered
    pub fn max_concentration(&self) -> Decimal {
        self.brackets[self.brackets.len() - 1].concentration_high
    }

    /// Highest AQI these breakpoints can produce
    pub fn max_aqi(&self) -> u32 {
        self.brackets[self.brackets.len() - 1].aqi_high
    }

    /// Truncate toward zero to the table precision
    ///
    /// A measurement is never rounded up into a higher bracket:
    /// `12.049` at precision 1 becomes `12.0`.
    pub fn truncate(&self, concentration: Decimal) -> Decimal {
        let truncated = concentration.round_dp_with_strategy(self.precision, RoundingStrategy::ToZero);
        // -0.05 truncates to a signed zero
        if truncated.is_zero() {
            truncated.abs()
        } else {
            truncated
        }
    }

    /// First bracket containing `concentration`, scanning upwards
    pub fn locate(&self, concentration: Decimal) -> Option<(usize, &Breakpoint)> {
        self.brackets
            .iter()
            .enumerate()
            .find(|(_, bracket)| bracket.contains(concentration))
    }
}

/// Breakpoints for every pollutant of one standard
///
/// Immutable once built. Share it freely: lookups never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    name: String,
    entries: BTreeMap<Pollutant, PollutantBreakpoints>,
}

impl BreakpointTable {
    /// Start building a table
    pub fn builder(name: &str) -> TableBuilder {
        TableBuilder::new(name)
    }

    /// Table name, e.g. `"epa"`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Breakpoints for `pollutant`, if the table defines them
    pub fn get(&self, pollutant: Pollutant) -> Option<&PollutantBreakpoints> {
        self.entries.get(&pollutant)
    }

    /// Whether the table defines breakpoints for `pollutant`
    pub fn supports(&self, pollutant: Pollutant) -> bool {
        self.entries.contains_key(&pollutant)
    }

    /// Supported pollutants in identifier order
    pub fn pollutants(&self) -> impl Iterator<Item = Pollutant> + '_ {
        self.entries.keys().copied()
    }

    /// All per-pollutant breakpoints
    pub fn iter(&self) -> impl Iterator<Item = &PollutantBreakpoints> + '_ {
        self.entries.values()
    }
}

/// Builder for [`BreakpointTable`]
///
/// The first invalid pollutant is remembered and reported by `build()`, so
/// declarations can be chained without intermediate `?`.
pub struct TableBuilder {
    name: String,
    entries: Vec<PollutantBreakpoints>,
    error: Option<AqiError>,
}

impl TableBuilder {
    /// Create a builder for a named table
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
            error: None,
        }
    }

    /// Declare breakpoints from parallel bracket lists
    pub fn pollutant(
        mut self,
        pollutant: Pollutant,
        precision: u32,
        concentration: &[(Decimal, Decimal)],
        aqi: &[(u32, u32)],
    ) -> Self {
        if self.error.is_none() {
            match PollutantBreakpoints::new(pollutant, precision, concentration, aqi) {
                Ok(entry) => self.entries.push(entry),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Add already-validated breakpoints
    pub fn breakpoints(mut self, entry: PollutantBreakpoints) -> Self {
        self.entries.push(entry);
        self
    }

    /// Build the table, reporting the first defect found
    pub fn build(self) -> AqiResult<BreakpointTable> {
        if let Some(error) = self.error {
            return Err(error);
        }

        if self.entries.is_empty() {
            return Err(AqiError::Configuration {
                pollutant: None,
                defect: TableDefect::EmptyTable,
            });
        }

        let mut entries = BTreeMap::new();
        for entry in self.entries {
            let pollutant = entry.pollutant();
            if entries.insert(pollutant, entry).is_some() {
                return Err(AqiError::config(pollutant, TableDefect::DuplicatePollutant));
            }
        }

        Ok(BreakpointTable {
            name: self.name,
            entries,
        })
    }
}
