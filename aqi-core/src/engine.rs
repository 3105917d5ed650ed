//! Breakpoint Interpolation Engine
//!
//! ## Algorithm
//!
//! For one pollutant and one concentration `C`:
//!
//! ```text
//! 1. C' = truncate(C, precision[pollutant])          round toward zero
//! 2. find the first (C_lo, C_hi) with C_lo <= C' <= C_hi, at index i
//! 3. (I_lo, I_hi) = aqi[pollutant][i]
//! 4. I = (I_hi - I_lo) / (C_hi - C_lo) * (C' - C_lo) + I_lo
//! 5. iAQI = round(I, 0)                               round half to even
//! ```
//!
//! The overall AQI is the maximum iAQI across the readings.
//!
//! ## Decimal Discipline
//!
//! Everything is exact decimal arithmetic. Binary floats would turn `35.4`
//! into `35.39999...` and truncation would then drop a reading into the
//! wrong bracket. The two rounding steps are deliberately different:
//!
//! - the *input* is truncated: a measurement never rounds up into a
//!   worse category
//! - the *output* uses round-half-to-even, as the published calculators do
//!
//! ## Example
//!
//! ```rust
//! use aqi_core::{AqiEngine, BreakpointTable, Decimal, Pollutant, Reading};
//!
//! let table = BreakpointTable::builder("pm-only")
//!     .pollutant(
//!         Pollutant::Pm25,
//!         1,
//!         &[(Decimal::new(0, 1), Decimal::new(120, 1)), (Decimal::new(121, 1), Decimal::new(354, 1))],
//!         &[(0, 50), (51, 100)],
//!     )
//!     .build()?;
//!
//! let engine = AqiEngine::new(table);
//! assert_eq!(engine.intermediate_index_str(Pollutant::Pm25, "12.049")?.value(), 50);
//! assert_eq!(engine.index(&["pm25=35.4".parse::<Reading>()?])?.value(), 100);
//! # Ok::<(), aqi_core::AqiError>(())
//! ```

use alloc::string::ToString;
use alloc::vec::Vec;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::breakpoints::BreakpointTable;
use crate::errors::{AqiError, AqiResult};
use crate::pollutant::Pollutant;
use crate::reading::{parse_concentration, Aqi, Assessment, Reading, SubIndex};
use crate::traits::IndexCalculator;

/// Piecewise-linear AQI calculator over one breakpoint table
///
/// The engine cannot exist without a validated table, so there is no
/// "table not loaded" failure at calculation time. It holds no mutable
/// state and can be shared across threads without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct AqiEngine {
    table: BreakpointTable,
}

impl AqiEngine {
    /// Create an engine over a validated table
    pub fn new(table: BreakpointTable) -> Self {
        log_debug!(
            "AQI engine ready: table '{}' with {} pollutants",
            table.name(),
            table.pollutants().count()
        );
        Self { table }
    }

    /// The table this engine interpolates over
    pub fn table(&self) -> &BreakpointTable {
        &self.table
    }

    /// iAQI of one reading, together with the truncated concentration used
    pub fn sub_index(&self, pollutant: Pollutant, concentration: Decimal) -> AqiResult<SubIndex> {
        let breakpoints = self
            .table
            .get(pollutant)
            .ok_or_else(|| AqiError::UnsupportedPollutant {
                pollutant,
                table: self.table.name().to_string(),
            })?;

        let truncated = breakpoints.truncate(concentration);
        let out_of_range = || AqiError::OutOfRange {
            pollutant,
            concentration: truncated,
            min: breakpoints.min_concentration(),
            max: breakpoints.max_concentration(),
        };

        let (_, bracket) = breakpoints.locate(truncated).ok_or_else(|| {
            log_warn!("{} concentration {} outside every bracket", pollutant, truncated);
            out_of_range()
        })?;

        let aqi = bracket
            .interpolate(truncated)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_u32()
            .map(Aqi::new)
            .ok_or_else(out_of_range)?;

        log_debug!("{} {} -> iAQI {}", pollutant, truncated, aqi);

        Ok(SubIndex {
            pollutant,
            concentration: truncated,
            aqi,
        })
    }

    /// iAQI of one pollutant concentration
    pub fn intermediate_index(&self, pollutant: Pollutant, concentration: Decimal) -> AqiResult<Aqi> {
        self.sub_index(pollutant, concentration).map(|s| s.aqi)
    }

    /// iAQI of a concentration given as text
    pub fn intermediate_index_str(&self, pollutant: Pollutant, concentration: &str) -> AqiResult<Aqi> {
        self.intermediate_index(pollutant, parse_concentration(pollutant, concentration)?)
    }

    /// Overall AQI: the maximum iAQI over `readings`
    pub fn index(&self, readings: &[Reading]) -> AqiResult<Aqi> {
        IndexCalculator::index(self, readings)
    }

    /// Overall AQI plus every sub-index and the dominant pollutant
    pub fn assess(&self, readings: &[Reading]) -> AqiResult<Assessment> {
        let sub_indices = readings
            .iter()
            .map(|r| self.sub_index(r.pollutant, r.concentration))
            .collect::<AqiResult<Vec<_>>>()?;

        // Keep the first reading on ties, so the dominant pollutant follows input order
        let worst = sub_indices
            .iter()
            .fold(None::<&SubIndex>, |worst, s| match worst {
                Some(w) if w.aqi >= s.aqi => Some(w),
                _ => Some(s),
            })
            .ok_or(AqiError::EmptyInput)?;

        Ok(Assessment {
            aqi: worst.aqi,
            dominant: worst.pollutant,
            sub_indices,
        })
    }
}

impl IndexCalculator for AqiEngine {
    fn intermediate_index(&self, pollutant: Pollutant, concentration: Decimal) -> AqiResult<Aqi> {
        AqiEngine::intermediate_index(self, pollutant, concentration)
    }
}
