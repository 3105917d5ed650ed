//! Core AQI engine
//!
//! Turns pollutant concentrations into Air Quality Index values with the
//! piecewise-linear breakpoint method used by the US EPA, China MEP and
//! similar standards.
//!
//! The crate knows the *shape* of a breakpoint table, never its contents:
//! which standard is in force is a configuration decision made by the
//! caller (see the `aqi-standards` crate for the built-in ones).
//!
//! Key properties:
//! - Exact decimal arithmetic, no binary floats anywhere in the hot path
//! - Input truncated toward zero, output rounded half-to-even
//! - Pure functions over an immutable table: no I/O, no locks, no state
//!
//! ```no_run
//! use aqi_core::{AqiEngine, BreakpointTable, Pollutant, Reading};
//!
//! fn overall(table: BreakpointTable) -> Result<u32, aqi_core::AqiError> {
//!     let engine = AqiEngine::new(table);
//!     let readings = [
//!         "pm25=35.4".parse::<Reading>()?,
//!         Reading::parse(Pollutant::Pm10, "91")?,
//!     ];
//!     Ok(engine.index(&readings)?.value())
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod breakpoints;
pub mod engine;
pub mod errors;
pub mod pollutant;
pub mod reading;
pub mod traits;

// Public API
pub use breakpoints::{Breakpoint, BreakpointTable, PollutantBreakpoints, TableBuilder};
pub use engine::AqiEngine;
pub use errors::{AqiError, AqiResult, TableDefect};
pub use pollutant::Pollutant;
pub use reading::{parse_concentration, Aqi, Assessment, Reading, SubIndex};
pub use traits::IndexCalculator;

/// Re-exported so callers can build tables without naming the dependency
pub use rust_decimal::Decimal;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
