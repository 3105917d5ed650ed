//! Shared fixtures for aqi-core integration tests
//!
//! Tables here are written out in code rather than loaded from a standard,
//! so the core is tested without depending on `aqi-standards`.

#![allow(dead_code)]

use aqi_core::{AqiEngine, BreakpointTable, Decimal, Pollutant};

/// Standard AQI brackets shared by the full-scale pollutants
pub const AQI_BRACKETS: [(u32, u32); 7] = [
    (0, 50),
    (51, 100),
    (101, 150),
    (151, 200),
    (201, 300),
    (301, 400),
    (401, 500),
];

/// Parse a decimal literal; fixtures only
pub fn dec(text: &str) -> Decimal {
    text.parse().expect("fixture decimal")
}

fn brackets(pairs: &[(&str, &str)]) -> Vec<(Decimal, Decimal)> {
    pairs.iter().map(|(lo, hi)| (dec(lo), dec(hi))).collect()
}

/// EPA-style table with PM2.5, PM10 and 8-hour ozone
pub fn epa_like_table() -> BreakpointTable {
    BreakpointTable::builder("epa-like")
        .pollutant(
            Pollutant::Pm25,
            1,
            &brackets(&[
                ("0.0", "12.0"),
                ("12.1", "35.4"),
                ("35.5", "55.4"),
                ("55.5", "150.4"),
                ("150.5", "250.4"),
                ("250.5", "350.4"),
                ("350.5", "500.4"),
            ]),
            &AQI_BRACKETS,
        )
        .pollutant(
            Pollutant::Pm10,
            0,
            &brackets(&[
                ("0", "54"),
                ("55", "154"),
                ("155", "254"),
                ("255", "354"),
                ("355", "424"),
                ("425", "504"),
                ("505", "604"),
            ]),
            &AQI_BRACKETS,
        )
        .pollutant(
            Pollutant::O3EightHour,
            3,
            &brackets(&[
                ("0.000", "0.054"),
                ("0.055", "0.070"),
                ("0.071", "0.085"),
                ("0.086", "0.105"),
                ("0.106", "0.200"),
            ]),
            &AQI_BRACKETS[..5],
        )
        .build()
        .expect("fixture table is well formed")
}

pub fn epa_like_engine() -> AqiEngine {
    AqiEngine::new(epa_like_table())
}

/// Smallest step at a pollutant's precision, e.g. 0.1 for precision 1
pub fn step(precision: u32) -> Decimal {
    Decimal::new(1, precision)
}
