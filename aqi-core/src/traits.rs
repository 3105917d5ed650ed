//! Core traits for index calculators
//!
//! One algorithm, many tables: standards differ only in data, so there is a
//! single concrete engine. The trait is the seam for things that *own* an
//! engine (a named standard, a registry entry) and want to be used
//! interchangeably with it.

use rust_decimal::Decimal;

use crate::errors::{AqiError, AqiResult};
use crate::pollutant::Pollutant;
use crate::reading::{Aqi, Reading};

/// Anything that can turn readings into AQI values
pub trait IndexCalculator {
    /// iAQI of a single pollutant concentration
    fn intermediate_index(&self, pollutant: Pollutant, concentration: Decimal) -> AqiResult<Aqi>;

    /// Overall AQI: the maximum iAQI over `readings`
    ///
    /// Fails on the first reading that fails, and on an empty slice. A
    /// partial maximum could understate a real hazard.
    fn index(&self, readings: &[Reading]) -> AqiResult<Aqi> {
        let mut worst: Option<Aqi> = None;
        for reading in readings {
            let aqi = self.intermediate_index(reading.pollutant, reading.concentration)?;
            worst = Some(worst.map_or(aqi, |w| w.max(aqi)));
        }
        worst.ok_or(AqiError::EmptyInput)
    }
}

impl<T: IndexCalculator + ?Sized> IndexCalculator for &T {
    fn intermediate_index(&self, pollutant: Pollutant, concentration: Decimal) -> AqiResult<Aqi> {
        (**self).intermediate_index(pollutant, concentration)
    }

    fn index(&self, readings: &[Reading]) -> AqiResult<Aqi> {
        (**self).index(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reports the concentration's integer part as the index
    struct Identity;

    impl IndexCalculator for Identity {
        fn intermediate_index(&self, pollutant: Pollutant, concentration: Decimal) -> AqiResult<Aqi> {
            if concentration.is_sign_negative() {
                return Err(AqiError::OutOfRange {
                    pollutant,
                    concentration,
                    min: Decimal::ZERO,
                    max: Decimal::MAX,
                });
            }
            Ok(Aqi::new(concentration.trunc().mantissa() as u32))
        }
    }

    #[test]
    fn index_is_maximum() {
        let readings = [
            Reading::new(Pollutant::Pm25, Decimal::new(42, 0)),
            Reading::new(Pollutant::Pm10, Decimal::new(85, 0)),
            Reading::new(Pollutant::No2OneHour, Decimal::new(17, 0)),
        ];
        assert_eq!(Identity.index(&readings), Ok(Aqi::new(85)));
    }

    #[test]
    fn index_of_nothing_is_an_error() {
        assert_eq!(Identity.index(&[]), Err(AqiError::EmptyInput));
    }

    #[test]
    fn any_failure_fails_the_whole_index() {
        let readings = [
            Reading::new(Pollutant::Pm25, Decimal::new(300, 0)),
            Reading::new(Pollutant::Pm10, Decimal::new(-1, 0)),
        ];
        assert!(matches!(
            Identity.index(&readings),
            Err(AqiError::OutOfRange { pollutant: Pollutant::Pm10, .. })
        ));
    }

    #[test]
    fn references_are_calculators() {
        let calculator = &Identity;
        let reading = [Reading::new(Pollutant::Pm25, Decimal::new(9, 0))];
        assert_eq!(IndexCalculator::index(&calculator, &reading), Ok(Aqi::new(9)));
    }
}
