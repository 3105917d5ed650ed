//! Pollutant identifiers
//!
//! A pollutant is an opaque lookup key into a breakpoint table. The averaging
//! period is part of the identity: ozone averaged over one hour and over
//! eight hours use different breakpoints, so they are different keys.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::AqiError;

/// Pollutants covered by the EPA and MEP breakpoint tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pollutant {
    /// Fine particulate matter, 24-hour average
    #[cfg_attr(feature = "serde", serde(rename = "pm25", alias = "pm2.5"))]
    Pm25,
    /// Coarse particulate matter, 24-hour average
    #[cfg_attr(feature = "serde", serde(rename = "pm10"))]
    Pm10,
    /// Ozone, 1-hour average
    #[cfg_attr(feature = "serde", serde(rename = "o3_1h"))]
    O3OneHour,
    /// Ozone, 8-hour average
    #[cfg_attr(feature = "serde", serde(rename = "o3_8h"))]
    O3EightHour,
    /// Carbon monoxide, 1-hour average
    #[cfg_attr(feature = "serde", serde(rename = "co_1h"))]
    CoOneHour,
    /// Carbon monoxide, 8-hour average
    #[cfg_attr(feature = "serde", serde(rename = "co_8h"))]
    CoEightHour,
    /// Carbon monoxide, 24-hour average
    #[cfg_attr(feature = "serde", serde(rename = "co_24h"))]
    CoDaily,
    /// Sulfur dioxide, 1-hour average
    #[cfg_attr(feature = "serde", serde(rename = "so2_1h"))]
    So2OneHour,
    /// Sulfur dioxide, 24-hour average
    #[cfg_attr(feature = "serde", serde(rename = "so2_24h"))]
    So2Daily,
    /// Nitrogen dioxide, 1-hour average
    #[cfg_attr(feature = "serde", serde(rename = "no2_1h"))]
    No2OneHour,
    /// Nitrogen dioxide, 24-hour average
    #[cfg_attr(feature = "serde", serde(rename = "no2_24h"))]
    No2Daily,
}

impl Pollutant {
    /// Every known pollutant, in identifier order
    pub const ALL: [Pollutant; 11] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::O3OneHour,
        Pollutant::O3EightHour,
        Pollutant::CoOneHour,
        Pollutant::CoEightHour,
        Pollutant::CoDaily,
        Pollutant::So2OneHour,
        Pollutant::So2Daily,
        Pollutant::No2OneHour,
        Pollutant::No2Daily,
    ];

    /// Stable machine identifier, used on the command line and in JSON
    pub const fn id(self) -> &'static str {
        match self {
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
            Self::O3OneHour => "o3_1h",
            Self::O3EightHour => "o3_8h",
            Self::CoOneHour => "co_1h",
            Self::CoEightHour => "co_8h",
            Self::CoDaily => "co_24h",
            Self::So2OneHour => "so2_1h",
            Self::So2Daily => "so2_24h",
            Self::No2OneHour => "no2_1h",
            Self::No2Daily => "no2_24h",
        }
    }

    /// Conventional display name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::O3OneHour => "O3 (1h)",
            Self::O3EightHour => "O3 (8h)",
            Self::CoOneHour => "CO (1h)",
            Self::CoEightHour => "CO (8h)",
            Self::CoDaily => "CO (24h)",
            Self::So2OneHour => "SO2 (1h)",
            Self::So2Daily => "SO2 (24h)",
            Self::No2OneHour => "NO2 (1h)",
            Self::No2Daily => "NO2 (24h)",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pollutant {
    type Err = AqiError;

    /// Parse an identifier such as `pm25` or `o3_8h`, ignoring case.
    /// `pm2.5` and `pm2_5` are accepted for fine particulates.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.eq_ignore_ascii_case("pm2.5") || key.eq_ignore_ascii_case("pm2_5") {
            return Ok(Self::Pm25);
        }

        Self::ALL
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(key))
            .ok_or_else(|| AqiError::UnknownPollutant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip_through_from_str() {
        for pollutant in Pollutant::ALL {
            assert_eq!(pollutant.id().parse::<Pollutant>().unwrap(), pollutant);
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(" O3_8H ".parse::<Pollutant>().unwrap(), Pollutant::O3EightHour);
        assert_eq!("PM2.5".parse::<Pollutant>().unwrap(), Pollutant::Pm25);
        assert_eq!("pm2_5".parse::<Pollutant>().unwrap(), Pollutant::Pm25);
    }

    #[test]
    fn unknown_pollutant_is_rejected() {
        let err = "radon".parse::<Pollutant>().unwrap_err();
        assert_eq!(err, AqiError::UnknownPollutant("radon".into()));
    }

    #[test]
    fn averaging_period_is_part_of_identity() {
        assert!("o3".parse::<Pollutant>().is_err());
        assert_ne!(Pollutant::CoOneHour, Pollutant::CoEightHour);
    }
}
