//! Built-in standards
//!
//! Breakpoints ship as JSON under `standards/` and are embedded at compile
//! time, so the same files serve as documentation, as templates for custom
//! tables, and as the source of the built-in engines.

use core::fmt;
use core::str::FromStr;

use include_dir::{include_dir, Dir};

use crate::definition::{Standard, StandardDefinition};
use crate::StandardError;

static STANDARDS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/standards");

/// Standards compiled into the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// US EPA AQI (2012 PM2.5, 2015 ozone breakpoints)
    Epa,
    /// China MEP AQI (HJ 633-2012)
    Mep,
}

impl Builtin {
    /// Every built-in standard
    pub const ALL: [Builtin; 2] = [Builtin::Epa, Builtin::Mep];

    /// Registry key
    pub const fn id(self) -> &'static str {
        match self {
            Builtin::Epa => "epa",
            Builtin::Mep => "mep",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Builtin::Epa => "epa.json",
            Builtin::Mep => "mep.json",
        }
    }

    /// Raw JSON of the embedded definition
    pub fn json(self) -> Result<&'static str, StandardError> {
        STANDARDS_DIR
            .get_file(self.file_name())
            .and_then(|file| file.contents_utf8())
            .ok_or_else(|| StandardError::NotFound(self.file_name().to_string()))
    }

    /// Parsed definition
    pub fn definition(self) -> Result<StandardDefinition, StandardError> {
        StandardDefinition::from_json(self.json()?)
    }

    /// Validated standard with its engine
    pub fn load(self) -> Result<Standard, StandardError> {
        Standard::from_definition(self.definition()?)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Builtin {
    type Err = StandardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Builtin::ALL
            .into_iter()
            .find(|b| b.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StandardError::NotFound(s.to_string()))
    }
}
