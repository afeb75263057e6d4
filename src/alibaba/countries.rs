//! Proxy countries supported by the rendering service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic origin of the renderer's outbound proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Ae,
    Br,
    Cn,
    De,
    Es,
    Fr,
    Gb,
    Hk,
    In,
    It,
    Il,
    Jp,
    Nl,
    Ru,
    Sa,
    #[default]
    Us,
}

impl Country {
    /// Returns the lower-cased two-letter code sent to the renderer.
    pub fn code(&self) -> &'static str {
        match self {
            Country::Ae => "ae",
            Country::Br => "br",
            Country::Cn => "cn",
            Country::De => "de",
            Country::Es => "es",
            Country::Fr => "fr",
            Country::Gb => "gb",
            Country::Hk => "hk",
            Country::In => "in",
            Country::It => "it",
            Country::Il => "il",
            Country::Jp => "jp",
            Country::Nl => "nl",
            Country::Ru => "ru",
            Country::Sa => "sa",
            Country::Us => "us",
        }
    }

    /// Returns a human-readable country name.
    pub fn name(&self) -> &'static str {
        match self {
            Country::Ae => "United Arab Emirates",
            Country::Br => "Brazil",
            Country::Cn => "China",
            Country::De => "Germany",
            Country::Es => "Spain",
            Country::Fr => "France",
            Country::Gb => "United Kingdom",
            Country::Hk => "Hong Kong",
            Country::In => "India",
            Country::It => "Italy",
            Country::Il => "Israel",
            Country::Jp => "Japan",
            Country::Nl => "Netherlands",
            Country::Ru => "Russia",
            Country::Sa => "Saudi Arabia",
            Country::Us => "United States",
        }
    }

    /// Returns all supported countries.
    pub fn all() -> &'static [Country] {
        &[
            Country::Ae,
            Country::Br,
            Country::Cn,
            Country::De,
            Country::Es,
            Country::Fr,
            Country::Gb,
            Country::Hk,
            Country::In,
            Country::It,
            Country::Il,
            Country::Jp,
            Country::Nl,
            Country::Ru,
            Country::Sa,
            Country::Us,
        ]
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = CountryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Country::all()
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| CountryParseError(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct CountryParseError(String);

impl fmt::Display for CountryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<&str> = Country::all().iter().map(|c| c.code()).collect();
        write!(f, "Unknown country '{}'. Valid countries: {}", self.0, valid.join(", "))
    }
}

impl std::error::Error for CountryParseError {}
