use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{AsRefStr, EnumIter, EnumString};
use thiserror::Error;

#[cfg(feature = "database")]
use sea_orm::Value;

lazy_static! {
    // `[0-9]` rather than `\d`, which would also accept non-ASCII digits
    static ref SEASON_CODE: Regex = Regex::new(r"^[0-9]{4}(01|02|03)$").unwrap();
}

/// Errors produced while validating a season code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeasonCodeError {
    /// No season was provided at all
    #[error("Please select a season.")]
    Missing,
    /// The value is not four digits followed by `01`, `02` or `03`
    #[error("Invalid season code: {0:?}")]
    Malformed(String),
}

/// The academic term within a year, encoded as the last two digits of a season code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr)]
pub enum Term {
    #[strum(serialize = "01")]
    Spring,
    #[strum(serialize = "02")]
    Summer,
    #[strum(serialize = "03")]
    Fall,
}

impl Term {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year(pub u16);

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:04}", self.0)
    }
}

/// A validated season identifier such as `202301` (year followed by term)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeasonCode {
    pub year: Year,
    pub term: Term,
}

impl SeasonCode {
    pub fn new(year: Year, term: Term) -> Self {
        Self { year, term }
    }
}

impl FromStr for SeasonCode {
    type Err = SeasonCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !SEASON_CODE.is_match(s) {
            return Err(SeasonCodeError::Malformed(s.to_owned()));
        }

        // The regex guarantees six ASCII characters
        let (year, term) = s.split_at(4);
        let year = year
            .parse()
            .map_err(|_| SeasonCodeError::Malformed(s.to_owned()))?;
        let term = Term::from_str(term).map_err(|_| SeasonCodeError::Malformed(s.to_owned()))?;

        Ok(Self::new(Year(year), term))
    }
}

impl Display for SeasonCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}", self.year, self.term.as_str())
    }
}

impl TryFrom<String> for SeasonCode {
    type Error = SeasonCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeasonCode> for String {
    fn from(code: SeasonCode) -> Self {
        code.to_string()
    }
}

#[cfg(feature = "database")]
impl From<SeasonCode> for Value {
    fn from(code: SeasonCode) -> Self {
        Value::String(Some(Box::new(code.to_string())))
    }
}

/// Validates a user-supplied season code
///
/// `None` means the user never picked a season and yields
/// [`SeasonCodeError::Missing`]; anything else must match the season code shape.
pub fn validate_season_code(input: Option<&str>) -> Result<SeasonCode, SeasonCodeError> {
    input.ok_or(SeasonCodeError::Missing)?.parse()
}
