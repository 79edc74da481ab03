//! Query-parameter primitives shared across all analytic endpoints.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::AppError;

/// Year filter. `All` means "aggregate across every year" and is what both
/// an omitted `year` and the literal `"all"` resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid year")]
pub struct InvalidYear;

impl YearFilter {
    /// Resolve a raw query value. Absent and blank count as `All`.
    pub fn from_param(raw: Option<&str>) -> Result<Self, InvalidYear> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(value) => value.parse(),
        }
    }

    /// Value bound to the `p_year` parameter; `None` binds SQL NULL.
    pub fn as_param(self) -> Option<i32> {
        match self {
            Self::All => None,
            Self::Year(year) => Some(year),
        }
    }

    pub fn matches(self, year: Option<i32>) -> bool {
        match self {
            Self::All => true,
            Self::Year(wanted) => year == Some(wanted),
        }
    }
}

impl FromStr for YearFilter {
    type Err = InvalidYear;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<i32>().map(Self::Year).map_err(|_| InvalidYear)
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Year(year) => write!(f, "{year}"),
        }
    }
}

/// Query string of endpoints that take only the optional year.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

impl YearQuery {
    pub fn year(&self) -> Result<YearFilter, InvalidYear> {
        YearFilter::from_param(self.year.as_deref())
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Integer filter with a default applied when the key is absent.
pub fn int_param(raw: Option<&str>, name: &str, default: i32) -> Result<i32, AppError> {
    match present(raw) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| AppError::invalid(name)),
    }
}

/// Decimal filter with a default applied when the key is absent.
pub fn float_param(raw: Option<&str>, name: &str, default: f64) -> Result<f64, AppError> {
    match present(raw) {
        None => Ok(default),
        Some(value) => value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| AppError::invalid(name)),
    }
}

/// Mandatory parameter; `label` is the human-readable field name used in the error.
pub fn required_param<'a>(raw: Option<&'a str>, label: &str) -> Result<&'a str, AppError> {
    present(raw).ok_or_else(|| AppError::missing(label))
}
