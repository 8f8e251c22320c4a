use std::fmt;
use std::str::FromStr;

use chrono::{Days, Local, Months, NaiveDate};

use crate::error::{AppError, Result};

/// Compact date format shared by window keys and provider rows.
pub const DATE_KEY_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermUnit {
    Day,
    Month,
    Year,
}

impl TermUnit {
    fn from_suffix(ch: char) -> Option<Self> {
        match ch {
            'd' => Some(TermUnit::Day),
            'm' => Some(TermUnit::Month),
            'y' => Some(TermUnit::Year),
            _ => None,
        }
    }

    fn suffix(self) -> char {
        match self {
            TermUnit::Day => 'd',
            TermUnit::Month => 'm',
            TermUnit::Year => 'y',
        }
    }
}

/// Relative lookback such as `1y`, `3m` or `10d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSpec {
    pub magnitude: u32,
    pub unit: TermUnit,
}

impl TermSpec {
    pub fn parse(term: &str) -> Result<Self> {
        let trimmed = term.trim();
        let Some(last) = trimmed.chars().last() else {
            return Err(AppError::invalid_term(term, "term is empty"));
        };

        let unit = TermUnit::from_suffix(last).ok_or_else(|| {
            AppError::invalid_term(term, format!("unknown unit `{last}`, expected d, m or y"))
        })?;

        let digits = &trimmed[..trimmed.len() - last.len_utf8()];
        if digits.is_empty() {
            return Err(AppError::invalid_term(term, "missing magnitude"));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::invalid_term(
                term,
                format!("magnitude `{digits}` is not a number"),
            ));
        }

        let magnitude: u32 = digits
            .parse()
            .map_err(|_| AppError::invalid_term(term, "magnitude out of range"))?;
        if magnitude == 0 {
            return Err(AppError::invalid_term(term, "magnitude must be positive"));
        }

        Ok(Self { magnitude, unit })
    }

    /// Window ending at the current local date.
    pub fn resolve(&self) -> Result<DateWindow> {
        self.window_ending(Local::now().date_naive())
    }

    pub fn window_ending(&self, to: NaiveDate) -> Result<DateWindow> {
        let from = match self.unit {
            TermUnit::Day => to.checked_sub_days(Days::new(u64::from(self.magnitude))),
            TermUnit::Month => to.checked_sub_months(Months::new(self.magnitude)),
            TermUnit::Year => self
                .magnitude
                .checked_mul(12)
                .and_then(|months| to.checked_sub_months(Months::new(months))),
        }
        .ok_or_else(|| AppError::invalid_term(self.to_string(), "window start out of range"))?;

        Ok(DateWindow { from, to })
    }
}

impl FromStr for TermSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TermSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.suffix())
    }
}

/// Inclusive `[from, to]` calendar range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(AppError::message(format!(
                "date window start {from} is after end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn from_key(&self) -> String {
        self.from.format(DATE_KEY_FORMAT).to_string()
    }

    pub fn to_key(&self) -> String {
        self.to.format(DATE_KEY_FORMAT).to_string()
    }

    /// Fixed-width `YYYYMMDD` keys order lexicographically the same as chronologically,
    /// so the bounds check is a plain string comparison.
    pub fn contains(&self, date_key: &str) -> bool {
        self.bounds().contains(date_key)
    }

    pub(crate) fn bounds(&self) -> KeyBounds {
        KeyBounds {
            from: self.from_key(),
            to: self.to_key(),
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from_key(), self.to_key())
    }
}

/// Pre-formatted window keys, reused across every row of a merge.
pub(crate) struct KeyBounds {
    from: String,
    to: String,
}

impl KeyBounds {
    pub(crate) fn contains(&self, date_key: &str) -> bool {
        self.from.as_str() <= date_key && date_key <= self.to.as_str()
    }
}
