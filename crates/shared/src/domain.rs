use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

macro_rules! index_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u8);
    };
}

// Grid column, 0 = Monday .. 6 = Sunday.
index_newtype!(GridColumn);
// Caller-facing weekday, 0 = Sunday .. 6 = Saturday.
index_newtype!(DayOfWeek);

impl GridColumn {
    pub fn to_day_of_week(self) -> DayOfWeek {
        DayOfWeek((self.0 % 7 + 1) % 7)
    }
}

/// Canonical `YYYY-MM-DD` identity of a calendar day.
///
/// All overlay storage and lookup goes through this type, so two dates share
/// a state iff their keys are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn parse(raw: &str) -> Result<Self, CalendarError> {
        let trimmed = raw.trim();
        NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| CalendarError::InvalidDate {
                input: raw.to_string(),
            })
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for DateKey {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(value: DateKey) -> Self {
        value.to_string()
    }
}

/// A named day state and how it is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDefinition {
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl StateDefinition {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            tooltip: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// One item of a bulk overlay replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateStateEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub state: String,
}

impl DateStateEntry {
    pub fn new(date: NaiveDate, state: impl Into<String>) -> Self {
        Self {
            date,
            state: state.into(),
        }
    }
}

/// Same (month, year) pair.
pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
