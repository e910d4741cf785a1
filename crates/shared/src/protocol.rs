use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DateKey, DayOfWeek};

/// Numeric event ids as registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEventKind {
    ControlOpened,
    DateChanged,
    MonthChanged,
    DayHeaderClick,
}

impl HostEventKind {
    pub const ALL: [HostEventKind; 4] = [
        HostEventKind::ControlOpened,
        HostEventKind::DateChanged,
        HostEventKind::MonthChanged,
        HostEventKind::DayHeaderClick,
    ];

    pub fn id(self) -> u32 {
        match self {
            HostEventKind::ControlOpened => 1,
            HostEventKind::DateChanged => 2,
            HostEventKind::MonthChanged => 3,
            HostEventKind::DayHeaderClick => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HostEventKind::ControlOpened => "evControlOpened",
            HostEventKind::DateChanged => "evDateChanged",
            HostEventKind::MonthChanged => "evMonthChanged",
            HostEventKind::DayHeaderClick => "evDayHeaderClick",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum HostEvent {
    ControlOpened,
    DateChanged {
        new_date: DateKey,
        state: Option<String>,
    },
    MonthChanged {
        /// 1-12.
        month: u32,
        year: i32,
    },
    DayHeaderClick {
        day: DayOfWeek,
    },
}

impl HostEvent {
    pub fn kind(&self) -> HostEventKind {
        match self {
            HostEvent::ControlOpened => HostEventKind::ControlOpened,
            HostEvent::DateChanged { .. } => HostEventKind::DateChanged,
            HostEvent::MonthChanged { .. } => HostEventKind::MonthChanged,
            HostEvent::DayHeaderClick { .. } => HostEventKind::DayHeaderClick,
        }
    }

    /// Event parameters in the host's `p`-prefixed naming.
    pub fn params(&self) -> Vec<(&'static str, Value)> {
        match self {
            HostEvent::ControlOpened => Vec::new(),
            HostEvent::DateChanged { new_date, state } => vec![
                ("pNewDate", Value::String(new_date.to_string())),
                (
                    "pState",
                    state.clone().map(Value::String).unwrap_or(Value::Null),
                ),
            ],
            HostEvent::MonthChanged { month, year } => {
                vec![("pMonth", Value::from(*month)), ("pYear", Value::from(*year))]
            }
            HostEvent::DayHeaderClick { day } => vec![("pDay", Value::from(day.0))],
        }
    }
}

/// A row of a host-supplied state list. Both columns arrive as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateStateRow {
    pub date: String,
    #[serde(default)]
    pub state: String,
}
