use std::fmt;

/// Assignable properties of the calendar control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarProperty {
    /// Readable only; assignments are refused.
    SelectedDate,
    StatesDef,
    HiliteToday,
    HiliteSelected,
}

impl CalendarProperty {
    pub const ALL: [CalendarProperty; 4] = [
        CalendarProperty::SelectedDate,
        CalendarProperty::StatesDef,
        CalendarProperty::HiliteToday,
        CalendarProperty::HiliteSelected,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CalendarProperty::SelectedDate => "$selecteddate",
            CalendarProperty::StatesDef => "$statesdef",
            CalendarProperty::HiliteToday => "$hilitetoday",
            CalendarProperty::HiliteSelected => "$hiliteselected",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|prop| prop.name() == name)
    }
}

impl fmt::Display for CalendarProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
