//! Render pipeline: projects the month, overlay and view flags into a scene.
//!
//! A scene is a plain value rebuilt from scratch on every pass. Interactive
//! nodes carry the [`Gesture`] they fire; a presented [`CalendarView`] stamps
//! the scene with a generation so gestures bound to a discarded tree can be
//! told apart from live ones.

use chrono::NaiveDate;
use serde::Serialize;
use shared::domain::GridColumn;

use crate::{
    grid::{MonthGrid, ViewedMonth},
    labels::{month_header, NEXT_MONTH_LABEL, PREVIOUS_MONTH_LABEL, WEEKDAY_LABELS},
    store::StateStore,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gesture {
    PreviousMonth,
    NextMonth,
    WeekdayHeader {
        column: GridColumn,
    },
    /// `state` is the overlay value at render time, even if its definition
    /// has since been removed.
    Day {
        date: NaiveDate,
        state: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: &'static str,
    pub gesture: Gesture,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayHeaderNode {
    pub label: &'static str,
    pub gesture: Gesture,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateDot {
    pub state: String,
    pub color: String,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayNode {
    pub date: NaiveDate,
    pub day_number: u32,
    pub outside: bool,
    pub today: bool,
    pub selected: bool,
    pub dot: Option<StateDot>,
    pub gesture: Gesture,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub month: ViewedMonth,
    pub month_label: String,
    pub previous: Button,
    pub next: Button,
    pub weekdays: Vec<WeekdayHeaderNode>,
    pub days: Vec<DayNode>,
}

impl Scene {
    pub fn day(&self, date: NaiveDate) -> Option<&DayNode> {
        self.days.iter().find(|node| node.date == date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub generation: u64,
    pub scene: Scene,
}

impl CalendarView {
    pub fn bind(&self, gesture: &Gesture) -> BoundGesture {
        BoundGesture {
            generation: self.generation,
            gesture: gesture.clone(),
        }
    }
}

/// A gesture together with the generation of the tree it was fired from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundGesture {
    pub generation: u64,
    pub gesture: Gesture,
}

pub struct RenderInput<'a> {
    pub month: ViewedMonth,
    pub selected: NaiveDate,
    pub today: NaiveDate,
    pub hilite_today: bool,
    pub hilite_selected: bool,
    pub store: &'a StateStore,
}

pub fn render_scene(input: &RenderInput<'_>) -> Scene {
    let grid = MonthGrid::compute(input.month);

    let weekdays = WEEKDAY_LABELS
        .iter()
        .copied()
        .enumerate()
        .map(|(column, label)| WeekdayHeaderNode {
            label,
            gesture: Gesture::WeekdayHeader {
                column: GridColumn(column as u8),
            },
        })
        .collect();

    let days = grid
        .cells
        .iter()
        .map(|cell| {
            let state = input.store.state_name(cell.date).map(str::to_string);
            let dot = input.store.resolve(cell.date).map(|def| StateDot {
                state: def.name.clone(),
                color: def.color.clone(),
                tooltip: def.tooltip.clone(),
            });
            DayNode {
                date: cell.date,
                day_number: cell.day_number,
                outside: cell.outside,
                today: input.hilite_today && cell.date == input.today,
                selected: input.hilite_selected && cell.date == input.selected,
                dot,
                gesture: Gesture::Day {
                    date: cell.date,
                    state,
                },
            }
        })
        .collect();

    Scene {
        month: input.month,
        month_label: month_header(input.month),
        previous: Button {
            label: PREVIOUS_MONTH_LABEL,
            gesture: Gesture::PreviousMonth,
        },
        next: Button {
            label: NEXT_MONTH_LABEL,
            gesture: Gesture::NextMonth,
        },
        weekdays,
        days,
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
