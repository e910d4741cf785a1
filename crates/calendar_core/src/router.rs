//! Interaction router: turns gestures from the presented tree into selection
//! updates and callback notifications.

use chrono::NaiveDate;
use shared::domain::{is_same_month, DayOfWeek, GridColumn};
use tracing::{debug, warn};

use crate::{
    grid::{shift_months, MonthGrid, ViewedMonth, GRID_COLUMNS},
    render::{BoundGesture, Gesture},
    surface::Surface,
    Calendar,
};

type DayClickFn = Box<dyn FnMut(NaiveDate, Option<&str>)>;
type HeaderClickFn = Box<dyn FnMut(DayOfWeek)>;
type MonthChangeFn = Box<dyn FnMut(NaiveDate)>;

/// Optional notification hooks, invoked synchronously.
#[derive(Default)]
pub struct CalendarCallbacks {
    on_day_click: Option<DayClickFn>,
    on_header_click: Option<HeaderClickFn>,
    on_month_change: Option<MonthChangeFn>,
}

impl CalendarCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_day_click(mut self, f: impl FnMut(NaiveDate, Option<&str>) + 'static) -> Self {
        self.on_day_click = Some(Box::new(f));
        self
    }

    /// Receives the weekday as 0 = Sunday .. 6 = Saturday.
    pub fn on_header_click(mut self, f: impl FnMut(DayOfWeek) + 'static) -> Self {
        self.on_header_click = Some(Box::new(f));
        self
    }

    pub fn on_month_change(mut self, f: impl FnMut(NaiveDate) + 'static) -> Self {
        self.on_month_change = Some(Box::new(f));
        self
    }

    pub(crate) fn day_clicked(&mut self, date: NaiveDate, state: Option<&str>) {
        if let Some(f) = self.on_day_click.as_mut() {
            f(date, state);
        }
    }

    pub(crate) fn header_clicked(&mut self, day: DayOfWeek) {
        if let Some(f) = self.on_header_click.as_mut() {
            f(day);
        }
    }

    pub(crate) fn month_changed(&mut self, date: NaiveDate) {
        if let Some(f) = self.on_month_change.as_mut() {
            f(date);
        }
    }
}

/// Outcome of delivering a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    /// Bound to a view that has since been replaced.
    Stale,
    /// The resulting date cannot be displayed.
    OutOfRange,
    /// Names a node the presented view does not contain.
    Rejected,
}

impl<S: Surface> Calendar<S> {
    /// Delivers a gesture fired from a presented view.
    pub fn dispatch(&mut self, bound: &BoundGesture) -> Dispatch {
        if bound.generation != self.generation {
            debug!(
                bound = bound.generation,
                current = self.generation,
                "calendar: dropping gesture from discarded view"
            );
            return Dispatch::Stale;
        }
        if !self.is_presented(&bound.gesture) {
            warn!(
                gesture = ?bound.gesture,
                "calendar: gesture does not match the presented view"
            );
            return Dispatch::Rejected;
        }

        match &bound.gesture {
            Gesture::Day { date, state } => self.day_click(*date, state.as_deref()),
            Gesture::WeekdayHeader { column } => {
                self.header_click(*column);
                Dispatch::Handled
            }
            Gesture::PreviousMonth => self.navigate(-1),
            Gesture::NextMonth => self.navigate(1),
        }
    }

    /// Within one generation the overlay is unchanged since the render, so a
    /// day gesture must carry exactly the state its cell was bound with.
    fn is_presented(&self, gesture: &Gesture) -> bool {
        match gesture {
            Gesture::PreviousMonth | Gesture::NextMonth => true,
            Gesture::WeekdayHeader { column } => usize::from(column.0) < GRID_COLUMNS,
            Gesture::Day { date, state } => {
                let on_grid = self
                    .viewed_month()
                    .map(MonthGrid::compute)
                    .and_then(|grid| grid.position_of(*date))
                    .is_some();
                on_grid && state.as_deref() == self.store.state_name(*date)
            }
        }
    }

    fn day_click(&mut self, date: NaiveDate, state: Option<&str>) -> Dispatch {
        if ViewedMonth::containing(date).is_none() {
            warn!(%date, "calendar: clicked day outside renderable range");
            return Dispatch::OutOfRange;
        }

        let previous = self.view.selected;
        self.view.selected = date;
        self.render();
        debug!(%date, state = ?state, "calendar: day clicked");

        if !is_same_month(previous, date) {
            self.callbacks.month_changed(date);
        }
        self.callbacks.day_clicked(date, state);
        Dispatch::Handled
    }

    fn header_click(&mut self, column: GridColumn) {
        let day = column.to_day_of_week();
        debug!(column = column.0, day = day.0, "calendar: weekday header clicked");
        self.callbacks.header_clicked(day);
    }

    fn navigate(&mut self, delta: i32) -> Dispatch {
        let target = shift_months(self.view.selected, delta)
            .filter(|date| ViewedMonth::containing(*date).is_some());
        let Some(target) = target else {
            warn!(
                selected = %self.view.selected,
                delta,
                "calendar: month navigation past representable range"
            );
            return Dispatch::OutOfRange;
        };

        self.view.selected = target;
        debug!(%target, delta, "calendar: month navigated");
        self.callbacks.month_changed(target);
        self.render();
        Dispatch::Handled
    }
}
