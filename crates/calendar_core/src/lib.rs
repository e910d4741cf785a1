use chrono::NaiveDate;
use shared::{
    domain::{is_same_month, DateStateEntry, StateDefinition},
    error::CalendarError,
};
use tracing::{debug, warn};

pub mod clock;
pub mod grid;
pub mod labels;
pub mod render;
mod router;
pub mod store;
pub mod surface;
pub mod text;

pub use clock::{Clock, FixedClock, LocalClock};
pub use grid::{compute_grid, shift_months, GridCell, MonthGrid, ViewedMonth};
pub use render::{BoundGesture, CalendarView, DayNode, Gesture, Scene, StateDot};
pub use router::{CalendarCallbacks, Dispatch};
pub use store::StateStore;
pub use surface::{SnapshotSurface, Surface};

/// Selection and highlight flags; the only state that survives overlay
/// replacement. The selected date also decides which month is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub selected: NaiveDate,
    pub hilite_today: bool,
    pub hilite_selected: bool,
}

/// Month-grid date picker engine.
///
/// Every mutating call re-renders synchronously into the owned surface.
/// Callbacks only fire for gestures, except month changes caused by
/// [`Calendar::set_current_date`].
pub struct Calendar<S: Surface> {
    surface: S,
    callbacks: CalendarCallbacks,
    clock: Box<dyn Clock>,
    store: StateStore,
    view: ViewState,
    generation: u64,
}

impl<S: Surface> Calendar<S> {
    pub fn new(
        surface: S,
        callbacks: CalendarCallbacks,
        states: impl IntoIterator<Item = StateDefinition>,
    ) -> Self {
        Self::with_clock(surface, callbacks, states, Box::new(LocalClock))
    }

    pub fn with_clock(
        surface: S,
        callbacks: CalendarCallbacks,
        states: impl IntoIterator<Item = StateDefinition>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let today = clock.today();
        let mut calendar = Self {
            surface,
            callbacks,
            clock,
            store: StateStore::new(states),
            view: ViewState {
                selected: today,
                hilite_today: true,
                hilite_selected: true,
            },
            generation: 0,
        };
        calendar.render();
        calendar
    }

    pub fn set_state_definitions(&mut self, states: impl IntoIterator<Item = StateDefinition>) {
        self.store.set_definitions(states);
        self.render();
    }

    /// `None`, `""` or an unregistered name clears the date.
    pub fn set_date_state(&mut self, date: NaiveDate, state: Option<&str>) {
        self.store.set_date_state(date, state);
        self.render();
    }

    /// Replaces the whole overlay, then renders once.
    pub fn set_date_states(&mut self, entries: &[DateStateEntry]) {
        self.store.replace_date_states(entries);
        debug!(
            entries = entries.len(),
            overlay = self.store.overlay().len(),
            "calendar: date states replaced"
        );
        self.render();
    }

    pub fn set_hilite_today(&mut self, hilite: bool) {
        self.view.hilite_today = hilite;
        self.render();
    }

    pub fn set_hilite_selected(&mut self, hilite: bool) {
        self.view.hilite_selected = hilite;
        self.render();
    }

    /// Programmatic selection. Emits a month change when the (month, year)
    /// differs from the previous selection, never a day click.
    pub fn set_current_date(&mut self, date: NaiveDate) -> Result<(), CalendarError> {
        if ViewedMonth::containing(date).is_none() {
            return Err(CalendarError::InvalidDate {
                input: date.to_string(),
            });
        }

        let previous = self.view.selected;
        self.view.selected = date;
        self.render();
        debug!(%date, "calendar: current date set");

        if !is_same_month(previous, date) {
            self.callbacks.month_changed(date);
        }
        Ok(())
    }

    /// Rebuilds the scene from current state and presents it, replacing the
    /// previous view.
    pub fn render(&mut self) {
        let Some(month) = ViewedMonth::containing(self.view.selected) else {
            warn!(
                selected = %self.view.selected,
                "calendar: selected date outside renderable range"
            );
            return;
        };

        let scene = render::render_scene(&render::RenderInput {
            month,
            selected: self.view.selected,
            today: self.clock.today(),
            hilite_today: self.view.hilite_today,
            hilite_selected: self.view.hilite_selected,
            store: &self.store,
        });

        self.generation += 1;
        debug!(generation = self.generation, %month, "calendar: rendered");
        self.surface.present(CalendarView {
            generation: self.generation,
            scene,
        });
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.view.selected
    }

    pub fn viewed_month(&self) -> Option<ViewedMonth> {
        ViewedMonth::containing(self.view.selected)
    }

    pub fn view_state(&self) -> ViewState {
        self.view
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Generation of the most recently presented view.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
