//! Host control wrapping the calendar engine: property dispatch, client
//! methods and event forwarding.

use calendar_core::{
    BoundGesture, Calendar, CalendarCallbacks, Clock, Dispatch, LocalClock, Surface,
};
use chrono::Datelike;
use crossbeam_channel::{unbounded, Receiver, SendError, Sender};
use serde_json::Value;
use shared::{
    domain::{DateKey, DateStateEntry, StateDefinition},
    error::CalendarError,
    protocol::{DateStateRow, HostEvent},
};
use tracing::{debug, info, warn};

use crate::{
    config::{parse_flag, states_or_empty, ControlConfig},
    events::{EventDispatcher, HostChannel},
    properties::CalendarProperty,
};

pub struct CalendarControl<S: Surface, H: HostChannel> {
    calendar: Calendar<S>,
    pending: Receiver<HostEvent>,
    dispatcher: EventDispatcher,
    host: H,
    states: Vec<StateDefinition>,
    enabled: bool,
}

impl<S: Surface, H: HostChannel> CalendarControl<S, H> {
    pub fn new(surface: S, host: H) -> Self {
        Self::with_clock(surface, host, Box::new(LocalClock))
    }

    pub fn with_clock(surface: S, host: H, clock: Box<dyn Clock>) -> Self {
        let (tx, pending) = unbounded();
        let calendar = Calendar::with_clock(surface, event_callbacks(tx), Vec::new(), clock);
        Self {
            calendar,
            pending,
            dispatcher: EventDispatcher::default(),
            host,
            states: Vec::new(),
            enabled: true,
        }
    }

    /// Applies the host's `data-props` and announces the control as opened.
    pub fn init(&mut self, data_props: &str) -> Result<(), CalendarError> {
        let config = ControlConfig::from_data_props(data_props)?;
        self.open(config);
        Ok(())
    }

    /// Applies an already validated configuration, then sends
    /// `evControlOpened`.
    pub fn open(&mut self, config: ControlConfig) {
        self.apply_config(config);
        self.dispatcher
            .trigger(&mut self.host, &HostEvent::ControlOpened);
        info!(states = self.states.len(), "bridge: control opened");
    }

    pub fn apply_config(&mut self, config: ControlConfig) {
        self.set_states(config.states);
        self.calendar.set_hilite_today(config.hilite_today);
        self.calendar.set_hilite_selected(config.hilite_selected);
    }

    pub fn can_assign(&self, name: &str) -> bool {
        CalendarProperty::from_name(name).is_some()
    }

    /// Assigns a property. `Ok(false)` means the property exists but refuses
    /// assignment.
    pub fn set_property(&mut self, name: &str, value: &Value) -> Result<bool, CalendarError> {
        let property = CalendarProperty::from_name(name).ok_or_else(|| {
            CalendarError::UnknownProperty {
                name: name.to_string(),
            }
        })?;

        match property {
            CalendarProperty::SelectedDate => return Ok(false),
            CalendarProperty::StatesDef => self.set_states(states_or_empty(value)),
            CalendarProperty::HiliteToday => self.calendar.set_hilite_today(parse_flag(value)),
            CalendarProperty::HiliteSelected => {
                self.calendar.set_hilite_selected(parse_flag(value))
            }
        }
        debug!(property = %property, "bridge: property assigned");
        Ok(true)
    }

    pub fn get_property(&self, name: &str) -> Option<Value> {
        let view = self.calendar.view_state();
        match CalendarProperty::from_name(name)? {
            CalendarProperty::SelectedDate => {
                Some(Value::String(DateKey::new(view.selected).to_string()))
            }
            CalendarProperty::StatesDef => serde_json::to_string(&self.states)
                .ok()
                .map(Value::String),
            CalendarProperty::HiliteToday => Some(Value::Bool(view.hilite_today)),
            CalendarProperty::HiliteSelected => Some(Value::Bool(view.hilite_selected)),
        }
    }

    /// `$setcurrentdate`: selects a `YYYY-MM-DD` date.
    pub fn set_current_date(&mut self, date: &str) -> Result<(), CalendarError> {
        let key = DateKey::parse(date)?;
        self.calendar.set_current_date(key.date())?;
        self.flush_events();
        Ok(())
    }

    /// `$setstate`: an empty or unknown state clears the date.
    pub fn set_state(&mut self, date: &str, state: &str) -> Result<(), CalendarError> {
        let key = DateKey::parse(date)?;
        self.calendar.set_date_state(key.date(), Some(state));
        Ok(())
    }

    /// `$setstatelist`: replaces every date state. Nothing is applied if any
    /// row carries an invalid date.
    pub fn set_state_list(&mut self, rows: &[DateStateRow]) -> Result<(), CalendarError> {
        let entries = rows
            .iter()
            .map(|row| {
                DateKey::parse(&row.date).map(|key| DateStateEntry::new(key.date(), &row.state))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.calendar.set_date_states(&entries);
        Ok(())
    }

    /// Full redraw, as requested by the host.
    pub fn update(&mut self) {
        self.calendar.render();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Routes a click from the presented view. Disabled controls ignore
    /// input and return `None`.
    pub fn handle_gesture(&mut self, gesture: &BoundGesture) -> Option<Dispatch> {
        if !self.enabled {
            debug!("bridge: control disabled; ignoring gesture");
            return None;
        }
        let outcome = self.calendar.dispatch(gesture);
        self.flush_events();
        Some(outcome)
    }

    pub fn calendar(&self) -> &Calendar<S> {
        &self.calendar
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn set_states(&mut self, states: Vec<StateDefinition>) {
        self.calendar.set_state_definitions(states.iter().cloned());
        self.states = states;
    }

    fn flush_events(&mut self) {
        while let Ok(event) = self.pending.try_recv() {
            self.dispatcher.trigger(&mut self.host, &event);
        }
    }
}

fn event_callbacks(tx: Sender<HostEvent>) -> CalendarCallbacks {
    let (day_tx, header_tx, month_tx) = (tx.clone(), tx.clone(), tx);
    CalendarCallbacks::new()
        .on_day_click(move |date, state| {
            forward(
                &day_tx,
                HostEvent::DateChanged {
                    new_date: DateKey::new(date),
                    state: state.map(str::to_string),
                },
            );
        })
        .on_header_click(move |day| {
            forward(&header_tx, HostEvent::DayHeaderClick { day });
        })
        .on_month_change(move |date| {
            forward(
                &month_tx,
                HostEvent::MonthChanged {
                    month: date.month(),
                    year: date.year(),
                },
            );
        })
}

/// Queues an engine notification for the next flush. Returns whether it was
/// queued.
fn forward(tx: &Sender<HostEvent>, event: HostEvent) -> bool {
    match tx.send(event) {
        Ok(()) => true,
        Err(SendError(event)) => {
            warn!(
                event = event.kind().name(),
                "bridge: pending event queue disconnected; dropping event"
            );
            false
        }
    }
}

#[cfg(test)]
#[path = "tests/control_tests.rs"]
mod tests;
