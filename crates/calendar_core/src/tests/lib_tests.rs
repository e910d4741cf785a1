use std::{cell::RefCell, rc::Rc};

use shared::domain::{DayOfWeek, GridColumn};

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Seen {
    Day(NaiveDate, Option<String>),
    Header(DayOfWeek),
    Month(NaiveDate),
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn states() -> Vec<StateDefinition> {
    vec![
        StateDefinition::new("holiday", "#e53935"),
        StateDefinition::new("booked", "#1e88e5"),
    ]
}

fn calendar_at(today: NaiveDate) -> (Calendar<SnapshotSurface>, Rc<RefCell<Vec<Seen>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let (days, headers, months) = (seen.clone(), seen.clone(), seen.clone());
    let callbacks = CalendarCallbacks::new()
        .on_day_click(move |date, state| {
            days.borrow_mut()
                .push(Seen::Day(date, state.map(str::to_string)))
        })
        .on_header_click(move |day| headers.borrow_mut().push(Seen::Header(day)))
        .on_month_change(move |date| months.borrow_mut().push(Seen::Month(date)));
    let calendar = Calendar::with_clock(
        SnapshotSurface::new(),
        callbacks,
        states(),
        Box::new(FixedClock(today)),
    );
    (calendar, seen)
}

fn current(calendar: &Calendar<SnapshotSurface>) -> CalendarView {
    calendar.surface().current().cloned().expect("presented view")
}

fn click(calendar: &mut Calendar<SnapshotSurface>, gesture: Gesture) -> Dispatch {
    let bound = current(calendar).bind(&gesture);
    calendar.dispatch(&bound)
}

fn click_day(calendar: &mut Calendar<SnapshotSurface>, date: NaiveDate) -> Dispatch {
    let view = current(calendar);
    let node = view.scene.day(date).expect("date on grid");
    calendar.dispatch(&view.bind(&node.gesture))
}

#[test]
fn construction_selects_today_and_renders_once() {
    let (calendar, seen) = calendar_at(ymd(2023, 10, 10));
    assert_eq!(calendar.selected_date(), ymd(2023, 10, 10));
    assert_eq!(calendar.surface().presented(), 1);
    assert_eq!(calendar.generation(), 1);
    assert!(seen.borrow().is_empty());

    let view = current(&calendar);
    let node = view.scene.day(ymd(2023, 10, 10)).expect("cell");
    assert!(node.today && node.selected);
}

#[test]
fn every_mutation_renders_immediately() {
    let (mut calendar, _) = calendar_at(ymd(2023, 10, 10));
    calendar.set_state_definitions(states());
    calendar.set_date_state(ymd(2023, 10, 4), Some("holiday"));
    calendar.set_date_states(&[DateStateEntry::new(ymd(2023, 10, 5), "booked")]);
    calendar.set_hilite_today(false);
    calendar.set_hilite_selected(false);
    calendar.render();
    assert_eq!(calendar.surface().presented(), 7);
}

#[test]
fn render_is_idempotent_apart_from_generation() {
    let (mut calendar, _) = calendar_at(ymd(2023, 10, 10));
    calendar.set_date_state(ymd(2023, 10, 4), Some("holiday"));
    let first = current(&calendar);
    calendar.render();
    let second = current(&calendar);
    assert_eq!(first.scene, second.scene);
    assert_eq!(second.generation, first.generation + 1);
}

#[test]
fn set_current_date_in_same_month_emits_nothing() {
    let (mut calendar, seen) = calendar_at(ymd(2023, 10, 10));
    calendar.set_current_date(ymd(2023, 10, 28)).expect("set date");
    assert_eq!(calendar.selected_date(), ymd(2023, 10, 28));
    assert!(seen.borrow().is_empty());
}

#[test]
fn set_current_date_in_other_month_emits_one_month_change() {
    let (mut calendar, seen) = calendar_at(ymd(2023, 10, 10));
    calendar.set_current_date(ymd(2024, 10, 10)).expect("set date");
    assert_eq!(*seen.borrow(), vec![Seen::Month(ymd(2024, 10, 10))]);

    let view = current(&calendar);
    assert_eq!(view.scene.month_label, "Ottobre 2024");
    // today is no longer on the grid
    assert!(view.scene.days.iter().all(|d| !d.today));
}

#[test]
fn set_current_date_rejects_unrenderable_dates() {
    let (mut calendar, seen) = calendar_at(ymd(2023, 10, 10));
    let presented = calendar.surface().presented();
    let err = calendar
        .set_current_date(NaiveDate::MAX)
        .expect_err("should fail");
    assert!(matches!(err, CalendarError::InvalidDate { .. }));
    assert_eq!(calendar.selected_date(), ymd(2023, 10, 10));
    assert_eq!(calendar.surface().presented(), presented);
    assert!(seen.borrow().is_empty());
}

#[test]
fn day_click_in_month_selects_and_reports_state() {
    let (mut calendar, seen) = calendar_at(ymd(2023, 10, 10));
    calendar.set_date_state(ymd(2023, 10, 20), Some("booked"));

    assert_eq!(click_day(&mut calendar, ymd(2023, 10, 20)), Dispatch::Handled);
    assert_eq!(calendar.selected_date(), ymd(2023, 10, 20));
    assert_eq!(
        *seen.borrow(),
        vec![Seen::Day(ymd(2023, 10, 20), Some("booked".to_string()))]
    );
    assert!(current(&calendar).scene.day(ymd(2023, 10, 20)).expect("cell").selected);
}

#[test]
fn day_click_on_outside_cell_changes_month_first() {
    let (mut calendar, seen) = calendar_at(ymd(2023, 10, 10));
    click_day(&mut calendar, ymd(2023, 11, 2));

    assert_eq!(
        *seen.borrow(),
        vec![
            Seen::Month(ymd(2023, 11, 2)),
            Seen::Day(ymd(2023, 11, 2), None),
        ]
    );
    assert_eq!(current(&calendar).scene.month_label, "Novembre 2023");
}

#[test]
fn header_click_remaps_to_sunday_based_weekday() {
    let (mut calendar, seen) = calendar_at(ymd(2023, 10, 10));
    let presented = calendar.surface().presented();

    click(&mut calendar, Gesture::WeekdayHeader { column: GridColumn(0) });
    click(&mut calendar, Gesture::WeekdayHeader { column: GridColumn(6) });

    assert_eq!(
        *seen.borrow(),
        vec![Seen::Header(DayOfWeek(1)), Seen::Header(DayOfWeek(0))]
    );
    assert_eq!(calendar.selected_date(), ymd(2023, 10, 10));
    assert_eq!(calendar.surface().presented(), presented);
}

#[test]
fn navigation_always_emits_month_change() {
    let (mut calendar, seen) = calendar_at(ymd(2024, 1, 15));

    click(&mut calendar, Gesture::PreviousMonth);
    assert_eq!(calendar.selected_date(), ymd(2023, 12, 15));
    click(&mut calendar, Gesture::NextMonth);
    click(&mut calendar, Gesture::NextMonth);
    assert_eq!(calendar.selected_date(), ymd(2024, 2, 15));

    assert_eq!(
        *seen.borrow(),
        vec![
            Seen::Month(ymd(2023, 12, 15)),
            Seen::Month(ymd(2024, 1, 15)),
            Seen::Month(ymd(2024, 2, 15)),
        ]
    );
    assert_eq!(current(&calendar).scene.month_label, "Febbraio 2024");
}

#[test]
fn navigation_rolls_day_overflow_forward() {
    let (mut calendar, seen) = calendar_at(ymd(2023, 3, 31));
    click(&mut calendar, Gesture::PreviousMonth);
    // "31 February" overflows into March
    assert_eq!(calendar.selected_date(), ymd(2023, 3, 3));
    assert_eq!(*seen.borrow(), vec![Seen::Month(ymd(2023, 3, 3))]);
    assert_eq!(current(&calendar).scene.month_label, "Marzo 2023");
}

#[test]
fn gestures_from_discarded_views_are_dropped() {
    let (mut calendar, seen) = calendar_at(ymd(2023, 10, 10));
    let old = current(&calendar);
    calendar.set_hilite_today(false);

    let node = old.scene.day(ymd(2023, 10, 12)).expect("cell");
    assert_eq!(calendar.dispatch(&old.bind(&node.gesture)), Dispatch::Stale);
    assert_eq!(calendar.selected_date(), ymd(2023, 10, 10));
    assert!(seen.borrow().is_empty());
}

#[test]
fn gestures_naming_absent_nodes_are_rejected() {
    let (mut calendar, seen) = calendar_at(ymd(2023, 10, 10));
    calendar.set_date_state(ymd(2023, 10, 12), Some("holiday"));

    let forged = [
        Gesture::WeekdayHeader {
            column: GridColumn(9),
        },
        Gesture::WeekdayHeader {
            column: GridColumn(u8::MAX),
        },
        Gesture::Day {
            date: ymd(1999, 1, 1),
            state: Some("bogus".into()),
        },
        Gesture::Day {
            date: ymd(2023, 10, 12),
            state: Some("booked".into()),
        },
        Gesture::Day {
            date: ymd(2023, 10, 12),
            state: None,
        },
    ];
    for gesture in forged {
        assert_eq!(click(&mut calendar, gesture), Dispatch::Rejected);
    }
    assert_eq!(calendar.selected_date(), ymd(2023, 10, 10));
    assert!(seen.borrow().is_empty());

    let accepted = Gesture::Day {
        date: ymd(2023, 10, 12),
        state: Some("holiday".into()),
    };
    assert_eq!(click(&mut calendar, accepted), Dispatch::Handled);
}

#[test]
fn overlay_replacement_keeps_selection() {
    let (mut calendar, _) = calendar_at(ymd(2023, 10, 10));
    calendar.set_current_date(ymd(2023, 10, 21)).expect("set date");
    calendar.set_date_state(ymd(2023, 10, 1), Some("holiday"));
    calendar.set_date_states(&[DateStateEntry::new(ymd(2023, 10, 5), "booked")]);

    assert_eq!(calendar.selected_date(), ymd(2023, 10, 21));
    assert_eq!(calendar.store().state_name(ymd(2023, 10, 1)), None);
    let view = current(&calendar);
    assert!(view.scene.day(ymd(2023, 10, 1)).expect("cell").dot.is_none());
    assert!(view.scene.day(ymd(2023, 10, 5)).expect("cell").dot.is_some());
}

#[test]
fn callbacks_are_optional() {
    let mut calendar = Calendar::with_clock(
        SnapshotSurface::new(),
        CalendarCallbacks::default(),
        Vec::new(),
        Box::new(FixedClock(ymd(2023, 10, 10))),
    );
    click(&mut calendar, Gesture::NextMonth);
    click_day(&mut calendar, ymd(2023, 11, 1));
    click(&mut calendar, Gesture::WeekdayHeader { column: GridColumn(3) });
    assert_eq!(calendar.selected_date(), ymd(2023, 11, 1));
}
