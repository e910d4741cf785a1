use calendar_core::{FixedClock, SnapshotSurface};
use chrono::NaiveDate;
use crossbeam_channel::unbounded;
use host_bridge::{CalendarControl, ChannelHost, ControlConfig, Settings};
use serde_json::json;
use shared::{domain::StateDefinition, protocol::HostEventKind};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn session_forwards_events_through_channel_host() {
    let (tx, rx) = unbounded();
    let mut control = CalendarControl::with_clock(
        SnapshotSurface::new(),
        ChannelHost::new(tx),
        Box::new(FixedClock(ymd(2024, 3, 31))),
    );
    let props = json!({
        "statesdef": [{ "name": "holiday", "color": "red" }],
        "hilitetoday": 1,
    });
    control.init(&props.to_string()).expect("init");
    control.set_state("2024-03-31", "holiday").expect("state");

    let view = control
        .calendar()
        .surface()
        .current()
        .cloned()
        .expect("view");
    let cell = view.scene.day(ymd(2024, 3, 31)).expect("cell");
    assert_eq!(cell.dot.as_ref().map(|dot| dot.color.as_str()), Some("red"));
    assert!(cell.today);
    assert!(!cell.selected);

    control.handle_gesture(&view.bind(&view.scene.previous.gesture));
    assert_eq!(control.calendar().selected_date(), ymd(2024, 3, 2));

    let received: Vec<_> = rx.try_iter().map(|message| message.name).collect();
    assert_eq!(received, vec!["evControlOpened", "evMonthChanged"]);
}

#[test]
fn disabled_event_kind_is_filtered_by_channel_host() {
    let (tx, rx) = unbounded();
    let mut host = ChannelHost::new(tx);
    host.disable_event(HostEventKind::ControlOpened);
    let mut control = CalendarControl::with_clock(
        SnapshotSurface::new(),
        host,
        Box::new(FixedClock(ymd(2024, 1, 10))),
    );
    control.init("{}").expect("init");
    control.set_current_date("2023-12-25").expect("date");

    let received: Vec<_> = rx.try_iter().collect();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].name, "evMonthChanged");
    assert_eq!(received[0].params, vec![("pMonth", json!(12)), ("pYear", json!(2023))]);
}

#[test]
fn settings_drive_control_config() {
    let settings = Settings {
        states: vec![StateDefinition::new("booked", "#1e88e5").with_tooltip("Prenotato")],
        hilite_selected: false,
        ..Settings::default()
    };
    let config = settings.control_config().expect("config");
    assert_eq!(
        config,
        ControlConfig {
            states: settings.states.clone(),
            hilite_today: true,
            hilite_selected: false,
        }
    );

    let (tx, _rx) = unbounded();
    let mut control = CalendarControl::with_clock(
        SnapshotSurface::new(),
        ChannelHost::new(tx),
        Box::new(FixedClock(ymd(2024, 5, 5))),
    );
    control.apply_config(config);
    let view = control.calendar().surface().current().expect("view");
    assert!(!view.scene.day(ymd(2024, 5, 5)).expect("cell").selected);
    assert_eq!(control.get_property("$hiliteselected"), Some(json!(false)));
}
