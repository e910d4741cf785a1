//! Desktop host for the calendar control: draws the presented scene and
//! feeds clicks back as bound gestures.

use calendar_core::{grid::GRID_COLUMNS, BoundGesture, CalendarView, DayNode};
use crossbeam_channel::Receiver;
use eframe::egui::{self, Color32, RichText};
use host_bridge::{CalendarControl, ChannelHost, HostMessage};
use serde_json::{json, Value};
use shared::error::{ApiError, CalendarError};

use crate::{
    controller::events::{describe_host_message, EventLog},
    surface::EguiSurface,
    ui::theme,
};

const CELL_SIZE: [f32; 2] = [44.0, 36.0];

pub struct CalendarApp {
    control: CalendarControl<EguiSurface, ChannelHost>,
    host_rx: Receiver<HostMessage>,
    log: EventLog,
    date_input: String,
    state_input: String,
    status: String,
}

impl CalendarApp {
    pub fn new(
        control: CalendarControl<EguiSurface, ChannelHost>,
        host_rx: Receiver<HostMessage>,
    ) -> Self {
        let date_input = control
            .get_property("$selecteddate")
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        Self {
            control,
            host_rx,
            log: EventLog::default(),
            date_input,
            state_input: String::new(),
            status: String::new(),
        }
    }

    fn drain_host_events(&mut self) {
        while let Ok(message) = self.host_rx.try_recv() {
            self.log.push(describe_host_message(&message));
        }
    }

    fn assign(&mut self, property: &str, value: Value) {
        let result = match self.control.set_property(property, &value) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CalendarError::ReadOnlyProperty {
                name: property.to_string(),
            }),
            Err(err) => Err(err),
        };
        self.report(result);
    }

    fn report(&mut self, result: Result<(), CalendarError>) {
        self.status = match result {
            Ok(()) => String::new(),
            Err(err) => {
                let err = ApiError::from(err);
                tracing::debug!(code = ?err.code, message = %err.message, "gui: host call failed");
                err.message
            }
        };
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Proprietà");
        let view_state = self.control.calendar().view_state();

        let mut hilite_today = view_state.hilite_today;
        if ui.checkbox(&mut hilite_today, "Evidenzia oggi").changed() {
            self.assign("$hilitetoday", json!(hilite_today));
        }
        let mut hilite_selected = view_state.hilite_selected;
        if ui
            .checkbox(&mut hilite_selected, "Evidenzia selezione")
            .changed()
        {
            self.assign("$hiliteselected", json!(hilite_selected));
        }
        let mut enabled = self.control.is_enabled();
        if ui.checkbox(&mut enabled, "Attivo").changed() {
            self.control.set_enabled(enabled);
        }

        ui.separator();
        ui.label("Data (AAAA-MM-GG)");
        ui.text_edit_singleline(&mut self.date_input);
        if ui.button("Vai alla data").clicked() {
            let result = self.control.set_current_date(&self.date_input);
            self.report(result);
        }

        ui.label("Stato");
        ui.text_edit_singleline(&mut self.state_input);
        if ui.button("Imposta stato").clicked() {
            let result = self.control.set_state(&self.date_input, &self.state_input);
            self.report(result);
        }

        ui.separator();
        if ui.button("Ridisegna").clicked() {
            self.control.update();
        }

        ui.separator();
        ui.label(RichText::new("Stati").strong());
        for state in self.control.calendar().store().definitions() {
            ui.horizontal(|ui| {
                let (dot, _) =
                    ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                ui.painter()
                    .circle_filled(dot.center(), 4.0, theme::dot_color(&state.color));
                ui.label(state.tooltip.as_deref().unwrap_or(state.name.as_str()));
            });
        }

        if !self.status.is_empty() {
            ui.separator();
            ui.colored_label(theme::TODAY_STROKE, self.status.as_str());
        }
    }

    fn show_event_log(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Eventi").strong());
            if ui.small_button("Pulisci").clicked() {
                self.log.clear();
            }
        });
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .max_height(140.0)
            .show(ui, |ui| {
                for line in self.log.lines() {
                    ui.monospace(line.as_str());
                }
            });
    }
}

/// Draws one presented view and returns the gesture clicked this frame.
fn show_calendar(ui: &mut egui::Ui, view: &CalendarView) -> Option<BoundGesture> {
    let scene = &view.scene;
    let mut fired = None;

    ui.horizontal(|ui| {
        if ui.button(scene.previous.label).clicked() {
            fired = Some(view.bind(&scene.previous.gesture));
        }
        ui.add_sized(
            [CELL_SIZE[0] * 5.0, CELL_SIZE[1]],
            egui::Label::new(RichText::new(&scene.month_label).heading()),
        );
        if ui.button(scene.next.label).clicked() {
            fired = Some(view.bind(&scene.next.gesture));
        }
    });

    egui::Grid::new("calendar-grid")
        .spacing([4.0, 4.0])
        .show(ui, |ui| {
            for header in &scene.weekdays {
                let button = egui::Button::new(RichText::new(header.label).strong())
                    .frame(false)
                    .min_size(egui::vec2(CELL_SIZE[0], 20.0));
                if ui.add(button).clicked() {
                    fired = Some(view.bind(&header.gesture));
                }
            }
            ui.end_row();

            for row in scene.days.chunks(GRID_COLUMNS) {
                for day in row {
                    if day_cell(ui, day).clicked() {
                        fired = Some(view.bind(&day.gesture));
                    }
                }
                ui.end_row();
            }
        });

    fired
}

fn day_cell(ui: &mut egui::Ui, day: &DayNode) -> egui::Response {
    let mut text = RichText::new(day.day_number.to_string());
    if day.outside {
        text = text.color(theme::OUTSIDE_TEXT);
    }
    if day.selected {
        text = text.strong().color(Color32::WHITE);
    }

    let mut button = egui::Button::new(text).min_size(egui::vec2(CELL_SIZE[0], CELL_SIZE[1]));
    if day.selected {
        button = button.fill(theme::SELECTED_FILL);
    }
    if day.today {
        button = button.stroke(egui::Stroke::new(2.0, theme::TODAY_STROKE));
    }

    let response = ui.add(button);
    let Some(dot) = &day.dot else {
        return response;
    };
    ui.painter().circle_filled(
        egui::pos2(response.rect.right() - 7.0, response.rect.top() + 7.0),
        3.5,
        theme::dot_color(&dot.color),
    );
    match &dot.tooltip {
        Some(tooltip) => response.on_hover_text(tooltip.as_str()),
        None => response,
    }
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_host_events();

        egui::SidePanel::right("calendar-controls")
            .resizable(false)
            .min_width(200.0)
            .show(ctx, |ui| self.show_controls(ui));

        egui::TopBottomPanel::bottom("calendar-events").show(ctx, |ui| self.show_event_log(ui));

        let view = self.control.calendar().surface().view().cloned();
        let fired = egui::CentralPanel::default()
            .show(ctx, |ui| match &view {
                Some(view) => show_calendar(ui, view),
                None => {
                    ui.label("Nessuna vista disponibile");
                    None
                }
            })
            .inner;

        // Gestures apply after drawing so the next frame shows the new view.
        if let Some(gesture) = fired {
            self.control.handle_gesture(&gesture);
            self.drain_host_events();
            ctx.request_repaint();
        }
    }
}
