use calendar_core::{CalendarView, Surface};

/// Holds the latest view until the next frame draws it.
#[derive(Debug, Default)]
pub struct EguiSurface {
    view: Option<CalendarView>,
}

impl EguiSurface {
    pub fn view(&self) -> Option<&CalendarView> {
        self.view.as_ref()
    }
}

impl Surface for EguiSurface {
    fn present(&mut self, view: CalendarView) {
        tracing::trace!(generation = view.generation, "gui: view presented");
        self.view = Some(view);
    }
}
