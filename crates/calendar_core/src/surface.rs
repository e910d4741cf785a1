use crate::render::CalendarView;

/// Drawable container handed to the engine by its host.
///
/// Each call to [`Surface::present`] replaces whatever was shown before;
/// gestures bound to the previous view must no longer be delivered.
pub trait Surface {
    fn present(&mut self, view: CalendarView);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn present(&mut self, view: CalendarView) {
        (**self).present(view);
    }
}

/// Keeps only the latest presented view.
#[derive(Debug, Default)]
pub struct SnapshotSurface {
    current: Option<CalendarView>,
    presented: u64,
}

impl SnapshotSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&CalendarView> {
        self.current.as_ref()
    }

    /// Number of views presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Surface for SnapshotSurface {
    fn present(&mut self, view: CalendarView) {
        self.current = Some(view);
        self.presented += 1;
    }
}
