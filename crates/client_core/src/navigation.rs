use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Landing,
    Assessment,
    Results,
}

impl View {
    pub fn path(self) -> &'static str {
        match self {
            View::Landing => "/",
            View::Assessment => "/assessment",
            View::Results => "/results",
        }
    }

}

/// Programmatic route transitions.
pub trait Navigator: Send + Sync {
    fn navigate(&self, view: View);
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<View>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<View> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn current(&self) -> Option<View> {
        self.history().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, view: View) {
        tracing::debug!(path = view.path(), "navigate");
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(view);
    }
}
