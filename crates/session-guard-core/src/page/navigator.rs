use std::sync::{Mutex, PoisonError};

/// The current page location and the ability to leave it.
pub trait Navigator: Send + Sync {
    /// Path component of the current location, e.g. `/books`.
    fn current_path(&self) -> String;

    /// Navigate to `path`.
    fn redirect(&self, path: &str);
}

#[derive(Debug)]
struct NavState {
    path: String,
    redirects: Vec<String>,
}

/// Navigator that only records where it was sent.
#[derive(Debug)]
pub struct RecordingNavigator {
    state: Mutex<NavState>,
}

impl RecordingNavigator {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(NavState {
                path: path.into(),
                redirects: Vec::new(),
            }),
        }
    }

    /// Every redirect target, oldest first.
    pub fn redirects(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .redirects
            .clone()
    }

    pub fn last_redirect(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .redirects
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .path
            .clone()
    }

    fn redirect(&self, path: &str) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.path = path.to_string();
        state.redirects.push(path.to_string());
    }
}
