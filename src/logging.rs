use tracing::Dispatch;
use tracing::dispatcher;

/// Logging capability handed to the middleware at construction time.
///
/// Wraps a [`tracing::Dispatch`]. Events emitted through [`Logger::in_scope`]
/// go to that dispatcher only; [`Logger::ambient`] defers to whatever
/// subscriber is current on the calling thread.
#[derive(Clone, Default)]
pub struct Logger {
    dispatch: Option<Dispatch>,
}

impl Logger {
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    pub fn ambient() -> Self {
        Self::default()
    }

    pub fn is_injected(&self) -> bool {
        self.dispatch.is_some()
    }

    pub(crate) fn in_scope<T>(&self, emit: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => dispatcher::with_default(dispatch, emit),
            None => emit(),
        }
    }
}

impl From<Dispatch> for Logger {
    fn from(dispatch: Dispatch) -> Self {
        Self::new(dispatch)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("injected", &self.is_injected())
            .finish()
    }
}

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;
