//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::dashboard::{Action, Dashboard, Outcome};
use crate::error::DashboardError;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// All persisted dashboard state
    pub dashboard: RwSignal<Dashboard>,
    /// Trigger to aggregate feeds again - read
    pub feeds_trigger: ReadSignal<u32>,
    /// Trigger to aggregate feeds again - write
    set_feeds_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(dashboard: Dashboard, feeds_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            dashboard: RwSignal::new(dashboard),
            feeds_trigger: feeds_trigger.0,
            set_feeds_trigger: feeds_trigger.1,
        }
    }

    /// Apply an action. Subscribers are notified only when something changed;
    /// a changed custom feed list also re-runs the aggregation.
    pub fn dispatch(&self, action: Action) -> Result<Outcome, DashboardError> {
        let result = self
            .dashboard
            .try_maybe_update(|dashboard| {
                let result = dashboard.dispatch(action);
                let changed = matches!(result, Ok(Outcome::Updated | Outcome::FeedsChanged));
                (changed, result)
            })
            .unwrap_or(Ok(Outcome::Unchanged));

        if let Ok(Outcome::FeedsChanged) = result {
            self.reload_feeds();
        }
        result
    }

    /// Dispatch and log failures. For actions whose failures need no notice.
    pub fn apply(&self, action: Action) -> Outcome {
        match self.dispatch(action) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("[APP] {}", e);
                Outcome::Unchanged
            }
        }
    }

    /// Trigger a new feed aggregation
    pub fn reload_feeds(&self) {
        self.set_feeds_trigger.update(|v| *v += 1);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
