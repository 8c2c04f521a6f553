//! Advice parameters: how one advice round-trip is issued.
//!
//! [`AdviceParams`] groups the static parameters used by
//! [`RequestAdviceUseCase`](crate::use_cases::request_advice::RequestAdviceUseCase).
//! They come from the `[advice]` configuration section.

use aurelio_domain::AdviceModel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Parameters for one advice request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceParams {
    /// Model identifier sent to the service.
    pub model: AdviceModel,
    /// Sampling temperature.
    pub temperature: f32,
    /// Render only the last N transcript messages (None = all).
    pub history_window: Option<usize>,
    /// Upper bound on one round-trip (None = the transport decides).
    pub timeout: Option<Duration>,
}

impl Default for AdviceParams {
    fn default() -> Self {
        Self {
            model: AdviceModel::default(),
            temperature: DEFAULT_TEMPERATURE,
            history_window: None,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl AdviceParams {
    pub fn with_model(mut self, model: AdviceModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_history_window(mut self, window: Option<usize>) -> Self {
        self.history_window = window;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
