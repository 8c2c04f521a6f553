//! Application-level configuration.
//!
//! - [`AdviceParams`]: model, temperature, history window and timeout for advice requests

pub mod advice_params;

pub use advice_params::{AdviceParams, DEFAULT_TEMPERATURE};
