//! Loading indicator driven by the session's advice phase

use aurelio_application::AdvicePhase;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

const THINKING: &str = "Pensando...";

/// Shows a spinner while the advice phase is `Sending`
pub struct AdviceIndicator;

impl AdviceIndicator {
    pub fn new() -> Self {
        Self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Aurelio");
        pb.set_message(THINKING);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Drive `work` to completion, following `phases` to show or hide the spinner.
    ///
    /// The spinner is always cleared before the output of `work` is returned.
    pub async fn track<F>(&self, mut phases: watch::Receiver<AdvicePhase>, work: F) -> F::Output
    where
        F: Future,
    {
        tokio::pin!(work);
        let mut spinner: Option<ProgressBar> = None;
        let mut watching = true;

        loop {
            tokio::select! {
                output = &mut work => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    return output;
                }
                changed = phases.changed(), if watching => {
                    if changed.is_err() {
                        watching = false;
                        continue;
                    }
                    let sending = phases.borrow_and_update().is_sending();
                    match (sending, spinner.is_some()) {
                        (true, false) => spinner = Some(self.start_spinner()),
                        (false, true) => {
                            if let Some(pb) = spinner.take() {
                                pb.finish_and_clear();
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}

impl Default for AdviceIndicator {
    fn default() -> Self {
        Self::new()
    }
}
