use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const COUNTED_TEMPLATE: &str = "{spinner:.green} [{pos}/{len}] {msg}";

enum Shape {
    Spinner,
    /// One step per genome.
    Counted(u64),
}

/// Progress display for one pipeline phase.
pub(crate) struct ProgressBarBuilder {
    shape: Shape,
    message: String,
    tick: Option<Duration>,
}

impl ProgressBarBuilder {
    pub(crate) fn spinner(message: impl Into<String>) -> Self {
        Self {
            shape: Shape::Spinner,
            message: message.into(),
            tick: None,
        }
    }

    pub(crate) fn counted(steps: u64, message: impl Into<String>) -> Self {
        Self {
            shape: Shape::Counted(steps),
            ..Self::spinner(message)
        }
    }

    /// Keeps the spinner moving while a phase blocks on file I/O.
    pub(crate) fn ticking(mut self, every: Duration) -> Self {
        self.tick = Some(every);
        self
    }

    pub(crate) fn build(self) -> Result<ProgressBar> {
        let (pb, template) = match self.shape {
            Shape::Spinner => (ProgressBar::new_spinner(), SPINNER_TEMPLATE),
            Shape::Counted(steps) => (ProgressBar::new(steps), COUNTED_TEMPLATE),
        };
        pb.set_style(ProgressStyle::default_spinner().template(template)?);
        pb.set_message(self.message);
        if let Some(every) = self.tick {
            pb.enable_steady_tick(every);
        }
        Ok(pb)
    }
}
