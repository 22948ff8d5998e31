
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tracing::trace;

use crate::{
    config::{Precision, TimerConfig},
    error::{TimerError, TimerResult},
};

pub const DEFAULT_TIMER_ID: &str = "default";

/// Named intervals measured against a monotonic clock.
///
/// An id is open between a successful `start` and its matching `stop`.
/// Intervals belong to the instance, so two timers may both use
/// `DEFAULT_TIMER_ID` without seeing each other. Sharing one instance
/// between threads needs outside synchronization.
#[derive(Debug, Default)]
pub struct Timer {
    config: TimerConfig,
    precision: Precision,
    timers: HashMap<String, Instant>,
}

impl Timer {
    pub fn new(config: TimerConfig) -> TimerResult<Self> {
        let precision = config.validate()?;
        Ok(Self {
            config,
            precision,
            timers: HashMap::new(),
        })
    }

    /// Open `timer_id`. Returns the timer so calls chain: `timer.start("a")?.start("b")?`.
    pub fn start(&mut self, timer_id: &str) -> TimerResult<&mut Self> {
        if self.timers.contains_key(timer_id) {
            return Err(TimerError::AlreadyOpen(timer_id.to_owned()));
        }

        self.timers.insert(timer_id.to_owned(), Instant::now());
        trace!(timer_id, open = self.timers.len(), "interval opened");
        self.report(&start_message(timer_id))?;

        Ok(self)
    }

    /// Close `timer_id` and report the time elapsed since its `start`.
    pub fn stop(&mut self, timer_id: &str) -> TimerResult<&mut Self> {
        let t0 = *self
            .timers
            .get(timer_id)
            .ok_or_else(|| TimerError::Unknown(timer_id.to_owned()))?;

        let elapsed = t0.elapsed();
        self.report(&stop_message(timer_id, &self.precision, elapsed))?;
        self.timers.remove(timer_id);
        trace!(timer_id, open = self.timers.len(), "interval closed");

        Ok(self)
    }

    pub fn start_default(&mut self) -> TimerResult<&mut Self> {
        self.start(DEFAULT_TIMER_ID)
    }

    pub fn stop_default(&mut self) -> TimerResult<&mut Self> {
        self.stop(DEFAULT_TIMER_ID)
    }

    pub fn is_running(&self, timer_id: &str) -> bool {
        self.timers.contains_key(timer_id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    fn report(&self, message: &str) -> TimerResult<()> {
        if self.config.get_with_print() {
            self.config.get_console().write_line(message)?;
        }
        if let Some(logger) = self.config.get_logger() {
            logger.debug(message)?;
        }
        Ok(())
    }
}

fn start_message(timer_id: &str) -> String {
    format!("Timer \"{timer_id}\" - start monitoring")
}

fn stop_message(timer_id: &str, precision: &Precision, elapsed: Duration) -> String {
    format!(
        "Timer \"{timer_id}\" - monitored time: {} seconds",
        precision.format(elapsed)
    )
}
