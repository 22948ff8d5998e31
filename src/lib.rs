//! Named elapsed-time intervals, and wrappers that time every call of a
//! synchronous or asynchronous function.
//!
//! ```no_run
//! use performance_timer::{FunctionMonitor, Timer, TimerConfig};
//!
//! # fn main() -> performance_timer::TimerResult<()> {
//! let mut timer = Timer::new(TimerConfig::new().precision(0.2))?;
//! timer.start("job")?;
//! // ...
//! timer.stop("job")?;
//!
//! let monitor = FunctionMonitor::default();
//! let square = monitor.wrap("square", |x: u64| x * x);
//! assert_eq!(square.call(4)?, 16);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod monitor;
mod sink;
mod timer;
mod util;

pub use config::{Precision, TimerConfig};
pub use error::{TimerError, TimerResult};
pub use monitor::{AsyncWrapper, FunctionMonitor, Monitored, SyncWrapper};
pub use sink::{Console, LogSink, TracingSink};
pub use timer::{Timer, DEFAULT_TIMER_ID};

/// Install the global tracing subscriber, so `TracingSink` output shows up.
pub fn init() {
    util::log::init();
}
