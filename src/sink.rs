use std::{
    fmt,
    io::{self, Write},
    sync::{Arc, Mutex, PoisonError},
};

use tracing::debug;

/// Receiver of timer messages at debug severity.
pub trait LogSink: Send + Sync {
    fn debug(&self, message: &str) -> anyhow::Result<()>;
}

/// Forwards timer messages to `tracing` at debug level.
#[derive(Debug, Clone)]
pub struct TracingSink {
    label: String,
}

impl TracingSink {
    pub fn new<S: ToString>(label: S) -> Self {
        Self {
            label: label.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new("performance_timer")
    }
}

impl LogSink for TracingSink {
    fn debug(&self, message: &str) -> anyhow::Result<()> {
        debug!(timer = %self.label, "{message}");
        Ok(())
    }
}

/// Line-oriented human readable output, stdout unless redirected.
#[derive(Clone)]
pub struct Console(Arc<Mutex<dyn Write + Send>>);

impl Console {
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self(Arc::new(Mutex::new(writer)))
    }

    pub(crate) fn write_line(&self, message: &str) -> io::Result<()> {
        let mut writer = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{message}")?;
        writer.flush()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Console")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_sink() {
        crate::init();
        let sink = TracingSink::new("jobs");
        assert_eq!(sink.label(), "jobs");
        sink.debug("Timer \"jobs\" - start monitoring").unwrap();
        assert_eq!(TracingSink::default().label(), "performance_timer");
    }

    #[test]
    fn test_console_lines() {
        #[derive(Clone, Default)]
        struct Buf(Arc<Mutex<Vec<u8>>>);
        impl Write for Buf {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().write(buf)
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buf = Buf::default();
        let console = Console::from_writer(buf.clone());
        console.write_line("first").unwrap();
        console.clone().write_line("second").unwrap();
        assert_eq!(&*buf.0.lock().unwrap(), b"first\nsecond\n");
    }
}
