use std::{fmt, sync::Arc, time::Duration};

use serde_json::Value;

use crate::{
    error::{TimerError, TimerResult},
    sink::{Console, LogSink, TracingSink},
};

/// Display precision read from a float the way a `W.D` format spec is read:
/// `W` is the minimum field width and `D` the number of decimal digits.
///
/// * `0.1` -> `x.y`
/// * `0.3` -> `x.yyy`
/// * `8.2` -> `    x.yy`
/// * `2.0` -> ` x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    width: usize,
    digits: usize,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            width: 0,
            digits: 1,
        }
    }
}

impl Precision {
    pub fn from_f64(value: f64) -> TimerResult<Self> {
        if !value.is_finite() || value.is_sign_negative() {
            return Err(TimerError::InvalidPrecision(format!(
                "{value} is not a positive real number"
            )));
        }

        // `2.0` renders as "2", read like a `2.0f` spec.
        let repr = value.to_string();
        let (width, digits) = repr.split_once('.').unwrap_or((repr.as_str(), "0"));
        let parse = |part: &str| {
            part.parse::<u8>().map(usize::from).map_err(|_| {
                TimerError::InvalidPrecision(format!("{value} is out of the displayable range"))
            })
        };

        Ok(Self {
            width: parse(width)?,
            digits: parse(digits)?,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Render `elapsed` in seconds.
    pub fn format(&self, elapsed: Duration) -> String {
        format!(
            "{:width$.digits$}",
            elapsed.as_secs_f64(),
            width = self.width,
            digits = self.digits
        )
    }
}

/// Construction values shared by `Timer` and `FunctionMonitor`.
#[derive(Clone)]
pub struct TimerConfig {
    precision: f64,
    with_print: bool,
    logger: Option<Arc<dyn LogSink>>,
    console: Console,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            precision: 0.1,
            with_print: true,
            logger: None,
            console: Console::stdout(),
        }
    }
}

impl fmt::Debug for TimerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerConfig")
            .field("precision", &self.precision)
            .field("with_print", &self.with_print)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl TimerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_print(mut self, with_print: bool) -> Self {
        self.with_print = with_print;
        self
    }

    pub fn logger<L: LogSink + 'static>(self, logger: L) -> Self {
        self.shared_logger(Arc::new(logger))
    }

    pub fn shared_logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    pub fn get_precision(&self) -> f64 {
        self.precision
    }

    pub fn get_with_print(&self) -> bool {
        self.with_print
    }

    pub fn has_logger(&self) -> bool {
        self.logger.is_some()
    }

    pub(crate) fn get_logger(&self) -> Option<&dyn LogSink> {
        self.logger.as_deref()
    }

    pub(crate) fn get_console(&self) -> &Console {
        &self.console
    }

    pub(crate) fn validate(&self) -> TimerResult<Precision> {
        Precision::from_f64(self.precision)
    }

    /// Load settings such as `{"precision": 0.2, "with_print": false, "log_target": "jobs"}`.
    ///
    /// Every key is optional and unknown keys are ignored. A `log_target`
    /// installs a `TracingSink` labelled with it.
    pub fn from_json(json: &str) -> TimerResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| TimerError::InvalidSettings(e.to_string()))?;
        let Value::Object(settings) = &value else {
            return Err(TimerError::InvalidSettings(format!(
                "expected a JSON object, found {value}"
            )));
        };

        let mut config = Self::default();

        if let Some(precision) = settings.get("precision") {
            config.precision = match precision {
                Value::Number(n) if n.is_f64() => n.as_f64().unwrap_or(f64::NAN),
                other => {
                    return Err(TimerError::InvalidPrecision(format!(
                        "expected a float, found {other}"
                    )))
                }
            };
        }

        if let Some(with_print) = settings.get("with_print") {
            config.with_print = match with_print {
                Value::Bool(with_print) => *with_print,
                other => {
                    return Err(TimerError::InvalidConsoleFlag(format!(
                        "expected a boolean, found {other}"
                    )))
                }
            };
        }

        match settings.get("log_target") {
            None | Some(Value::Null) => {}
            Some(Value::String(target)) if !target.is_empty() => {
                config = config.logger(TracingSink::new(target));
            }
            Some(other) => {
                return Err(TimerError::InvalidLogSink(format!(
                    "expected a non-empty target name, found {other}"
                )))
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_digits() {
        let cases = [
            (0.1, 0, 1),
            (0.2, 0, 2),
            (0.3, 0, 3),
            (0.001, 0, 1),
            (8.2, 8, 2),
            (0.12, 0, 12),
            (0.0, 0, 0),
            (2.0, 2, 0),
        ];
        for (value, width, digits) in cases {
            let precision = Precision::from_f64(value).unwrap();
            assert_eq!((precision.width(), precision.digits()), (width, digits), "{value}");
        }
    }

    #[test]
    fn test_precision_format() {
        let elapsed = Duration::from_millis(1500);
        assert_eq!(Precision::from_f64(0.1).unwrap().format(elapsed), "1.5");
        assert_eq!(Precision::from_f64(0.3).unwrap().format(elapsed), "1.500");
        assert_eq!(Precision::from_f64(8.2).unwrap().format(elapsed), "    1.50");
        assert_eq!(Precision::default().format(elapsed), "1.5");
        assert_eq!(Precision::from_f64(0.0).unwrap().format(elapsed), "2");
        assert_eq!(Precision::from_f64(2.0).unwrap().format(elapsed), " 2");
    }

    #[test]
    fn test_precision_rejected() {
        for value in [f64::NAN, f64::NEG_INFINITY, -0.2, 300.0, 1000.5, 0.1234] {
            assert!(
                matches!(Precision::from_f64(value), Err(TimerError::InvalidPrecision(_))),
                "{value}"
            );
        }
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"precision": 0.2, "with_print": false, "log_target": "jobs"}"#;
        let config = TimerConfig::from_json(json).unwrap();
        assert_eq!(config.get_precision(), 0.2);
        assert!(!config.get_with_print());
        assert!(config.has_logger());

        let config = TimerConfig::from_json(r#"{"log_target": null, "unused": 1}"#).unwrap();
        assert_eq!(config.get_precision(), 0.1);
        assert!(config.get_with_print());
        assert!(!config.has_logger());

        let config = TimerConfig::from_json(r#"{"precision": 1.0}"#).unwrap();
        assert_eq!(config.validate().unwrap().digits(), 0);
    }

    #[test]
    fn test_from_json_wrong_types() {
        let err = |json: &str| TimerConfig::from_json(json).unwrap_err();

        assert!(matches!(err(r#"{"precision": "test"}"#), TimerError::InvalidPrecision(_)));
        assert!(matches!(err(r#"{"precision": 1}"#), TimerError::InvalidPrecision(_)));
        assert!(matches!(err(r#"{"precision": -0.1}"#), TimerError::InvalidPrecision(_)));
        assert!(matches!(err(r#"{"with_print": "test"}"#), TimerError::InvalidConsoleFlag(_)));
        assert!(matches!(err(r#"{"with_print": 1}"#), TimerError::InvalidConsoleFlag(_)));
        assert!(matches!(err(r#"{"log_target": 7}"#), TimerError::InvalidLogSink(_)));
        assert!(matches!(err(r#"{"log_target": ""}"#), TimerError::InvalidLogSink(_)));
        assert!(matches!(err("[0.1]"), TimerError::InvalidSettings(_)));
        assert!(matches!(err("{"), TimerError::InvalidSettings(_)));
    }
}
