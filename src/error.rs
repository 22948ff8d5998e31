use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimerError {
    #[error("invalid precision: {0}")]
    InvalidPrecision(String),

    #[error("invalid console flag: {0}")]
    InvalidConsoleFlag(String),

    #[error("invalid log sink: {0}")]
    InvalidLogSink(String),

    #[error("invalid timer settings: {0}")]
    InvalidSettings(String),

    #[error("timer id \"{0}\" already exists")]
    AlreadyOpen(String),

    #[error("timer id \"{0}\" does not exist")]
    Unknown(String),

    #[error("failed to write to console: {0}")]
    Console(#[from] std::io::Error),

    #[error(transparent)]
    Sink(#[from] anyhow::Error),
}

pub type TimerResult<T> = Result<T, TimerError>;

impl TimerError {
    /// Whether this error was raised while validating a `TimerConfig`.
    pub fn is_invalid_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidPrecision(_)
                | Self::InvalidConsoleFlag(_)
                | Self::InvalidLogSink(_)
                | Self::InvalidSettings(_)
        )
    }
}
