use crate::{constants::ConfigError, time::TimeError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid time: {0}")]
    Time(#[from] TimeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Screen clearing failed: {0}")]
    ClearScreen(#[from] clearscreen::Error),

    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_hhmm;

    #[test]
    fn error_display() {
        let err = AppError::from(ConfigError::EmptyVar("DISPATCH_START_TIME"));
        assert!(err.to_string().starts_with("Configuration error: Environment variable"));

        let err = AppError::from(parse_hhmm("7:00").unwrap_err());
        assert_eq!(err.to_string(), "Invalid time: invalid time '7:00': expected HH:MM format");
    }
}
