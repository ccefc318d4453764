use intake_config::ConfigError;
use intake_core::CoreError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Failures that stop the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}
