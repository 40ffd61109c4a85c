use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SystemEntry {
    #[error("Online now")]
    Online,
    #[error("Initializing")]
    Initializing,
    #[error("Initialization completed")]
    InitializeComplete,
    #[error("Termination in process")]
    Terminating,
    #[error("Termination completed")]
    TerminateComplete,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Configuration not found: {0}")]
    ConfigNotFound(IoError),
    #[error("Unable to parse configuration: {0}")]
    ConfigParseError(String),
    #[error("Unable to build inference client: {0}")]
    ClientBuildError(String),
    #[error("Font unavailable, captions disabled: {0}")]
    FontUnavailable(String),
    #[error("Failed to bind port {0}: {1}")]
    BindPortError(u16, IoError),
    #[error("Web service ready on port {0}")]
    WebReady(u16),
    #[error("Web service panic: {0}")]
    WebPanic(IoError),
}

impl From<SystemEntry> for String {
    #[inline(always)]
    fn from(value: SystemEntry) -> Self {
        value.to_string()
    }
}
