use thiserror::Error;

/// Errors from the I/O-facing parts of the crate (terminal, network, config).
///
/// The chess UI itself never fails: rejected input is reported through
/// [`crate::game::Outcome`] and leaves the state unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported baud rate {0} (expected 300, 1200, 4800 or 9600)")]
    UnsupportedBaud(u32),
    #[error("connection to {0} closed")]
    ConnectionClosed(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid square '{0}'")]
    InvalidSquare(String),
    #[error("serial port: {0}")]
    Serial(#[from] serialport::Error),
    #[error("ssh: {0}")]
    Ssh(#[from] ssh2::Error),
    #[error("ssh login refused for {0}")]
    AuthFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
