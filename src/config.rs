//! Optional JSON settings file; command-line flags override it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::display::Baud;
use crate::error::Result;

pub const DEFAULT_DEVICE: &str = "/dev/ttyUSB0";
pub const DEFAULT_RELAY_HOST: &str = "freechess.org";
pub const DEFAULT_RELAY_PORT: u16 = 5000;
pub const DEFAULT_SSH_PORT: u16 = 22;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial device the terminal is attached to.
    pub device: PathBuf,
    /// Speed the terminal is at when the program starts; detected when unset.
    pub serial_baud: Option<u32>,
    /// Speed to switch the terminal to before drawing; left alone when unset.
    pub terminal_baud: Option<u32>,
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub host: String,
    /// Telnet port.
    pub port: u16,
    pub poll_ms: u64,
    /// Log in over SSH instead of plain Telnet.
    pub ssh: bool,
    pub ssh_port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self { Self { device: PathBuf::from(DEFAULT_DEVICE), serial_baud: None, terminal_baud: None, relay: RelayConfig::default() } }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RELAY_HOST.to_string(),
            port: DEFAULT_RELAY_PORT,
            poll_ms: 50,
            ssh: false,
            ssh_port: DEFAULT_SSH_PORT,
            user: None,
            password: None,
        }
    }
}

impl RelayConfig {
    pub fn poll_interval(&self) -> Duration { Duration::from_millis(self.poll_ms) }

    /// Port for the selected protocol.
    pub fn active_port(&self) -> u16 { if self.ssh { self.ssh_port } else { self.port } }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg = Self::from_json(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> Result<Self> { Ok(serde_json::from_str(text)?) }

    pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }

    /// The configured terminal speed, rejected unless the terminal supports it.
    pub fn baud(&self) -> Result<Option<Baud>> { self.terminal_baud.map(Baud::try_from).transpose() }

    /// The speed to open the line at, if known up front.
    pub fn serial_baud(&self) -> Result<Option<Baud>> { self.serial_baud.map(Baud::try_from).transpose() }
}
