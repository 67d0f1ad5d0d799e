//! Logging setup and NAS message tracing
//!
//! Built on `tracing`. Encoded and decoded PDUs are reported at debug level
//! with their hex payload at trace level, so `RUST_LOG=gnbsim_nas=trace`
//! shows full wire dumps.

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose, includes hex dumps
    Trace,
    /// Per-message summaries
    Debug,
    /// Procedure outcomes (default)
    #[default]
    Info,
    /// Rejections and unsupported content
    Warn,
    /// Errors only
    Error,
}

impl LogLevel {
    /// Filter directive for this level.
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(Error::Config(format!("unknown log level: {s}"))),
        }
    }
}

/// Installs the global subscriber at the given level.
///
/// `RUST_LOG` overrides `level` when set. Fails if a global subscriber is
/// already installed.
pub fn init_logging(level: LogLevel) -> Result<(), Error> {
    init_logging_with_filter(level.as_str())
}

/// Installs the global subscriber with a filter directive such as
/// `"info,gnbsim_nas=trace"`.
pub fn init_logging_with_filter(directives: &str) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialised: {e}")))
}

/// Direction of a NAS message relative to the simulated device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Received from the network (downlink)
    Rx,
    /// Sent to the network (uplink)
    Tx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Rx => "RX",
            Direction::Tx => "TX",
        })
    }
}

/// Logs a NAS PDU summary at debug level and its payload at trace level.
///
/// ```
/// use gnbsim_common::logging::{log_nas_message, Direction};
///
/// log_nas_message(Direction::Tx, "Registration Request", &[0x7e, 0x00, 0x41]);
/// ```
pub fn log_nas_message(direction: Direction, message_type: &str, pdu: &[u8]) {
    tracing::debug!(
        direction = %direction,
        message_type,
        len = pdu.len(),
        "{direction} NAS {message_type}"
    );
    tracing::trace!(hex = %HexDump(pdu), "NAS payload");
}

/// Lower-case hex rendering of a byte slice for log fields
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
