//! Common types and utilities for gnbsim
//!
//! Shared by the codec and crypto crates:
//!
//! - [`bcd`]: telephony BCD digit packing
//! - [`types`]: PLMN and subscriber identity
//! - [`config`]: subscriber profiles loaded from YAML or JSON
//! - [`logging`]: `tracing` setup and NAS message tracing
//! - [`error`]: the shared [`Error`] type

pub mod bcd;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use bcd::BcdError;
pub use config::{OpType, SubscriberProfile, AUTH_KEY_SIZE};
pub use error::Error;
pub use logging::{init_logging, init_logging_with_filter, log_nas_message, Direction, HexDump, LogLevel};
pub use types::{Plmn, ProtectionScheme, SubscriberIdentity};
