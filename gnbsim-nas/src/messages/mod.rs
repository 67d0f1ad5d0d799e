//! NAS 5G Messages
//!
//! Messages exchanged during registration and PDU session setup, as defined
//! in 3GPP TS 24.501. Each message decodes from the offset after its header
//! and encodes header included.
//!
//! ## Message Categories
//!
//! - 5GMM (Mobility Management) messages - [`mm`]
//! - 5GSM (Session Management) messages - [`sm`]

pub mod mm;
pub mod sm;

pub use mm::*;
pub use sm::*;
