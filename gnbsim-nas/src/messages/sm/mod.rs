//! 5GSM (5G Session Management) Messages
//!
//! - [`PduSessionEstablishmentRequest`] - UE to network PDU session establishment

pub mod pdu_session_establishment;

pub use pdu_session_establishment::{PduSessionEstablishmentRequest, FULL_DATA_RATE};
