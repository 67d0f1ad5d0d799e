//! 5GMM (5G Mobility Management) Messages
//!
//! ## Registration Messages
//!
//! - [`RegistrationRequest`] - UE to network registration request
//! - [`RegistrationComplete`] - UE to network registration complete
//!
//! ## Authentication Messages
//!
//! - [`AuthenticationRequest`] - Network to UE authentication request
//! - [`AuthenticationResponse`] - UE to network authentication response
//! - [`AuthenticationFailure`] - UE to network authentication failure
//!
//! ## Security Mode Messages
//!
//! - [`SecurityModeComplete`] - UE to network security mode complete
//!
//! ## NAS Transport Messages
//!
//! - [`UlNasTransport`] - UE to network NAS transport

pub mod authentication;
pub mod nas_transport;
pub mod registration;
pub mod security_mode;

pub use authentication::{AuthenticationFailure, AuthenticationRequest, AuthenticationResponse};
pub use nas_transport::UlNasTransport;
pub use registration::{RegistrationComplete, RegistrationRequest};
pub use security_mode::SecurityModeComplete;
