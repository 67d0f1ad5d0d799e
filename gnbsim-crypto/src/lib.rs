//! Cryptographic algorithms for gnbsim
//!
//! - [`milenage`]: 3GPP TS 35.206 authentication functions f1 to f5*
//! - [`kdf`]: TS 33.220 generic KDF and the 5G-AKA RES* derivation
//! - [`aes`]: the AES-128 single-block primitive Milenage runs on

pub mod aes;
pub mod kdf;
pub mod milenage;

pub use kdf::{derive_res_star, hmac_sha256, kdf};
pub use milenage::{compute_opc, Milenage, MilenageOutput};
