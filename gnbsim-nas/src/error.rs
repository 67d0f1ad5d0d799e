//! NAS codec error type

use gnbsim_common::ProtectionScheme;
use thiserror::Error;

use crate::aka::{AuthState, AuthenticationMismatch};
use crate::ies::InformationElement;

/// Errors raised while encoding or decoding NAS PDUs.
///
/// Structural variants abort decoding of the current PDU and leave subscriber
/// state untouched; see [`NasError::is_structural`]. A MAC mismatch is a
/// protocol-level rejection, reported through
/// [`NasError::AuthenticationMismatch`].
#[derive(Debug, Error)]
pub enum NasError {
    /// PDU too short to hold a plain NAS header.
    #[error("Malformed header: PDU has {length} bytes, need {required}")]
    MalformedHeader {
        /// Bytes available
        length: usize,
        /// Bytes required for the header
        required: usize,
    },

    /// First octet is not a known extended protocol discriminator.
    #[error("Invalid extended protocol discriminator 0x{0:02X}")]
    InvalidProtocolDiscriminator(u8),

    /// Security protected PDUs are not handled.
    #[error("Unsupported security header type {0}")]
    UnsupportedSecurityHeader(u8),

    /// IEI with no decoder registered for this message.
    #[error("Unsupported IE 0x{iei:02X} at offset {offset} after {} decoded IEs", .decoded.len())]
    UnsupportedInformationElement {
        /// The unknown identifier
        iei: u8,
        /// Offset of the identifier within the PDU
        offset: usize,
        /// IEs decoded before the unknown one
        decoded: Vec<InformationElement>,
    },

    /// Declared or fixed IE length runs past the end of the PDU.
    #[error("Truncated {ie} at offset {offset}: need {needed} bytes, {remaining} remain")]
    TruncatedInformationElement {
        /// Name of the field being read
        ie: &'static str,
        /// Offset where the read started
        offset: usize,
        /// Bytes the field requires
        needed: usize,
        /// Bytes left in the PDU
        remaining: usize,
    },

    /// IE length is out of range for its type.
    #[error("Invalid length {length} for {ie}")]
    InvalidIeLength {
        /// Name of the IE
        ie: &'static str,
        /// Length found on the wire
        length: usize,
    },

    /// IE value outside the range defined for it.
    #[error("Invalid value 0x{value:02X} for {ie}")]
    InvalidIeValue {
        /// Name of the IE
        ie: &'static str,
        /// Octet found on the wire
        value: u8,
    },

    /// IE decoded by the dispatch table but not defined for the message.
    #[error("{ie} is not allowed in {message}")]
    UnexpectedInformationElement {
        /// Message being decoded
        message: &'static str,
        /// Name of the IE
        ie: &'static str,
    },

    /// Mandatory IE absent from a message.
    #[error("Missing mandatory IE {0}")]
    MissingInformationElement(&'static str),

    /// Identity digits cannot be represented in their fixed-width field.
    #[error("Invalid identity encoding: {0}")]
    InvalidIdentityEncoding(String),

    /// SUCI protection scheme this codec cannot compute.
    #[error("Unsupported protection scheme {0:?}")]
    UnsupportedProtectionScheme(ProtectionScheme),

    /// Authentication Response requested without a verified challenge.
    #[error("No derived response available in state {0}")]
    NoDerivedResponse(AuthState),

    /// Computed MAC-A differs from the MAC received in AUTN.
    #[error(transparent)]
    AuthenticationMismatch(#[from] AuthenticationMismatch),

    /// Invalid subscriber profile.
    #[error(transparent)]
    Config(#[from] gnbsim_common::Error),
}

impl NasError {
    /// True for errors describing a malformed or unsupported PDU layout.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            NasError::MalformedHeader { .. }
                | NasError::InvalidProtocolDiscriminator(_)
                | NasError::UnsupportedSecurityHeader(_)
                | NasError::UnsupportedInformationElement { .. }
                | NasError::TruncatedInformationElement { .. }
                | NasError::InvalidIeLength { .. }
                | NasError::InvalidIeValue { .. }
                | NasError::UnexpectedInformationElement { .. }
                | NasError::MissingInformationElement(_)
        )
    }

    /// True if the network failed the AKA MAC check.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, NasError::AuthenticationMismatch(_))
    }
}

/// Result alias for NAS operations
pub type NasResult<T> = Result<T, NasError>;
