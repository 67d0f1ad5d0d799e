//! 5G NAS codec and AKA engine for gnbsim
//!
//! Encodes the plain 5GMM/5GSM messages a simulated device sends during
//! registration and PDU session setup, and decodes the network's
//! Authentication Request, verifying its challenge with Milenage.
//!
//! # Message Structure
//!
//! NAS messages consist of:
//! - A plain header, 3 octets for 5GMM and 4 for 5GSM ([`header`])
//! - Message-specific information elements ([`ies`])
//!
//! Security protected PDUs are rejected at the header.
//!
//! # Example
//!
//! ```rust
//! use gnbsim_common::{Plmn, SubscriberIdentity};
//! use gnbsim_nas::NasCodec;
//!
//! let identity = SubscriberIdentity::new("0123456789", Plmn::new(123, 45, false), "1234").unwrap();
//! let pdu = NasCodec::new().encode_registration_request(&identity).unwrap();
//! assert_eq!(&pdu[..3], &[0x7e, 0x00, 0x41]);
//! ```

pub mod aka;
pub mod codec;
pub mod enums;
pub mod error;
pub mod header;
pub mod ies;
pub mod messages;
pub mod ue;

pub use aka::{AkaVectors, AuthState, AuthenticationMismatch};
pub use codec::{DecodedMessage, NasCodec};
pub use enums::{ExtendedProtocolDiscriminator, MmCause, MmMessageType, SecurityHeaderType, SmMessageType};
pub use error::{NasError, NasResult};
pub use header::{NasHeader, PlainMmHeader, PlainSmHeader};
pub use ies::{
    decode_auth_param_autn, decode_auth_param_rand, decode_information_elements, encode_5gmm_capability,
    encode_mobile_identity, encode_ue_security_capability, IeAuthParamAutn, IeAuthParamRand, IeTable,
    InformationElement,
};
pub use ue::{AuthParams, Subscriber};
