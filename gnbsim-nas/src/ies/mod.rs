//! Information elements (TS 24.501 9.11)
//!
//! IEs are grouped by wire format, as in TS 24.007 11.2.1:
//!
//! - [`ie1`]: half-octet values (ngKSI, registration type, ...)
//! - [`ie3`]: fixed-length values with no length octet (RAND)
//! - [`ie4`]: TLV with a one-octet length (AUTN, capabilities, ABBA)
//! - [`ie6`]: TLV-E with a two-octet length (mobile identity, containers)
//!
//! Decoders take the whole PDU plus the offset just past the IEI and return
//! the value with the offset following it. They never index past the end of
//! the PDU; short input is reported as
//! [`NasError::TruncatedInformationElement`].

pub mod ie1;
pub mod ie3;
pub mod ie4;
pub mod ie6;
pub mod table;

use bytes::Buf;
use gnbsim_common::SubscriberIdentity;

use crate::error::{NasError, NasResult};

pub use ie1::{
    tv1, Ie5gsRegistrationType, IdentityType, NasKeySetIdentifier, PayloadContainerType,
    PduSessionType, RegistrationType, RequestType, SecurityContextType, SscMode, SupiFormat,
};
pub use ie3::IeAuthParamRand;
pub use ie4::{Abba, IeAuthParamAutn, IeAuthResponseParameter, IeFiveGmmCapability, IeUeSecurityCapability};
pub use ie6::{IeMobileIdentity, IeNasMessageContainer, IePayloadContainer, SchemeOutput};
pub use table::{IeDecoder, IeTable, AUTHENTICATION_REQUEST_IES, REGISTRATION_REQUEST_IES};

/// Information element identifiers (TS 24.501 chapter 8)
pub mod iei {
    /// 5GMM capability
    pub const FIVEGMM_CAPABILITY: u8 = 0x10;
    /// PDU session identity 2
    pub const PDU_SESSION_ID: u8 = 0x12;
    /// Authentication parameter AUTN
    pub const AUTHENTICATION_PARAMETER_AUTN: u8 = 0x20;
    /// Authentication parameter RAND
    pub const AUTHENTICATION_PARAMETER_RAND: u8 = 0x21;
    /// Authentication response parameter
    pub const AUTHENTICATION_RESPONSE_PARAMETER: u8 = 0x2D;
    /// UE security capability
    pub const UE_SECURITY_CAPABILITY: u8 = 0x2E;
    /// Authentication failure parameter
    pub const AUTHENTICATION_FAILURE_PARAMETER: u8 = 0x30;
    /// NAS message container
    pub const NAS_MESSAGE_CONTAINER: u8 = 0x71;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
    /// Request type (half-octet IEI)
    pub const REQUEST_TYPE: u8 = 0x8;
    /// PDU session type (half-octet IEI)
    pub const PDU_SESSION_TYPE: u8 = 0x9;
    /// SSC mode (half-octet IEI)
    pub const SSC_MODE: u8 = 0xA;
}

/// A decoded information element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InformationElement {
    /// 5GMM capability
    FiveGmmCapability(IeFiveGmmCapability),
    /// UE security capability
    UeSecurityCapability(IeUeSecurityCapability),
    /// Authentication parameter AUTN
    AuthParamAutn(IeAuthParamAutn),
    /// Authentication parameter RAND
    AuthParamRand(IeAuthParamRand),
    /// 5GS mobile identity
    MobileIdentity(IeMobileIdentity),
}

impl InformationElement {
    /// IEI used when the element appears as an optional IE.
    ///
    /// The mobile identity is mandatory wherever this codec uses it, so it
    /// carries no IEI.
    pub fn iei(&self) -> Option<u8> {
        match self {
            InformationElement::FiveGmmCapability(_) => Some(iei::FIVEGMM_CAPABILITY),
            InformationElement::UeSecurityCapability(_) => Some(iei::UE_SECURITY_CAPABILITY),
            InformationElement::AuthParamAutn(_) => Some(iei::AUTHENTICATION_PARAMETER_AUTN),
            InformationElement::AuthParamRand(_) => Some(iei::AUTHENTICATION_PARAMETER_RAND),
            InformationElement::MobileIdentity(_) => None,
        }
    }

    /// IE name, for errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            InformationElement::FiveGmmCapability(_) => "5GMM capability",
            InformationElement::UeSecurityCapability(_) => "UE security capability",
            InformationElement::AuthParamAutn(_) => "AUTN",
            InformationElement::AuthParamRand(_) => "RAND",
            InformationElement::MobileIdentity(_) => "5GS mobile identity",
        }
    }
}

/// Bytes of `pdu` from `offset` on; empty when `offset` is past the end.
pub(crate) fn tail(pdu: &[u8], offset: usize) -> &[u8] {
    pdu.get(offset..).unwrap_or_default()
}

/// Fails with `TruncatedInformationElement` unless `needed` bytes remain.
pub(crate) fn need<B: Buf>(buf: &B, ie: &'static str, offset: usize, needed: usize) -> NasResult<()> {
    if buf.remaining() < needed {
        return Err(NasError::TruncatedInformationElement {
            ie,
            offset,
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

/// Reads the single octet at `offset`.
pub(crate) fn read_octet(pdu: &[u8], offset: usize, ie: &'static str) -> NasResult<u8> {
    let mut buf = tail(pdu, offset);
    need(&buf, ie, offset, 1)?;
    Ok(buf.get_u8())
}

/// Decodes an Authentication parameter AUTN value at `offset` (after the IEI).
pub fn decode_auth_param_autn(pdu: &[u8], offset: usize) -> NasResult<(IeAuthParamAutn, usize)> {
    IeAuthParamAutn::decode(pdu, offset)
}

/// Decodes an Authentication parameter RAND value at `offset` (after the IEI).
pub fn decode_auth_param_rand(pdu: &[u8], offset: usize) -> NasResult<(IeAuthParamRand, usize)> {
    IeAuthParamRand::decode(pdu, offset)
}

/// Decodes IEs from `start` to the end of `pdu` using `table`.
pub fn decode_information_elements(
    table: &IeTable,
    pdu: &[u8],
    start: usize,
) -> NasResult<Vec<InformationElement>> {
    table.decode_all(pdu, start)
}

/// 5GMM capability advertised by the simulator (N3 data only).
pub fn encode_5gmm_capability() -> Vec<u8> {
    let mut buf = Vec::with_capacity(3);
    IeFiveGmmCapability::default().encode(&mut buf);
    buf
}

/// UE security capability advertised by the simulator (EA0 and IA0 only).
pub fn encode_ue_security_capability() -> Vec<u8> {
    let mut buf = Vec::with_capacity(6);
    IeUeSecurityCapability::null_algorithms().encode(&mut buf);
    buf
}

/// SUCI mobile identity for `identity` with an explicit scheme output.
///
/// The scheme output must be exactly five octets.
pub fn encode_mobile_identity(identity: &SubscriberIdentity, scheme_output: &[u8]) -> NasResult<Vec<u8>> {
    let scheme_output = SchemeOutput::try_from(scheme_output)?;
    let mut buf = Vec::with_capacity(IeMobileIdentity::SUCI_LENGTH + 2);
    IeMobileIdentity::suci_with_output(identity, scheme_output)?.encode(&mut buf)?;
    Ok(buf)
}
