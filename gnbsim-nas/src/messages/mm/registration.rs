//! Registration Messages (3GPP TS 24.501 Section 8.2.6-8.2.8)
//!
//! - Registration Request (UE to network)
//! - Registration Complete (UE to network)

use bytes::BufMut;
use gnbsim_common::SubscriberIdentity;

use crate::enums::MmMessageType;
use crate::error::{NasError, NasResult};
use crate::header::PlainMmHeader;
use crate::ies::{
    read_octet, Ie5gsRegistrationType, IeFiveGmmCapability, IeMobileIdentity, IeTable, IeUeSecurityCapability,
    InformationElement, NasKeySetIdentifier, REGISTRATION_REQUEST_IES,
};

// ============================================================================
// Registration Request (3GPP TS 24.501 Section 8.2.6)
// ============================================================================

/// Registration Request message (UE to network)
///
/// Only the IEs the simulated device sends are modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// 5GS registration type (mandatory, half octet)
    pub registration_type: Ie5gsRegistrationType,
    /// ngKSI (mandatory, half octet)
    pub ng_ksi: NasKeySetIdentifier,
    /// 5GS mobile identity (mandatory, LV-E)
    pub mobile_identity: IeMobileIdentity,
    /// 5GMM capability (optional, IEI 0x10)
    pub five_gmm_capability: Option<IeFiveGmmCapability>,
    /// UE security capability (optional, IEI 0x2E)
    pub ue_security_capability: Option<IeUeSecurityCapability>,
}

impl RegistrationRequest {
    /// Initial registration for `identity` with the default capability policy:
    /// follow-on request pending, no key available, N3 data, null algorithms.
    pub fn initial(identity: &SubscriberIdentity) -> NasResult<Self> {
        Ok(Self {
            registration_type: Ie5gsRegistrationType::initial(),
            ng_ksi: NasKeySetIdentifier::no_key(),
            mobile_identity: IeMobileIdentity::suci(identity)?,
            five_gmm_capability: Some(IeFiveGmmCapability::default()),
            ue_security_capability: Some(IeUeSecurityCapability::null_algorithms()),
        })
    }

    /// Decodes the message body starting at `offset` (after the header).
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<Self> {
        Self::decode_with(&REGISTRATION_REQUEST_IES, pdu, offset)
    }

    /// Like [`decode`](Self::decode) but dispatching optional IEs through `table`.
    pub fn decode_with(table: &IeTable, pdu: &[u8], offset: usize) -> NasResult<Self> {
        // ngKSI (high nibble) + 5GS registration type (low nibble)
        let octet = read_octet(pdu, offset, "5GS registration type")?;
        let registration_type = Ie5gsRegistrationType::decode(octet & 0x0F).ok_or(NasError::InvalidIeValue {
            ie: "5GS registration type",
            value: octet & 0x0F,
        })?;
        let ng_ksi = NasKeySetIdentifier::decode(octet >> 4);
        let (mobile_identity, next) = IeMobileIdentity::decode(pdu, offset + 1)?;

        let mut msg = Self {
            registration_type,
            ng_ksi,
            mobile_identity,
            five_gmm_capability: None,
            ue_security_capability: None,
        };
        for ie in table.decode_all(pdu, next)? {
            match ie {
                InformationElement::FiveGmmCapability(cap) => msg.five_gmm_capability = Some(cap),
                InformationElement::UeSecurityCapability(cap) => msg.ue_security_capability = Some(cap),
                other => {
                    return Err(NasError::UnexpectedInformationElement {
                        message: MmMessageType::RegistrationRequest.name(),
                        ie: other.name(),
                    });
                }
            }
        }
        Ok(msg)
    }

    /// Encode to bytes (including header)
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        let mut mobile_identity = Vec::with_capacity(IeMobileIdentity::SUCI_LENGTH + 2);
        self.mobile_identity.encode(&mut mobile_identity)?;

        PlainMmHeader::new(MmMessageType::RegistrationRequest).encode(buf);
        buf.put_u8((self.ng_ksi.encode() << 4) | self.registration_type.encode());
        buf.put_slice(&mobile_identity);

        if let Some(cap) = &self.five_gmm_capability {
            cap.encode(buf);
        }
        if let Some(cap) = &self.ue_security_capability {
            cap.encode(buf);
        }
        Ok(())
    }
}

// ============================================================================
// Registration Complete (3GPP TS 24.501 Section 8.2.8)
// ============================================================================

/// Registration Complete message (UE to network)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationComplete;

impl RegistrationComplete {
    /// Encode to bytes (header only)
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        PlainMmHeader::new(MmMessageType::RegistrationComplete).encode(buf);
    }
}
