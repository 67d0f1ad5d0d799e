//! Authentication Messages (3GPP TS 24.501 Section 8.2.1-8.2.4)
//!
//! - Authentication Request (network to UE)
//! - Authentication Response (UE to network)
//! - Authentication Failure (UE to network)

use bytes::BufMut;

use crate::enums::{MmCause, MmMessageType};
use crate::error::{NasError, NasResult};
use crate::header::PlainMmHeader;
use crate::ies::ie4::{lv_length, read_lv};
use crate::ies::{
    iei, read_octet, tail, Abba, IeAuthParamAutn, IeAuthParamRand, IeAuthResponseParameter, IeTable,
    InformationElement, NasKeySetIdentifier, AUTHENTICATION_REQUEST_IES,
};

// ============================================================================
// Authentication Request (3GPP TS 24.501 Section 8.2.1)
// ============================================================================

/// Authentication Request message (network to UE)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthenticationRequest {
    /// ngKSI (mandatory, half octet)
    pub ng_ksi: NasKeySetIdentifier,
    /// ABBA (mandatory, LV)
    pub abba: Abba,
    /// Authentication parameter RAND (optional, IEI 0x21)
    pub rand: Option<IeAuthParamRand>,
    /// Authentication parameter AUTN (optional, IEI 0x20)
    pub autn: Option<IeAuthParamAutn>,
}

impl AuthenticationRequest {
    /// Create a new Authentication Request with mandatory fields
    pub fn new(ng_ksi: NasKeySetIdentifier, abba: Abba) -> Self {
        Self {
            ng_ksi,
            abba,
            ..Default::default()
        }
    }

    /// Create an Authentication Request for 5G-AKA
    pub fn for_5g_aka(ng_ksi: NasKeySetIdentifier, abba: Abba, rand: IeAuthParamRand, autn: IeAuthParamAutn) -> Self {
        Self {
            ng_ksi,
            abba,
            rand: Some(rand),
            autn: Some(autn),
        }
    }

    /// Decodes the message body starting at `offset` (after the header).
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<Self> {
        Self::decode_with(&AUTHENTICATION_REQUEST_IES, pdu, offset)
    }

    /// Like [`decode`](Self::decode) but dispatching optional IEs through `table`.
    ///
    /// A repeated IE overwrites the earlier occurrence.
    pub fn decode_with(table: &IeTable, pdu: &[u8], offset: usize) -> NasResult<Self> {
        // Spare half octet (high) + ngKSI (low)
        let ng_ksi = NasKeySetIdentifier::decode(read_octet(pdu, offset, "ngKSI")? & 0x0F);
        let (abba, next) = Abba::decode(pdu, offset + 1)?;

        let mut msg = Self::new(ng_ksi, abba);
        for ie in table.decode_all(pdu, next)? {
            match ie {
                InformationElement::AuthParamRand(rand) => msg.rand = Some(rand),
                InformationElement::AuthParamAutn(autn) => msg.autn = Some(autn),
                other => {
                    return Err(NasError::UnexpectedInformationElement {
                        message: MmMessageType::AuthenticationRequest.name(),
                        ie: other.name(),
                    });
                }
            }
        }
        Ok(msg)
    }

    /// RAND and AUTN, both required for 5G-AKA.
    pub fn challenge(&self) -> NasResult<(&IeAuthParamRand, &IeAuthParamAutn)> {
        let rand = self.rand.as_ref().ok_or(NasError::MissingInformationElement("RAND"))?;
        let autn = self.autn.as_ref().ok_or(NasError::MissingInformationElement("AUTN"))?;
        Ok((rand, autn))
    }

    /// Encode to bytes (including header)
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        lv_length("ABBA", &self.abba.0)?;
        PlainMmHeader::new(MmMessageType::AuthenticationRequest).encode(buf);
        buf.put_u8(self.ng_ksi.encode() & 0x0F);
        self.abba.encode(buf)?;

        if let Some(rand) = &self.rand {
            rand.encode(buf);
        }
        if let Some(autn) = &self.autn {
            autn.encode(buf);
        }
        Ok(())
    }

    /// Get the message type
    pub fn message_type() -> MmMessageType {
        MmMessageType::AuthenticationRequest
    }
}

// ============================================================================
// Authentication Response (3GPP TS 24.501 Section 8.2.2)
// ============================================================================

/// Authentication Response message (UE to network)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthenticationResponse {
    /// Authentication response parameter (optional, IEI 0x2D)
    pub auth_response_parameter: Option<IeAuthResponseParameter>,
}

impl AuthenticationResponse {
    /// Authentication Response carrying `res` (RES or RES*)
    pub fn new(res: &[u8]) -> Self {
        Self {
            auth_response_parameter: Some(IeAuthResponseParameter(res.to_vec())),
        }
    }

    /// Decodes the message body starting at `offset` (after the header).
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<Self> {
        let mut msg = Self::default();
        let mut offset = offset;

        while let Some(&iei) = tail(pdu, offset).first() {
            if iei != iei::AUTHENTICATION_RESPONSE_PARAMETER {
                return Err(NasError::UnsupportedInformationElement {
                    iei,
                    offset,
                    decoded: Vec::new(),
                });
            }
            let (param, next) = IeAuthResponseParameter::decode(pdu, offset + 1)?;
            msg.auth_response_parameter = Some(param);
            offset = next;
        }
        Ok(msg)
    }

    /// Encode to bytes (including header)
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        if let Some(param) = &self.auth_response_parameter {
            lv_length("authentication response parameter", &param.0)?;
        }
        PlainMmHeader::new(MmMessageType::AuthenticationResponse).encode(buf);
        if let Some(param) = &self.auth_response_parameter {
            param.encode(buf)?;
        }
        Ok(())
    }

    /// Response value, if present.
    pub fn res(&self) -> Option<&[u8]> {
        self.auth_response_parameter.as_ref().map(|p| p.0.as_slice())
    }
}

// ============================================================================
// Authentication Failure (3GPP TS 24.501 Section 8.2.4)
// ============================================================================

/// Authentication Failure message (UE to network)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationFailure {
    /// 5GMM cause (mandatory, V)
    pub cause: MmCause,
    /// Authentication failure parameter (optional, IEI 0x30): AUTS on synch failure
    pub auth_failure_parameter: Option<Vec<u8>>,
}

impl AuthenticationFailure {
    /// Authentication Failure with cause #20 (MAC failure)
    pub fn mac_failure() -> Self {
        Self {
            cause: MmCause::MacFailure,
            auth_failure_parameter: None,
        }
    }

    /// Decodes the message body starting at `offset` (after the header).
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<Self> {
        let value = read_octet(pdu, offset, "5GMM cause")?;
        let cause = MmCause::try_from(value).map_err(|_| NasError::InvalidIeValue { ie: "5GMM cause", value })?;

        let mut auth_failure_parameter = None;
        let mut offset = offset + 1;
        while let Some(&iei) = tail(pdu, offset).first() {
            if iei != iei::AUTHENTICATION_FAILURE_PARAMETER {
                return Err(NasError::UnsupportedInformationElement {
                    iei,
                    offset,
                    decoded: Vec::new(),
                });
            }
            let (value, next) = read_lv(pdu, offset + 1, "authentication failure parameter")?;
            auth_failure_parameter = Some(value.to_vec());
            offset = next;
        }

        Ok(Self {
            cause,
            auth_failure_parameter,
        })
    }

    /// Encode to bytes (including header)
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        let param_length = self
            .auth_failure_parameter
            .as_deref()
            .map(|param| lv_length("authentication failure parameter", param))
            .transpose()?;

        PlainMmHeader::new(MmMessageType::AuthenticationFailure).encode(buf);
        buf.put_u8(self.cause.into());
        if let (Some(param), Some(length)) = (&self.auth_failure_parameter, param_length) {
            buf.put_u8(iei::AUTHENTICATION_FAILURE_PARAMETER);
            buf.put_u8(length);
            buf.put_slice(param);
        }
        Ok(())
    }
}
