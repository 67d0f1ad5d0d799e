//! PDU Session Establishment Request (3GPP TS 24.501 Section 8.3.1)

use bytes::BufMut;

use crate::enums::SmMessageType;
use crate::error::{NasError, NasResult};
use crate::header::{NasHeader, PlainSmHeader};
use crate::ies::ie1::{PduSessionType, SscMode};
use crate::ies::{iei, need, tail, tv1};

/// Integrity protection maximum data rate (TS 24.501 9.11.4.7): full rate both ways
pub const FULL_DATA_RATE: [u8; 2] = [0xFF, 0xFF];

/// PDU Session Establishment Request message (UE to network)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduSessionEstablishmentRequest {
    /// PDU session identity
    pub pdu_session_id: u8,
    /// Procedure transaction identity
    pub pti: u8,
    /// Integrity protection maximum data rate (mandatory, V)
    pub integrity_max_data_rate: [u8; 2],
    /// PDU session type (optional, IEI 0x9-)
    pub pdu_session_type: Option<PduSessionType>,
    /// SSC mode (optional, IEI 0xA-)
    pub ssc_mode: Option<SscMode>,
}

impl PduSessionEstablishmentRequest {
    /// IPv4 session in SSC mode 1 at full integrity-protected data rate.
    pub fn ipv4(pdu_session_id: u8, pti: u8) -> Self {
        Self {
            pdu_session_id,
            pti,
            integrity_max_data_rate: FULL_DATA_RATE,
            pdu_session_type: Some(PduSessionType::Ipv4),
            ssc_mode: Some(SscMode::Mode1),
        }
    }

    /// Decodes a complete 5GSM PDU.
    pub fn decode(pdu: &[u8]) -> NasResult<Self> {
        let header = match NasHeader::decode(pdu)? {
            NasHeader::Sm(header) => header,
            NasHeader::Mm(_) => return Err(NasError::InvalidProtocolDiscriminator(pdu[0])),
        };
        if header.sm_message_type() != Some(SmMessageType::PduSessionEstablishmentRequest) {
            return Err(NasError::InvalidIeValue {
                ie: "5GSM message type",
                value: header.message_type,
            });
        }

        let mut offset = PlainSmHeader::SIZE;
        let rate = tail(pdu, offset);
        need(&rate, "integrity protection maximum data rate", offset, 2)?;
        let mut msg = Self {
            pdu_session_id: header.pdu_session_id,
            pti: header.pti,
            integrity_max_data_rate: [rate[0], rate[1]],
            pdu_session_type: None,
            ssc_mode: None,
        };
        offset += 2;

        while let Some(&octet) = tail(pdu, offset).first() {
            let value = octet & 0x07;
            match octet >> 4 {
                iei::PDU_SESSION_TYPE => {
                    msg.pdu_session_type = Some(
                        PduSessionType::try_from(value)
                            .map_err(|_| NasError::InvalidIeValue { ie: "PDU session type", value })?,
                    );
                }
                iei::SSC_MODE => {
                    msg.ssc_mode =
                        Some(SscMode::try_from(value).map_err(|_| NasError::InvalidIeValue { ie: "SSC mode", value })?);
                }
                _ => {
                    return Err(NasError::UnsupportedInformationElement {
                        iei: octet,
                        offset,
                        decoded: Vec::new(),
                    })
                }
            }
            offset += 1;
        }
        Ok(msg)
    }

    /// Encode to bytes (including header)
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        PlainSmHeader::new(SmMessageType::PduSessionEstablishmentRequest, self.pdu_session_id, self.pti).encode(buf);
        buf.put_slice(&self.integrity_max_data_rate);

        if let Some(session_type) = self.pdu_session_type {
            buf.put_u8(tv1(iei::PDU_SESSION_TYPE, session_type.into()));
        }
        if let Some(ssc_mode) = self.ssc_mode {
            buf.put_u8(tv1(iei::SSC_MODE, ssc_mode.into()));
        }
    }
}
