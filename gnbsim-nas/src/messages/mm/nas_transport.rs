//! UL NAS Transport (3GPP TS 24.501 Section 8.2.10)

use bytes::BufMut;

use crate::enums::MmMessageType;
use crate::error::{NasError, NasResult};
use crate::header::PlainMmHeader;
use crate::ies::ie1::{PayloadContainerType, RequestType};
use crate::ies::ie6::lve_length;
use crate::ies::{iei, read_octet, tail, tv1, IePayloadContainer};

/// UL NAS Transport message (UE to network)
///
/// Carries a 5GSM message towards the SMF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UlNasTransport {
    /// Payload container type (mandatory, half octet)
    pub payload_container_type: PayloadContainerType,
    /// Payload container (mandatory, LV-E)
    pub payload_container: IePayloadContainer,
    /// PDU session ID (optional, IEI 0x12)
    pub pdu_session_id: Option<u8>,
    /// Request type (optional, IEI 0x8-)
    pub request_type: Option<RequestType>,
}

impl UlNasTransport {
    /// UL NAS Transport carrying an N1 SM message for a new PDU session.
    pub fn n1_sm(pdu_session_id: u8, sm_pdu: &[u8]) -> Self {
        Self {
            payload_container_type: PayloadContainerType::N1SmInformation,
            payload_container: IePayloadContainer(sm_pdu.to_vec()),
            pdu_session_id: Some(pdu_session_id),
            request_type: Some(RequestType::InitialRequest),
        }
    }

    /// Decodes the message body starting at `offset` (after the header).
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<Self> {
        // Spare half octet (high) + payload container type (low)
        let value = read_octet(pdu, offset, "payload container type")? & 0x0F;
        let payload_container_type = PayloadContainerType::try_from(value).map_err(|_| NasError::InvalidIeValue {
            ie: "payload container type",
            value,
        })?;
        let (payload_container, mut offset) = IePayloadContainer::decode(pdu, offset + 1)?;

        let mut msg = Self {
            payload_container_type,
            payload_container,
            pdu_session_id: None,
            request_type: None,
        };
        while let Some(&octet) = tail(pdu, offset).first() {
            if octet == iei::PDU_SESSION_ID {
                msg.pdu_session_id = Some(read_octet(pdu, offset + 1, "PDU session ID")?);
                offset += 2;
            } else if octet >> 4 == iei::REQUEST_TYPE {
                let value = octet & 0x07;
                msg.request_type = Some(
                    RequestType::try_from(value).map_err(|_| NasError::InvalidIeValue { ie: "request type", value })?,
                );
                offset += 1;
            } else {
                return Err(NasError::UnsupportedInformationElement {
                    iei: octet,
                    offset,
                    decoded: Vec::new(),
                });
            }
        }
        Ok(msg)
    }

    /// Encode to bytes (including header)
    ///
    /// A payload longer than 65535 bytes is `InvalidIeLength`; nothing is
    /// written in that case.
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        lve_length("payload container", &self.payload_container.0)?;
        PlainMmHeader::new(MmMessageType::UlNasTransport).encode(buf);
        buf.put_u8(u8::from(self.payload_container_type) & 0x0F);
        self.payload_container.encode(buf)?;

        if let Some(psi) = self.pdu_session_id {
            buf.put_u8(iei::PDU_SESSION_ID);
            buf.put_u8(psi);
        }
        if let Some(request_type) = self.request_type {
            buf.put_u8(tv1(iei::REQUEST_TYPE, request_type.into()));
        }
        Ok(())
    }
}
