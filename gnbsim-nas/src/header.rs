//! Plain NAS message headers (TS 24.501 9.1)
//!
//! - 5GMM: EPD, security header type, message type (3 octets)
//! - 5GSM: EPD, PDU session ID, PTI, message type (4 octets)
//!
//! Message types are kept as raw octets so that a PDU with a type this
//! codec does not know still yields its header.

use bytes::{Buf, BufMut};

use crate::enums::{ExtendedProtocolDiscriminator, MmMessageType, SecurityHeaderType, SmMessageType};
use crate::error::{NasError, NasResult};

/// Plain 5GMM header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlainMmHeader {
    /// Security header type, always plain on the decode path
    pub security_header_type: SecurityHeaderType,
    /// Message type octet
    pub message_type: u8,
}

impl PlainMmHeader {
    /// Encoded size in bytes
    pub const SIZE: usize = 3;

    /// Plain header for `message_type`.
    pub fn new(message_type: MmMessageType) -> Self {
        Self {
            security_header_type: SecurityHeaderType::NotProtected,
            message_type: message_type.into(),
        }
    }

    /// Known message type, if any.
    pub fn mm_message_type(&self) -> Option<MmMessageType> {
        MmMessageType::try_from(self.message_type).ok()
    }

    /// Writes the three header octets.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(ExtendedProtocolDiscriminator::MobilityManagement.into());
        // Spare half octet stays zero.
        buf.put_u8(u8::from(self.security_header_type) & 0x0F);
        buf.put_u8(self.message_type);
    }
}

/// Plain 5GSM header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlainSmHeader {
    /// PDU session identity
    pub pdu_session_id: u8,
    /// Procedure transaction identity
    pub pti: u8,
    /// Message type octet
    pub message_type: u8,
}

impl PlainSmHeader {
    /// Encoded size in bytes
    pub const SIZE: usize = 4;

    /// Header for `message_type` on the given session and transaction.
    pub fn new(message_type: SmMessageType, pdu_session_id: u8, pti: u8) -> Self {
        Self {
            pdu_session_id,
            pti,
            message_type: message_type.into(),
        }
    }

    /// Known message type, if any.
    pub fn sm_message_type(&self) -> Option<SmMessageType> {
        SmMessageType::try_from(self.message_type).ok()
    }

    /// Writes the four header octets.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(ExtendedProtocolDiscriminator::SessionManagement.into());
        buf.put_u8(self.pdu_session_id);
        buf.put_u8(self.pti);
        buf.put_u8(self.message_type);
    }
}

/// Header of a received plain NAS PDU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NasHeader {
    /// 5GS mobility management
    Mm(PlainMmHeader),
    /// 5GS session management
    Sm(PlainSmHeader),
}

impl NasHeader {
    /// Parses the header at the start of `pdu`.
    pub fn decode(pdu: &[u8]) -> NasResult<Self> {
        let malformed = |required| NasError::MalformedHeader {
            length: pdu.len(),
            required,
        };
        if pdu.len() < PlainMmHeader::SIZE {
            return Err(malformed(PlainMmHeader::SIZE));
        }

        let mut buf = pdu;
        let epd = buf.get_u8();
        match ExtendedProtocolDiscriminator::try_from(epd) {
            Ok(ExtendedProtocolDiscriminator::MobilityManagement) => {
                let sht = buf.get_u8() & 0x0F;
                let security_header_type = SecurityHeaderType::try_from(sht)
                    .ok()
                    .filter(|t| !t.is_protected())
                    .ok_or(NasError::UnsupportedSecurityHeader(sht))?;
                Ok(NasHeader::Mm(PlainMmHeader {
                    security_header_type,
                    message_type: buf.get_u8(),
                }))
            }
            Ok(ExtendedProtocolDiscriminator::SessionManagement) => {
                if pdu.len() < PlainSmHeader::SIZE {
                    return Err(malformed(PlainSmHeader::SIZE));
                }
                Ok(NasHeader::Sm(PlainSmHeader {
                    pdu_session_id: buf.get_u8(),
                    pti: buf.get_u8(),
                    message_type: buf.get_u8(),
                }))
            }
            Err(_) => Err(NasError::InvalidProtocolDiscriminator(epd)),
        }
    }

    /// Encoded header size in bytes.
    pub fn len(&self) -> usize {
        match self {
            NasHeader::Mm(_) => PlainMmHeader::SIZE,
            NasHeader::Sm(_) => PlainSmHeader::SIZE,
        }
    }

    /// Always false; headers have a fixed non-zero size.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Message type octet.
    pub fn message_type(&self) -> u8 {
        match self {
            NasHeader::Mm(h) => h.message_type,
            NasHeader::Sm(h) => h.message_type,
        }
    }
}
