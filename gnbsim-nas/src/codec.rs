//! NAS message codec
//!
//! [`NasCodec`] is the entry point used by the device procedures: it builds
//! the uplink PDUs the simulator sends and decodes downlink PDUs, running the
//! AKA engine when an Authentication Request arrives.
//!
//! The codec holds only `&'static` IE tables and is therefore `Copy`. All
//! per-device state lives in the [`Subscriber`] passed to each call.

use gnbsim_common::{log_nas_message, Direction, SubscriberIdentity};
use tracing::debug;

use crate::enums::{MmMessageType, SmMessageType};
use crate::error::{NasError, NasResult};
use crate::header::NasHeader;
use crate::ies::{IeTable, AUTHENTICATION_REQUEST_IES, REGISTRATION_REQUEST_IES};
use crate::messages::{
    AuthenticationFailure, AuthenticationRequest, AuthenticationResponse, PduSessionEstablishmentRequest,
    RegistrationComplete, RegistrationRequest, SecurityModeComplete, UlNasTransport,
};
use crate::ue::Subscriber;

/// Outcome of decoding a downlink PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedMessage {
    /// Authentication Request whose challenge verified
    AuthenticationRequest(AuthenticationRequest),
    /// Valid header of a message this codec does not process
    Unsupported(NasHeader),
}

impl DecodedMessage {
    /// Name of the decoded message, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            DecodedMessage::AuthenticationRequest(_) => MmMessageType::AuthenticationRequest.name(),
            DecodedMessage::Unsupported(header) => message_name(header),
        }
    }
}

fn message_name(header: &NasHeader) -> &'static str {
    match header {
        NasHeader::Mm(h) => h.mm_message_type().map_or("Unknown 5GMM message", MmMessageType::name),
        NasHeader::Sm(h) => h.sm_message_type().map_or("Unknown 5GSM message", SmMessageType::name),
    }
}

/// Stateless 5G NAS encoder/decoder.
#[derive(Debug, Clone, Copy)]
pub struct NasCodec {
    authentication_request_ies: &'static IeTable,
    registration_request_ies: &'static IeTable,
}

impl Default for NasCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl NasCodec {
    /// Codec using the built-in IE tables.
    pub fn new() -> Self {
        Self::with_tables(&AUTHENTICATION_REQUEST_IES, &REGISTRATION_REQUEST_IES)
    }

    /// Codec using caller-supplied IE tables.
    pub const fn with_tables(
        authentication_request_ies: &'static IeTable,
        registration_request_ies: &'static IeTable,
    ) -> Self {
        Self {
            authentication_request_ies,
            registration_request_ies,
        }
    }

    /// Decodes a downlink PDU.
    ///
    /// For an Authentication Request the whole PDU is decoded and RAND and
    /// AUTN are required before `subscriber` is touched; the challenge is then
    /// verified and its outcome recorded in `subscriber`. A MAC mismatch
    /// returns [`NasError::AuthenticationMismatch`]. Other message types yield
    /// [`DecodedMessage::Unsupported`] with the parsed header.
    pub fn decode(&self, pdu: &[u8], subscriber: &mut Subscriber) -> NasResult<DecodedMessage> {
        let header = NasHeader::decode(pdu)?;
        log_nas_message(Direction::Rx, message_name(&header), pdu);

        match header {
            NasHeader::Mm(mm) if mm.mm_message_type() == Some(MmMessageType::AuthenticationRequest) => {
                let msg = AuthenticationRequest::decode_with(self.authentication_request_ies, pdu, header.len())?;
                let (rand, autn) = msg.challenge()?;
                subscriber.process_challenge(rand, autn)?;
                Ok(DecodedMessage::AuthenticationRequest(msg))
            }
            _ => {
                debug!(message_type = header.message_type(), "message not processed by the codec");
                Ok(DecodedMessage::Unsupported(header))
            }
        }
    }

    /// Decodes a Registration Request PDU (network side).
    pub fn decode_registration_request(&self, pdu: &[u8]) -> NasResult<RegistrationRequest> {
        let header = NasHeader::decode(pdu)?;
        if header.message_type() != u8::from(MmMessageType::RegistrationRequest) || matches!(header, NasHeader::Sm(_)) {
            return Err(NasError::InvalidIeValue {
                ie: "5GMM message type",
                value: header.message_type(),
            });
        }
        log_nas_message(Direction::Rx, MmMessageType::RegistrationRequest.name(), pdu);
        RegistrationRequest::decode_with(self.registration_request_ies, pdu, header.len())
    }

    /// Initial Registration Request for `identity`.
    pub fn encode_registration_request(&self, identity: &SubscriberIdentity) -> NasResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(32);
        RegistrationRequest::initial(identity)?.encode(&mut buf)?;
        log_nas_message(Direction::Tx, MmMessageType::RegistrationRequest.name(), &buf);
        Ok(buf)
    }

    /// Authentication Response carrying the RES of the verified challenge.
    pub fn encode_authentication_response(&self, subscriber: &Subscriber) -> NasResult<Vec<u8>> {
        let res = subscriber
            .derived_response()
            .ok_or(NasError::NoDerivedResponse(subscriber.state()))?;
        let mut buf = Vec::with_capacity(16);
        AuthenticationResponse::new(res).encode(&mut buf)?;
        log_nas_message(Direction::Tx, MmMessageType::AuthenticationResponse.name(), &buf);
        Ok(buf)
    }

    /// Authentication Failure with cause #20 (MAC failure).
    pub fn encode_authentication_failure(&self) -> NasResult<Vec<u8>> {
        self.encode_plain(MmMessageType::AuthenticationFailure, |buf| {
            AuthenticationFailure::mac_failure().encode(buf)
        })
    }

    /// Security Mode Complete, optionally carrying the initial NAS message.
    ///
    /// An initial message longer than 65535 bytes is `InvalidIeLength`.
    pub fn encode_security_mode_complete(&self, initial_message: Option<&[u8]>) -> NasResult<Vec<u8>> {
        self.encode_plain(MmMessageType::SecurityModeComplete, |buf| {
            SecurityModeComplete::new(initial_message).encode(buf)
        })
    }

    /// Registration Complete.
    pub fn encode_registration_complete(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(3);
        RegistrationComplete.encode(&mut buf);
        log_nas_message(Direction::Tx, MmMessageType::RegistrationComplete.name(), &buf);
        buf
    }

    /// IPv4 PDU Session Establishment Request, as a bare 5GSM PDU.
    pub fn encode_pdu_session_establishment_request(&self, pdu_session_id: u8, pti: u8) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8);
        PduSessionEstablishmentRequest::ipv4(pdu_session_id, pti).encode(&mut buf);
        log_nas_message(
            Direction::Tx,
            SmMessageType::PduSessionEstablishmentRequest.name(),
            &buf,
        );
        buf
    }

    /// UL NAS Transport wrapping `sm_pdu` for session `pdu_session_id`.
    ///
    /// An `sm_pdu` longer than 65535 bytes is `InvalidIeLength`.
    pub fn encode_ul_nas_transport(&self, pdu_session_id: u8, sm_pdu: &[u8]) -> NasResult<Vec<u8>> {
        self.encode_plain(MmMessageType::UlNasTransport, |buf| {
            UlNasTransport::n1_sm(pdu_session_id, sm_pdu).encode(buf)
        })
    }

    fn encode_plain(
        &self,
        message_type: MmMessageType,
        encode: impl FnOnce(&mut Vec<u8>) -> NasResult<()>,
    ) -> NasResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(16);
        encode(&mut buf)?;
        log_nas_message(Direction::Tx, message_type.name(), &buf);
        Ok(buf)
    }
}
