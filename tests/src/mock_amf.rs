//! Mock AMF for integration testing
//!
//! Plays the network side of registration: parses the Registration Request,
//! issues a 5G-AKA challenge built with Milenage from the subscriber's keys,
//! checks the returned RES and follows the rest of the exchange. No transport
//! is involved; PDUs are passed in and out as byte vectors.

use std::collections::HashMap;

use gnbsim_common::{log_nas_message, Direction, Plmn};
use gnbsim_crypto::Milenage;
use gnbsim_nas::ies::ie6::IeMobileIdentity;
use gnbsim_nas::ies::{Abba, IeAuthParamAutn, IeAuthParamRand, NasKeySetIdentifier, SecurityContextType};
use gnbsim_nas::messages::{
    AuthenticationFailure, AuthenticationRequest, AuthenticationResponse, PduSessionEstablishmentRequest,
    UlNasTransport,
};
use gnbsim_nas::{MmCause, MmMessageType, NasCodec, NasError, NasHeader};
use thiserror::Error;
use tracing::{info, warn};

/// Mock AMF errors
#[derive(Debug, Error)]
pub enum MockAmfError {
    #[error("Unknown UE context {0}")]
    UnknownUe(u64),
    #[error("Unexpected message type 0x{0:02X}")]
    UnexpectedMessage(u8),
    #[error("Mobile identity is not a SUCI")]
    NotSuci,
    #[error("NAS error: {0}")]
    Nas(#[from] NasError),
}

/// Events emitted by the mock AMF
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAmfEvent {
    /// Registration Request received and challenge issued
    RegistrationRequest { amf_ue_id: u64, supi: String },
    /// RES matched the expected value
    AuthenticationSucceeded { amf_ue_id: u64 },
    /// RES did not match
    AuthenticationRejected { amf_ue_id: u64 },
    /// UE reported an authentication failure
    AuthenticationFailure { amf_ue_id: u64, cause: MmCause },
    /// Security Mode Complete received
    SecurityModeComplete { amf_ue_id: u64 },
    /// Registration Complete received
    RegistrationComplete { amf_ue_id: u64 },
    /// PDU Session Establishment Request received in UL NAS Transport
    PduSessionRequested { amf_ue_id: u64, pdu_session_id: u8 },
}

/// Mock AMF configuration
#[derive(Debug, Clone)]
pub struct MockAmfConfig {
    /// Serving PLMN
    pub plmn: Plmn,
    /// Subscriber key K, as provisioned in the UDM
    pub key: [u8; 16],
    /// Subscriber OPc
    pub opc: [u8; 16],
    /// RAND issued in the challenge
    pub rand: [u8; 16],
    /// SQN issued in the challenge
    pub sqn: [u8; 6],
    /// AMF field of AUTN
    pub amf: [u8; 2],
    /// Flip a bit of MAC-A before sending, simulating a false network
    pub corrupt_mac: bool,
}

/// UE context in the mock AMF
#[derive(Debug, Clone, Default)]
pub struct MockUeContext {
    /// SUPI recovered from the null-scheme SUCI
    pub supi: String,
    /// XRES for the outstanding challenge
    pub expected_res: Option<[u8; 8]>,
    /// RES verified
    pub authenticated: bool,
    /// Registration completed
    pub registered: bool,
    /// PDU session IDs requested
    pub pdu_sessions: Vec<u8>,
}

/// Mock AMF for integration testing
#[derive(Debug)]
pub struct MockAmf {
    config: MockAmfConfig,
    codec: NasCodec,
    ue_contexts: HashMap<u64, MockUeContext>,
    next_amf_ue_id: u64,
    events: Vec<MockAmfEvent>,
}

impl MockAmf {
    /// Create a new mock AMF with the given configuration
    pub fn with_config(config: MockAmfConfig) -> Self {
        Self {
            config,
            codec: NasCodec::new(),
            ue_contexts: HashMap::new(),
            next_amf_ue_id: 1,
            events: Vec::new(),
        }
    }

    /// Number of UE contexts
    pub fn ue_count(&self) -> usize {
        self.ue_contexts.len()
    }

    /// UE context by AMF UE ID
    pub fn ue_context(&self, amf_ue_id: u64) -> Option<&MockUeContext> {
        self.ue_contexts.get(&amf_ue_id)
    }

    /// All events emitted so far
    pub fn events(&self) -> &[MockAmfEvent] {
        &self.events
    }

    /// Handles an initial Registration Request.
    ///
    /// Returns the new AMF UE ID and the Authentication Request to deliver.
    pub fn handle_registration_request(&mut self, pdu: &[u8]) -> Result<(u64, Vec<u8>), MockAmfError> {
        let request = self.codec.decode_registration_request(pdu)?;
        let IeMobileIdentity::Suci(suci) = &request.mobile_identity else {
            return Err(MockAmfError::NotSuci);
        };
        let supi = format!("imsi-{}{}", suci.plmn, suci.msin()?);

        let amf_ue_id = self.next_amf_ue_id;
        self.next_amf_ue_id += 1;

        let (challenge, xres) = self.build_challenge();
        let mut auth_request = Vec::new();
        challenge.encode(&mut auth_request)?;
        log_nas_message(Direction::Tx, MmMessageType::AuthenticationRequest.name(), &auth_request);

        info!(amf_ue_id, %supi, "issuing authentication challenge");
        self.ue_contexts.insert(
            amf_ue_id,
            MockUeContext {
                supi: supi.clone(),
                expected_res: Some(xres),
                ..Default::default()
            },
        );
        self.events.push(MockAmfEvent::RegistrationRequest { amf_ue_id, supi });
        Ok((amf_ue_id, auth_request))
    }

    /// Handles an uplink PDU for an existing UE context.
    pub fn handle_uplink(&mut self, amf_ue_id: u64, pdu: &[u8]) -> Result<(), MockAmfError> {
        let header = NasHeader::decode(pdu)?;
        let NasHeader::Mm(mm) = header else {
            return Err(MockAmfError::UnexpectedMessage(header.message_type()));
        };
        let message_type = mm
            .mm_message_type()
            .ok_or(MockAmfError::UnexpectedMessage(mm.message_type))?;
        log_nas_message(Direction::Rx, message_type.name(), pdu);

        let ue = self
            .ue_contexts
            .get_mut(&amf_ue_id)
            .ok_or(MockAmfError::UnknownUe(amf_ue_id))?;

        let event = match message_type {
            MmMessageType::AuthenticationResponse => {
                let response = AuthenticationResponse::decode(pdu, header.len())?;
                let expected = ue.expected_res.take();
                if expected.is_some() && response.res() == expected.as_ref().map(|r| r.as_slice()) {
                    ue.authenticated = true;
                    MockAmfEvent::AuthenticationSucceeded { amf_ue_id }
                } else {
                    warn!(amf_ue_id, "RES mismatch");
                    MockAmfEvent::AuthenticationRejected { amf_ue_id }
                }
            }
            MmMessageType::AuthenticationFailure => {
                let failure = AuthenticationFailure::decode(pdu, header.len())?;
                ue.expected_res = None;
                MockAmfEvent::AuthenticationFailure {
                    amf_ue_id,
                    cause: failure.cause,
                }
            }
            MmMessageType::SecurityModeComplete => MockAmfEvent::SecurityModeComplete { amf_ue_id },
            MmMessageType::RegistrationComplete => {
                ue.registered = true;
                MockAmfEvent::RegistrationComplete { amf_ue_id }
            }
            MmMessageType::UlNasTransport => {
                let transport = UlNasTransport::decode(pdu, header.len())?;
                let request = PduSessionEstablishmentRequest::decode(&transport.payload_container.0)?;
                ue.pdu_sessions.push(request.pdu_session_id);
                MockAmfEvent::PduSessionRequested {
                    amf_ue_id,
                    pdu_session_id: request.pdu_session_id,
                }
            }
            other => return Err(MockAmfError::UnexpectedMessage(other.into())),
        };
        self.events.push(event);
        Ok(())
    }

    fn build_challenge(&self) -> (AuthenticationRequest, [u8; 8]) {
        let cfg = &self.config;
        let milenage = Milenage::new(&cfg.key, &cfg.opc);
        let vectors = milenage.f2345(&cfg.rand);

        let mut autn = IeAuthParamAutn {
            sqn_xor_ak: cfg.sqn,
            amf: cfg.amf,
            mac: milenage.f1(&cfg.rand, &cfg.sqn, &cfg.amf),
        };
        autn.sqn_xor_ak.iter_mut().zip(vectors.ak).for_each(|(s, ak)| *s ^= ak);
        if cfg.corrupt_mac {
            autn.mac[0] ^= 0x01;
        }

        let request = AuthenticationRequest::for_5g_aka(
            NasKeySetIdentifier::new(SecurityContextType::Native, 0),
            Abba::default(),
            IeAuthParamRand(cfg.rand),
            autn,
        );
        (request, vectors.res)
    }
}
