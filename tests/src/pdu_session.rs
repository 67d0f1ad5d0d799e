//! PDU Session integration tests
//!
//! The 5GSM PDU Session Establishment Request travels to the AMF inside a
//! UL NAS Transport once the UE is registered.

use gnbsim_nas::messages::{PduSessionEstablishmentRequest, UlNasTransport};
use gnbsim_nas::ies::{PayloadContainerType, PduSessionType, RequestType, SscMode};
use gnbsim_nas::{NasCodec, PlainMmHeader};
use integration_tests::{init_test_logging, MockAmf, MockAmfEvent, TestResult, TestSubscriberConfig};

fn registered() -> TestResult<(NasCodec, MockAmf, u64)> {
    let config = TestSubscriberConfig::default();
    let codec = NasCodec::new();
    let mut ue = config.subscriber();
    let mut amf = MockAmf::with_config(config.amf_config());

    let (amf_ue_id, auth_request) = amf.handle_registration_request(&codec.encode_registration_request(ue.identity())?)?;
    codec.decode(&auth_request, &mut ue)?;
    amf.handle_uplink(amf_ue_id, &codec.encode_authentication_response(&ue)?)?;
    amf.handle_uplink(amf_ue_id, &codec.encode_registration_complete())?;
    Ok((codec, amf, amf_ue_id))
}

/// Establishment request wire format inside UL NAS Transport
#[test]
fn test_pdu_session_request_encoding() -> TestResult {
    init_test_logging();

    let codec = NasCodec::new();
    let sm = codec.encode_pdu_session_establishment_request(1, 1);
    let transport = codec.encode_ul_nas_transport(1, &sm)?;

    let decoded = UlNasTransport::decode(&transport, PlainMmHeader::SIZE)?;
    assert_eq!(decoded.payload_container_type, PayloadContainerType::N1SmInformation);
    assert_eq!(decoded.pdu_session_id, Some(1));
    assert_eq!(decoded.request_type, Some(RequestType::InitialRequest));

    let request = PduSessionEstablishmentRequest::decode(&decoded.payload_container.0)?;
    assert_eq!(request.pdu_session_type, Some(PduSessionType::Ipv4));
    assert_eq!(request.ssc_mode, Some(SscMode::Mode1));
    assert_eq!(request.integrity_max_data_rate, [0xff, 0xff]);
    Ok(())
}

/// Registered UE establishes two sessions
#[test]
fn test_pdu_session_establishment() -> TestResult {
    init_test_logging();

    let (codec, mut amf, amf_ue_id) = registered()?;
    for (psi, pti) in [(1, 1), (2, 2)] {
        let sm = codec.encode_pdu_session_establishment_request(psi, pti);
        amf.handle_uplink(amf_ue_id, &codec.encode_ul_nas_transport(psi, &sm)?)?;
    }

    let ctx = amf.ue_context(amf_ue_id).unwrap();
    assert!(ctx.registered);
    assert_eq!(ctx.pdu_sessions, vec![1, 2]);
    assert_eq!(
        amf.events().last(),
        Some(&MockAmfEvent::PduSessionRequested {
            amf_ue_id,
            pdu_session_id: 2
        })
    );
    Ok(())
}

/// A 5GSM PDU sent without the 5GMM envelope is refused by the AMF
#[test]
fn test_bare_sm_pdu_rejected() -> TestResult {
    init_test_logging();

    let (codec, mut amf, amf_ue_id) = registered()?;
    let sm = codec.encode_pdu_session_establishment_request(1, 1);
    assert!(amf.handle_uplink(amf_ue_id, &sm).is_err());
    assert!(amf.ue_context(amf_ue_id).unwrap().pdu_sessions.is_empty());
    Ok(())
}

/// An SM PDU too large for the payload container is refused before sending
#[test]
fn test_oversized_sm_pdu_refused() -> TestResult {
    init_test_logging();

    let (codec, amf, amf_ue_id) = registered()?;
    let err = codec.encode_ul_nas_transport(1, &vec![0x2e; 70_000]).unwrap_err();
    assert!(err.is_structural());
    assert!(amf.ue_context(amf_ue_id).unwrap().pdu_sessions.is_empty());
    Ok(())
}
