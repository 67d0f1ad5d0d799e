//! UE Registration integration tests
//!
//! Runs the registration procedure against the mock AMF: Registration
//! Request, 5G-AKA, Security Mode Complete and Registration Complete.

use gnbsim_nas::{AuthState, DecodedMessage, NasCodec};
use integration_tests::{
    init_test_logging, test_identity, MockAmf, MockAmfEvent, TestResult, TestSubscriberConfig,
    CONFORMANCE_REGISTRATION_REQUEST,
};

/// Registration Request matches the reference encoding byte for byte
#[test]
fn test_registration_request_conformance() -> TestResult {
    init_test_logging();

    let pdu = NasCodec::new().encode_registration_request(&test_identity())?;
    assert_eq!(hex::encode(pdu), CONFORMANCE_REGISTRATION_REQUEST);
    Ok(())
}

/// Full registration with an honest network
#[test]
fn test_ue_registration_basic() -> TestResult {
    init_test_logging();

    let config = TestSubscriberConfig::default();
    let codec = NasCodec::new();
    let mut ue = config.subscriber();
    let mut amf = MockAmf::with_config(config.amf_config());

    let registration = codec.encode_registration_request(ue.identity())?;
    let (amf_ue_id, auth_request) = amf.handle_registration_request(&registration)?;
    assert_eq!(amf.ue_context(amf_ue_id).unwrap().supi, "imsi-123450123456789");

    let decoded = codec.decode(&auth_request, &mut ue)?;
    assert!(matches!(decoded, DecodedMessage::AuthenticationRequest(_)));
    assert_eq!(ue.state(), AuthState::Verified);
    assert_eq!(hex::encode(ue.derived_response().unwrap()), "a54211d5e3ba50bf");

    amf.handle_uplink(amf_ue_id, &codec.encode_authentication_response(&ue)?)?;
    amf.handle_uplink(amf_ue_id, &codec.encode_security_mode_complete(Some(&registration))?)?;
    amf.handle_uplink(amf_ue_id, &codec.encode_registration_complete())?;

    let ctx = amf.ue_context(amf_ue_id).unwrap();
    assert!(ctx.authenticated);
    assert!(ctx.registered);
    assert_eq!(
        amf.events(),
        &[
            MockAmfEvent::RegistrationRequest {
                amf_ue_id,
                supi: "imsi-123450123456789".to_string()
            },
            MockAmfEvent::AuthenticationSucceeded { amf_ue_id },
            MockAmfEvent::SecurityModeComplete { amf_ue_id },
            MockAmfEvent::RegistrationComplete { amf_ue_id },
        ]
    );
    Ok(())
}

/// A second challenge replaces the first and yields a fresh RES
#[test]
fn test_reauthentication() -> TestResult {
    init_test_logging();

    let config = TestSubscriberConfig::default();
    let codec = NasCodec::new();
    let mut ue = config.subscriber();

    let mut first = MockAmf::with_config(config.amf_config());
    let (_, auth_request) = first.handle_registration_request(&codec.encode_registration_request(ue.identity())?)?;
    codec.decode(&auth_request, &mut ue)?;
    let first_res = ue.derived_response().unwrap().to_vec();

    let mut amf_config = config.amf_config();
    amf_config.rand = [0x5a; 16];
    amf_config.sqn = [0x00, 0x00, 0x00, 0x00, 0x00, 0x21];
    let mut second = MockAmf::with_config(amf_config);
    let (amf_ue_id, auth_request) =
        second.handle_registration_request(&codec.encode_registration_request(ue.identity())?)?;
    codec.decode(&auth_request, &mut ue)?;

    assert_eq!(ue.state(), AuthState::Verified);
    assert_ne!(ue.derived_response().unwrap(), first_res.as_slice());
    assert_eq!(ue.auth_params().rand().unwrap().0, [0x5a; 16]);

    second.handle_uplink(amf_ue_id, &codec.encode_authentication_response(&ue)?)?;
    assert!(second.ue_context(amf_ue_id).unwrap().authenticated);
    Ok(())
}

/// Downlink messages the codec does not process are reported, not rejected
#[test]
fn test_unsupported_downlink_message() -> TestResult {
    init_test_logging();

    let mut ue = TestSubscriberConfig::default().subscriber();
    // Registration Accept header with a truncated body
    let decoded = NasCodec::new().decode(&[0x7e, 0x00, 0x42, 0x01], &mut ue)?;

    assert_eq!(decoded.name(), "Registration Accept");
    assert_eq!(ue.state(), AuthState::AwaitingChallenge);
    Ok(())
}
