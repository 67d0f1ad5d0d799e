//! Authentication failure integration tests
//!
//! A false network (wrong MAC) and malformed challenges must never yield a
//! response, and malformed PDUs must leave the subscriber untouched.

use gnbsim_nas::{AuthState, MmCause, NasCodec, NasError};
use integration_tests::{init_test_logging, MockAmf, MockAmfEvent, TestResult, TestSubscriberConfig};

fn challenge(corrupt_mac: bool) -> TestResult<(MockAmf, u64, Vec<u8>)> {
    let config = TestSubscriberConfig::default();
    let mut amf_config = config.amf_config();
    amf_config.corrupt_mac = corrupt_mac;

    let mut amf = MockAmf::with_config(amf_config);
    let registration = NasCodec::new().encode_registration_request(&config.identity())?;
    let (amf_ue_id, auth_request) = amf.handle_registration_request(&registration)?;
    Ok((amf, amf_ue_id, auth_request))
}

/// Corrupted MAC rejects the network and the UE reports MAC failure
#[test]
fn test_mac_failure() -> TestResult {
    init_test_logging();

    let codec = NasCodec::new();
    let mut ue = TestSubscriberConfig::default().subscriber();
    let (mut amf, amf_ue_id, auth_request) = challenge(true)?;

    let err = codec.decode(&auth_request, &mut ue).unwrap_err();
    assert!(err.is_authentication_failure());
    assert!(!err.is_structural());
    assert_eq!(ue.state(), AuthState::Rejected);
    assert!(ue.derived_response().is_none());
    assert!(matches!(
        codec.encode_authentication_response(&ue),
        Err(NasError::NoDerivedResponse(AuthState::Rejected))
    ));

    amf.handle_uplink(amf_ue_id, &codec.encode_authentication_failure()?)?;
    assert_eq!(
        amf.events().last(),
        Some(&MockAmfEvent::AuthenticationFailure {
            amf_ue_id,
            cause: MmCause::MacFailure
        })
    );
    assert!(!amf.ue_context(amf_ue_id).unwrap().authenticated);
    Ok(())
}

/// Wrong subscriber key behaves like a false network
#[test]
fn test_wrong_key() -> TestResult {
    init_test_logging();

    let mut config = TestSubscriberConfig::default();
    let (_, _, auth_request) = challenge(false)?;
    config.key[15] ^= 0xFF;
    let mut ue = config.subscriber();

    let err = NasCodec::new().decode(&auth_request, &mut ue).unwrap_err();
    assert!(matches!(err, NasError::AuthenticationMismatch(_)));
    Ok(())
}

/// Every truncation of a valid challenge fails structurally without touching state
#[test]
fn test_truncated_challenge_never_panics() -> TestResult {
    init_test_logging();

    let codec = NasCodec::new();
    let (_, _, auth_request) = challenge(false)?;

    for len in 0..auth_request.len() {
        let mut ue = TestSubscriberConfig::default().subscriber();
        match codec.decode(&auth_request[..len], &mut ue) {
            Err(err) => assert!(err.is_structural(), "len {len}: {err}"),
            Ok(decoded) => panic!("len {len} decoded as {decoded:?}"),
        }
        assert_eq!(ue.state(), AuthState::AwaitingChallenge);
        assert!(ue.auth_params().rand().is_none());
    }
    Ok(())
}

/// An unknown IE after a valid challenge aborts before verification
#[test]
fn test_unknown_ie_leaves_state_unchanged() -> TestResult {
    init_test_logging();

    let (_, _, mut auth_request) = challenge(false)?;
    auth_request.extend([0x78, 0x00, 0x04, 0x01, 0x02, 0x00, 0x04]);
    let mut ue = TestSubscriberConfig::default().subscriber();

    match NasCodec::new().decode(&auth_request, &mut ue) {
        Err(NasError::UnsupportedInformationElement { iei, decoded, .. }) => {
            assert_eq!(iei, 0x78);
            assert_eq!(decoded.len(), 2);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(ue.state(), AuthState::AwaitingChallenge);
    assert!(ue.derived_response().is_none());
    Ok(())
}

/// A rejected challenge after a verified one drops the old RES
#[test]
fn test_rejection_clears_previous_response() -> TestResult {
    init_test_logging();

    let codec = NasCodec::new();
    let mut ue = TestSubscriberConfig::default().subscriber();

    let (_, _, honest) = challenge(false)?;
    codec.decode(&honest, &mut ue)?;
    assert!(ue.derived_response().is_some());

    let (_, _, forged) = challenge(true)?;
    assert!(codec.decode(&forged, &mut ue).is_err());
    assert_eq!(ue.state(), AuthState::Rejected);
    assert!(ue.derived_response().is_none());
    Ok(())
}
