//! Multiple UE scenario integration tests
//!
//! Each UE owns its subscriber state; the codec is shared.

use std::sync::Mutex;
use std::thread;

use gnbsim_nas::{AuthState, NasCodec};
use integration_tests::{init_test_logging, MockAmf, TestResult, TestSubscriberConfig};

/// Ten UEs register through one codec and one AMF
#[test]
fn test_multiple_ue_registration() -> TestResult {
    init_test_logging();

    let base = TestSubscriberConfig::default();
    let codec = NasCodec::new();
    let mut amf = MockAmf::with_config(base.amf_config());

    let mut ue_ids = Vec::new();
    for i in 0..10 {
        let mut ue = base.clone().with_msin(&format!("00000000{i:02}")).subscriber();
        let (amf_ue_id, auth_request) = amf.handle_registration_request(&codec.encode_registration_request(ue.identity())?)?;
        codec.decode(&auth_request, &mut ue)?;
        amf.handle_uplink(amf_ue_id, &codec.encode_authentication_response(&ue)?)?;
        amf.handle_uplink(amf_ue_id, &codec.encode_registration_complete())?;
        ue_ids.push(amf_ue_id);
    }

    assert_eq!(amf.ue_count(), 10);
    for (i, amf_ue_id) in ue_ids.iter().enumerate() {
        let ctx = amf.ue_context(*amf_ue_id).unwrap();
        assert!(ctx.registered);
        assert_eq!(ctx.supi, format!("imsi-1234500000000{i:02}"));
    }
    Ok(())
}

/// UEs on separate threads share the codec by copy and the AMF behind a lock
#[test]
fn test_concurrent_ues() {
    init_test_logging();

    let base = TestSubscriberConfig::default();
    let codec = NasCodec::new();
    let amf = Mutex::new(MockAmf::with_config(base.amf_config()));

    thread::scope(|scope| {
        for i in 0..4 {
            let base = base.clone();
            let amf = &amf;
            scope.spawn(move || {
                let mut ue = base.with_msin(&format!("99999999{i:02}")).subscriber();
                let registration = codec.encode_registration_request(ue.identity()).unwrap();
                let (amf_ue_id, auth_request) = amf.lock().unwrap().handle_registration_request(&registration).unwrap();

                codec.decode(&auth_request, &mut ue).unwrap();
                assert_eq!(ue.state(), AuthState::Verified);

                let response = codec.encode_authentication_response(&ue).unwrap();
                amf.lock().unwrap().handle_uplink(amf_ue_id, &response).unwrap();
            });
        }
    });

    let amf = amf.into_inner().unwrap();
    assert_eq!(amf.ue_count(), 4);
    assert!((1..=4).all(|id| amf.ue_context(id).unwrap().authenticated));
}

/// One UE failing authentication does not affect another
#[test]
fn test_independent_state() -> TestResult {
    init_test_logging();

    let base = TestSubscriberConfig::default();
    let codec = NasCodec::new();
    let mut honest = base.clone().subscriber();
    let mut wrong_key = base.clone().with_msin("1111111111");
    wrong_key.key[0] ^= 0x01;
    let mut forged = wrong_key.subscriber();

    let mut amf = MockAmf::with_config(base.amf_config());
    let (_, challenge_a) = amf.handle_registration_request(&codec.encode_registration_request(honest.identity())?)?;
    let (_, challenge_b) = amf.handle_registration_request(&codec.encode_registration_request(forged.identity())?)?;

    assert!(codec.decode(&challenge_b, &mut forged).is_err());
    codec.decode(&challenge_a, &mut honest)?;

    assert_eq!(honest.state(), AuthState::Verified);
    assert_eq!(forged.state(), AuthState::Rejected);
    Ok(())
}
