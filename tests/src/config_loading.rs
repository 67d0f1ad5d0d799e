//! Subscriber profile loading integration tests

use std::io::Write;

use gnbsim_common::{OpType, SubscriberProfile};
use gnbsim_nas::{NasCodec, NasError, Subscriber};
use integration_tests::{
    init_test_logging, test_profile, TestResult, TestSubscriberConfig, CONFORMANCE_REGISTRATION_REQUEST,
};
use tempfile::NamedTempFile;

const PROFILE_YAML: &str = r#"
msin: "0123456789"
mcc: "123"
mnc: "45"
routing_indicator: "1234"
protection_scheme: null
home_network_public_key_id: 0
key: "465b5ce8b199b49faa5f0a2ee238a6bc"
op: "cdc202d5123e20f62b6d676ac72cb318"
op_type: Op
"#;

fn write_temp(contents: &str) -> TestResult<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

/// YAML profile with OP drives the conformance Registration Request
#[test]
fn test_yaml_profile_file() -> TestResult {
    init_test_logging();

    let file = write_temp(PROFILE_YAML)?;
    let profile = SubscriberProfile::from_yaml_file(file.path())?;
    assert_eq!(profile.op_type, OpType::Op);

    let ue = Subscriber::from_profile(&profile)?;
    assert_eq!(ue.auth_params().opc(), &TestSubscriberConfig::default().opc);

    let pdu = NasCodec::new().encode_registration_request(ue.identity())?;
    assert_eq!(hex::encode(pdu), CONFORMANCE_REGISTRATION_REQUEST);
    Ok(())
}

/// JSON profile using the long field aliases
#[test]
fn test_json_profile_file() -> TestResult {
    init_test_logging();

    let json = r#"{
        "msin": "0123456789",
        "mcc": "123",
        "mnc": "45",
        "routing_indicator": "1234",
        "long_term_key": "465b5ce8b199b49faa5f0a2ee238a6bc",
        "operator_key_derivative": "cd63cb71954a9f4e48a5994e37a02baf",
        "op_type": "Opc"
    }"#;
    let file = write_temp(json)?;
    let profile = SubscriberProfile::from_json_file(file.path())?;
    assert_eq!(profile, test_profile());
    Ok(())
}

/// Profile written back to YAML loads to the same subscriber
#[test]
fn test_profile_yaml_round_trip() -> TestResult {
    let yaml = test_profile().to_yaml()?;
    assert_eq!(SubscriberProfile::from_yaml(&yaml)?, test_profile());
    Ok(())
}

/// Bad keys and digits surface as configuration errors
#[test]
fn test_invalid_profiles() -> TestResult {
    init_test_logging();

    let mut short_key = test_profile();
    short_key.key = "465b5ce8".to_string();
    assert!(matches!(Subscriber::from_profile(&short_key), Err(NasError::Config(_))));

    let mut bad_hex = test_profile();
    bad_hex.op = "zz".repeat(16);
    assert!(matches!(Subscriber::from_profile(&bad_hex), Err(NasError::Config(_))));

    let mut long_msin = test_profile();
    long_msin.msin = "01234567890".to_string();
    assert!(matches!(Subscriber::from_profile(&long_msin), Err(NasError::Config(_))));

    assert!(SubscriberProfile::from_yaml_file("/nonexistent/gnbsim/profile.yaml").is_err());
    Ok(())
}
