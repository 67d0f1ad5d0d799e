//! Test fixtures and configuration helpers
//!
//! The default subscriber uses the TS 35.207 test set 1 keys, so the RES of
//! the default challenge is `a54211d5e3ba50bf`.

use gnbsim_common::{Plmn, SubscriberIdentity, SubscriberProfile};
use gnbsim_nas::Subscriber;

use crate::mock_amf::MockAmfConfig;

/// Registration Request for MSIN 0123456789, PLMN 123/45, routing indicator 1234
pub const CONFORMANCE_REGISTRATION_REQUEST: &str = "7e004179000d0121f3542143000010325476981001202e0480800000";

/// Test subscriber configuration
#[derive(Debug, Clone)]
pub struct TestSubscriberConfig {
    /// MSIN digits
    pub msin: String,
    /// Home PLMN
    pub plmn: Plmn,
    /// Routing indicator digits
    pub routing_indicator: String,
    /// Permanent key (K)
    pub key: [u8; 16],
    /// OPc
    pub opc: [u8; 16],
    /// RAND the mock AMF will issue
    pub rand: [u8; 16],
    /// SQN the mock AMF will issue
    pub sqn: [u8; 6],
    /// AMF field the mock AMF will issue
    pub amf: [u8; 2],
}

impl Default for TestSubscriberConfig {
    fn default() -> Self {
        Self {
            msin: "0123456789".to_string(),
            plmn: Plmn::new(123, 45, false),
            routing_indicator: "1234".to_string(),
            key: [
                0x46, 0x5b, 0x5c, 0xe8, 0xb1, 0x99, 0xb4, 0x9f, 0xaa, 0x5f, 0x0a, 0x2e, 0xe2, 0x38, 0xa6, 0xbc,
            ],
            opc: [
                0xcd, 0x63, 0xcb, 0x71, 0x95, 0x4a, 0x9f, 0x4e, 0x48, 0xa5, 0x99, 0x4e, 0x37, 0xa0, 0x2b, 0xaf,
            ],
            rand: [
                0x23, 0x55, 0x3c, 0xbe, 0x96, 0x37, 0xa8, 0x9d, 0x21, 0x8a, 0xe6, 0x4d, 0xae, 0x47, 0xbf, 0x35,
            ],
            sqn: [0xff, 0x9b, 0xb4, 0xd0, 0xb6, 0x07],
            amf: [0xb9, 0xb9],
        }
    }
}

impl TestSubscriberConfig {
    /// Same keys with a different MSIN
    pub fn with_msin(mut self, msin: &str) -> Self {
        self.msin = msin.to_string();
        self
    }

    /// Subscriber identity for this configuration
    pub fn identity(&self) -> SubscriberIdentity {
        SubscriberIdentity::new(&self.msin, self.plmn, &self.routing_indicator).expect("valid test identity")
    }

    /// Fresh subscriber awaiting a challenge
    pub fn subscriber(&self) -> Subscriber {
        Subscriber::new(self.identity(), self.key, self.opc)
    }

    /// Mock AMF provisioned with the same keys
    pub fn amf_config(&self) -> MockAmfConfig {
        MockAmfConfig {
            plmn: self.plmn,
            key: self.key,
            opc: self.opc,
            rand: self.rand,
            sqn: self.sqn,
            amf: self.amf,
            corrupt_mac: false,
        }
    }
}

/// Default test identity
pub fn test_identity() -> SubscriberIdentity {
    TestSubscriberConfig::default().identity()
}

/// Default test subscriber
pub fn test_subscriber() -> Subscriber {
    TestSubscriberConfig::default().subscriber()
}

/// Default test subscriber as a profile, OPc given directly
pub fn test_profile() -> SubscriberProfile {
    let config = TestSubscriberConfig::default();
    SubscriberProfile {
        msin: config.msin,
        mcc: "123".to_string(),
        mnc: "45".to_string(),
        routing_indicator: config.routing_indicator,
        protection_scheme: Default::default(),
        home_network_public_key_id: 0,
        key: hex::encode(config.key),
        op: hex::encode(config.opc),
        op_type: Default::default(),
    }
}
