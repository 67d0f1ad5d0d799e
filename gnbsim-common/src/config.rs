//! Subscriber profile configuration
//!
//! A profile carries everything a simulated device needs to register:
//! identity digits, SUCI protection parameters and AKA key material. Profiles
//! are loaded from YAML or JSON.
//!
//! ```yaml
//! msin: "0123456789"
//! mcc: "123"
//! mnc: "45"
//! routing_indicator: "1234"
//! protection_scheme: null
//! key: "465b5ce8b199b49faa5f0a2ee238a6bc"
//! op: "cd63cb71954a9f4e48a5994e37a02baf"
//! op_type: Opc
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{Plmn, ProtectionScheme, SubscriberIdentity};

/// Size of the long-term key K and of OP/OPc in bytes.
pub const AUTH_KEY_SIZE: usize = 16;

/// Operator key type for authentication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpType {
    /// Operator key (OP), converted to OPc before use
    Op,
    /// Operator key derivative (OPc), used directly
    #[default]
    Opc,
}

/// Subscriber profile as supplied by the provisioning layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberProfile {
    /// MSIN digits
    pub msin: String,
    /// Mobile Country Code digits
    pub mcc: String,
    /// Mobile Network Code digits (2 or 3)
    pub mnc: String,
    /// Routing indicator digits
    #[serde(default = "default_routing_indicator")]
    pub routing_indicator: String,
    /// SUCI protection scheme
    #[serde(default, deserialize_with = "deserialize_scheme")]
    pub protection_scheme: ProtectionScheme,
    /// Home network public key identifier
    #[serde(default)]
    pub home_network_public_key_id: u8,
    /// Long-term key K (hex)
    #[serde(alias = "long_term_key")]
    pub key: String,
    /// Operator key OP or OPc (hex), see `op_type`
    #[serde(alias = "operator_key_derivative")]
    pub op: String,
    /// Whether `op` holds OP or OPc
    #[serde(default)]
    pub op_type: OpType,
}

fn default_routing_indicator() -> String {
    "0".to_owned()
}

// YAML `null` and a missing key both mean the null scheme.
fn deserialize_scheme<'de, D>(deserializer: D) -> Result<ProtectionScheme, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<ProtectionScheme>::deserialize(deserializer)?.unwrap_or_default())
}

fn decode_key(field: &'static str, value: &str) -> Result<[u8; AUTH_KEY_SIZE], Error> {
    let bytes = hex::decode(value.trim()).map_err(|source| Error::InvalidHex { field, source })?;
    <[u8; AUTH_KEY_SIZE]>::try_from(bytes.as_slice()).map_err(|_| Error::KeyLength {
        field,
        expected: AUTH_KEY_SIZE,
        actual: bytes.len(),
    })
}

impl SubscriberProfile {
    /// Parses a subscriber profile from a YAML string.
    ///
    /// # Example
    /// ```
    /// use gnbsim_common::SubscriberProfile;
    ///
    /// let yaml = r#"
    /// msin: "0123456789"
    /// mcc: "001"
    /// mnc: "01"
    /// key: "465b5ce8b199b49faa5f0a2ee238a6bc"
    /// op: "cd63cb71954a9f4e48a5994e37a02baf"
    /// "#;
    ///
    /// let profile = SubscriberProfile::from_yaml(yaml).unwrap();
    /// assert_eq!(profile.routing_indicator, "0");
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a subscriber profile from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parses a subscriber profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a subscriber profile from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serializes the profile to a YAML string.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Builds the validated subscriber identity.
    pub fn identity(&self) -> Result<SubscriberIdentity, Error> {
        let plmn = Plmn::parse(&self.mcc, &self.mnc)?;
        Ok(SubscriberIdentity::new(&self.msin, plmn, &self.routing_indicator)?
            .with_protection(self.protection_scheme, self.home_network_public_key_id))
    }

    /// Decodes the long-term key K.
    pub fn key_bytes(&self) -> Result<[u8; AUTH_KEY_SIZE], Error> {
        decode_key("key", &self.key)
    }

    /// Decodes the operator key (OP or OPc depending on `op_type`).
    pub fn op_bytes(&self) -> Result<[u8; AUTH_KEY_SIZE], Error> {
        decode_key("op", &self.op)
    }
}
