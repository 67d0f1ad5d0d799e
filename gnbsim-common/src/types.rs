//! Subscriber identity types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bcd;
use crate::error::Error;

/// Public Land Mobile Network identifier.
///
/// - MCC (Mobile Country Code): 3 decimal digits
/// - MNC (Mobile Network Code): 2 or 3 decimal digits
///
/// `long_mnc` records whether the MNC was provisioned with 3 digits; it moves
/// the filler nibble in the encoded form.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plmn {
    /// Mobile Country Code
    pub mcc: u16,
    /// Mobile Network Code
    pub mnc: u16,
    /// True if MNC is 3 digits
    pub long_mnc: bool,
}

fn decimal_digits(value: u16) -> [u8; 3] {
    [
        ((value / 100) % 10) as u8,
        ((value / 10) % 10) as u8,
        (value % 10) as u8,
    ]
}

fn check_digits(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), Error> {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidDigits {
            field,
            reason: format!("{value:?} contains non-decimal characters"),
        });
    }
    if !(min..=max).contains(&value.len()) {
        return Err(Error::InvalidDigits {
            field,
            reason: format!("{} digits, expected {min} to {max}", value.len()),
        });
    }
    Ok(())
}

impl Plmn {
    /// Creates a new PLMN with the given MCC and MNC.
    pub const fn new(mcc: u16, mnc: u16, long_mnc: bool) -> Self {
        Self { mcc, mnc, long_mnc }
    }

    /// Parses a PLMN from its provisioned digit strings.
    ///
    /// The MNC length is taken from the string, so `"01"` and `"001"` are
    /// different networks.
    pub fn parse(mcc: &str, mnc: &str) -> Result<Self, Error> {
        check_digits("mcc", mcc, 2, 3)?;
        check_digits("mnc", mnc, 2, 3)?;
        Ok(Self {
            mcc: mcc.parse().map_err(|_| Error::Config(format!("mcc {mcc:?}")))?,
            mnc: mnc.parse().map_err(|_| Error::Config(format!("mnc {mnc:?}")))?,
            long_mnc: mnc.len() == 3,
        })
    }

    /// Encodes the PLMN in 3GPP TS 24.008 layout.
    ///
    /// - Octet 1: MCC digit 2 | MCC digit 1
    /// - Octet 2: MNC digit 3 or filler | MCC digit 3
    /// - Octet 3: MNC digit 2 | MNC digit 1
    pub fn encode(&self) -> [u8; 3] {
        let [mcc1, mcc2, mcc3] = decimal_digits(self.mcc);
        let [n1, n2, n3] = decimal_digits(self.mnc);
        let (mnc1, mnc2, mnc3) = if self.long_mnc {
            (n1, n2, n3)
        } else {
            (n2, n3, bcd::FILLER)
        };

        [(mcc2 << 4) | mcc1, (mnc3 << 4) | mcc3, (mnc2 << 4) | mnc1]
    }

    /// Decodes a PLMN from its 3-octet encoding.
    ///
    /// Every nibble must be a decimal digit, except the filler that marks a
    /// 2-digit MNC.
    pub fn decode(octets: [u8; 3]) -> Result<Self, Error> {
        let digit = |nibble: u8| -> Result<u16, Error> {
            if nibble <= 9 {
                Ok(u16::from(nibble))
            } else {
                Err(Error::InvalidDigits {
                    field: "plmn",
                    reason: format!("nibble 0x{nibble:X} in {}", hex::encode(octets)),
                })
            }
        };

        let mcc = 100 * digit(octets[0] & 0x0F)? + 10 * digit(octets[0] >> 4)? + digit(octets[1] & 0x0F)?;
        let mnc_head = 10 * digit(octets[2] & 0x0F)? + digit(octets[2] >> 4)?;

        match octets[1] >> 4 {
            bcd::FILLER => Ok(Self::new(mcc, mnc_head, false)),
            tail => Ok(Self::new(mcc, 10 * mnc_head + digit(tail)?, true)),
        }
    }

    /// Serving network name used as KDF input (TS 24.501 9.12.1).
    pub fn serving_network_name(&self) -> String {
        format!("5G:mnc{:03}.mcc{:03}.3gppnetwork.org", self.mnc, self.mcc)
    }
}

impl fmt::Debug for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plmn({self})")
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.long_mnc {
            write!(f, "{:03}{:03}", self.mcc, self.mnc)
        } else {
            write!(f, "{:03}{:02}", self.mcc, self.mnc)
        }
    }
}

/// SUCI protection scheme identifier (TS 24.501 9.11.3.4).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtectionScheme {
    /// Null scheme: the scheme output is the MSIN itself
    #[default]
    Null,
    /// ECIES profile A
    ProfileA,
    /// ECIES profile B
    ProfileB,
}

impl ProtectionScheme {
    /// Wire value of the scheme identifier.
    pub const fn id(self) -> u8 {
        match self {
            ProtectionScheme::Null => 0,
            ProtectionScheme::ProfileA => 1,
            ProtectionScheme::ProfileB => 2,
        }
    }

    /// Scheme for a wire identifier, `None` for values this codebase does not know.
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(ProtectionScheme::Null),
            1 => Some(ProtectionScheme::ProfileA),
            2 => Some(ProtectionScheme::ProfileB),
            _ => None,
        }
    }
}

/// Subscriber identity as provisioned on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberIdentity {
    /// Mobile Subscriber Identification Number (up to 10 digits)
    pub msin: String,
    /// Home PLMN
    pub plmn: Plmn,
    /// Routing indicator (up to 4 digits)
    pub routing_indicator: String,
    /// SUCI protection scheme
    pub protection_scheme: ProtectionScheme,
    /// Home network public key identifier
    pub home_network_public_key_id: u8,
}

impl SubscriberIdentity {
    /// Maximum MSIN length that fits the 5-octet null-scheme output.
    pub const MAX_MSIN_DIGITS: usize = 10;
    /// Maximum routing indicator length.
    pub const MAX_ROUTING_INDICATOR_DIGITS: usize = 4;

    /// Creates a validated identity with the null protection scheme.
    pub fn new(msin: &str, plmn: Plmn, routing_indicator: &str) -> Result<Self, Error> {
        check_digits("msin", msin, 1, Self::MAX_MSIN_DIGITS)?;
        check_digits(
            "routing_indicator",
            routing_indicator,
            1,
            Self::MAX_ROUTING_INDICATOR_DIGITS,
        )?;
        Ok(Self {
            msin: msin.to_owned(),
            plmn,
            routing_indicator: routing_indicator.to_owned(),
            protection_scheme: ProtectionScheme::Null,
            home_network_public_key_id: 0,
        })
    }

    /// Sets the protection scheme and home network public key identifier.
    pub fn with_protection(mut self, scheme: ProtectionScheme, hnpki: u8) -> Self {
        self.protection_scheme = scheme;
        self.home_network_public_key_id = hnpki;
        self
    }

    /// IMSI-based SUPI, e.g. `imsi-123450123456789`.
    pub fn supi(&self) -> String {
        format!("imsi-{}{}", self.plmn, self.msin)
    }
}
