//! Type 6 information elements (TLV-E, two-octet length)

use bytes::{Buf, BufMut};
use gnbsim_common::{bcd, Plmn, ProtectionScheme, SubscriberIdentity};

use super::ie1::{IdentityType, SupiFormat};
use super::{iei, need, tail};
use crate::error::{NasError, NasResult};

/// Reads a two-octet length and that many value bytes starting at `offset`.
pub(crate) fn read_lve<'a>(pdu: &'a [u8], offset: usize, ie: &'static str) -> NasResult<(&'a [u8], usize)> {
    let mut buf = tail(pdu, offset);
    need(&buf, ie, offset, 2)?;
    let length = usize::from(buf.get_u16());
    need(&buf, ie, offset + 2, length)?;
    Ok((&buf[..length], offset + 2 + length))
}

/// Two-octet length of `value`, or `InvalidIeLength` if it does not fit.
pub(crate) fn lve_length(ie: &'static str, value: &[u8]) -> NasResult<u16> {
    u16::try_from(value.len()).map_err(|_| NasError::InvalidIeLength {
        ie,
        length: value.len(),
    })
}

fn put_lve<B: BufMut>(buf: &mut B, ie: &'static str, value: &[u8]) -> NasResult<()> {
    buf.put_u16(lve_length(ie, value)?);
    buf.put_slice(value);
    Ok(())
}

/// Five-octet SUCI scheme output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemeOutput(pub [u8; SchemeOutput::SIZE]);

impl SchemeOutput {
    /// Scheme output size in bytes
    pub const SIZE: usize = 5;

    /// Null-scheme output: the MSIN in BCD, right-padded with zero octets.
    pub fn null_scheme(msin: &str) -> NasResult<Self> {
        if msin.is_empty() || msin.len() > SubscriberIdentity::MAX_MSIN_DIGITS {
            return Err(NasError::InvalidIdentityEncoding(format!(
                "MSIN has {} digits, expected 1 to {}",
                msin.len(),
                SubscriberIdentity::MAX_MSIN_DIGITS
            )));
        }
        if !msin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NasError::InvalidIdentityEncoding(format!("MSIN {msin:?} is not decimal")));
        }
        let packed = bcd::encode(msin).map_err(|e| NasError::InvalidIdentityEncoding(e.to_string()))?;

        let mut output = [0u8; Self::SIZE];
        output[..packed.len()].copy_from_slice(&packed);
        Ok(Self(output))
    }
}

impl TryFrom<&[u8]> for SchemeOutput {
    type Error = NasError;

    fn try_from(value: &[u8]) -> NasResult<Self> {
        value.try_into().map(Self).map_err(|_| {
            NasError::InvalidIdentityEncoding(format!(
                "scheme output is {} bytes, expected {}",
                value.len(),
                Self::SIZE
            ))
        })
    }
}

fn encode_routing_indicator(routing_indicator: &str) -> NasResult<[u8; 2]> {
    if routing_indicator.is_empty()
        || routing_indicator.len() > SubscriberIdentity::MAX_ROUTING_INDICATOR_DIGITS
        || !routing_indicator.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(NasError::InvalidIdentityEncoding(format!(
            "routing indicator {routing_indicator:?} must be 1 to 4 decimal digits"
        )));
    }
    let packed = bcd::encode(routing_indicator).map_err(|e| NasError::InvalidIdentityEncoding(e.to_string()))?;

    let mut octets = [0u8; 2];
    octets[..packed.len()].copy_from_slice(&packed);
    Ok(octets)
}

fn decode_routing_indicator(octets: [u8; 2]) -> NasResult<String> {
    octets
        .iter()
        .flat_map(|o| [o & 0x0F, o >> 4])
        .take_while(|&nibble| nibble != bcd::FILLER)
        .map(|nibble| match nibble {
            0..=9 => Ok(char::from(b'0' + nibble)),
            _ => Err(NasError::InvalidIdentityEncoding(format!(
                "routing indicator nibble 0x{nibble:X}"
            ))),
        })
        .collect()
}

/// SUCI contents of a 5GS mobile identity (TS 24.501 figure 9.11.3.4.3)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suci {
    /// SUPI format
    pub supi_format: SupiFormat,
    /// Home network identifier
    pub plmn: Plmn,
    /// Routing indicator, BCD
    pub routing_indicator: [u8; 2],
    /// Protection scheme identifier
    pub protection_scheme_id: u8,
    /// Home network public key identifier
    pub home_network_public_key_id: u8,
    /// Scheme output
    pub scheme_output: Vec<u8>,
}

impl Suci {
    /// Routing indicator digits, stopping at the first filler nibble.
    ///
    /// A short indicator is right-padded with zero octets on the wire, so
    /// "12" comes back as "1200".
    pub fn routing_indicator_digits(&self) -> NasResult<String> {
        decode_routing_indicator(self.routing_indicator)
    }

    /// MSIN carried in a null-scheme output.
    ///
    /// Zero padding after a short MSIN is indistinguishable from trailing
    /// zero digits and comes back as digits.
    pub fn msin(&self) -> NasResult<String> {
        match ProtectionScheme::from_id(self.protection_scheme_id) {
            Some(ProtectionScheme::Null) => bcd::decode(&self.scheme_output)
                .map_err(|e| NasError::InvalidIdentityEncoding(e.to_string())),
            Some(scheme) => Err(NasError::UnsupportedProtectionScheme(scheme)),
            None => Err(NasError::InvalidIdentityEncoding(format!(
                "protection scheme {}",
                self.protection_scheme_id
            ))),
        }
    }
}

/// 5GS mobile identity (TS 24.501 9.11.3.4)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IeMobileIdentity {
    /// Subscription concealed identifier
    Suci(Suci),
    /// Any other identity type, kept as raw value octets
    Other {
        /// Identity type from the low three bits of the first octet
        identity_type: u8,
        /// Complete value, first octet included
        value: Vec<u8>,
    },
}

impl IeMobileIdentity {
    /// Value length of a null-scheme IMSI SUCI
    pub const SUCI_LENGTH: usize = 13;

    /// Null-scheme SUCI for `identity`.
    pub fn suci(identity: &SubscriberIdentity) -> NasResult<Self> {
        if identity.protection_scheme != ProtectionScheme::Null {
            return Err(NasError::UnsupportedProtectionScheme(identity.protection_scheme));
        }
        Self::suci_with_output(identity, SchemeOutput::null_scheme(&identity.msin)?)
    }

    /// SUCI for `identity` with a caller-supplied scheme output.
    pub fn suci_with_output(identity: &SubscriberIdentity, scheme_output: SchemeOutput) -> NasResult<Self> {
        if identity.protection_scheme != ProtectionScheme::Null {
            return Err(NasError::UnsupportedProtectionScheme(identity.protection_scheme));
        }
        Ok(Self::Suci(Suci {
            supi_format: SupiFormat::Imsi,
            plmn: identity.plmn,
            routing_indicator: encode_routing_indicator(&identity.routing_indicator)?,
            protection_scheme_id: identity.protection_scheme.id(),
            home_network_public_key_id: identity.home_network_public_key_id,
            scheme_output: scheme_output.0.to_vec(),
        }))
    }

    /// Decodes the LV-E value at `offset`.
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<(Self, usize)> {
        let (value, next) = read_lve(pdu, offset, "5GS mobile identity")?;
        let invalid_length = || NasError::InvalidIeLength {
            ie: "5GS mobile identity",
            length: value.len(),
        };

        let first = *value.first().ok_or_else(invalid_length)?;
        if first & 0x07 != u8::from(IdentityType::Suci) {
            let ie = Self::Other {
                identity_type: first & 0x07,
                value: value.to_vec(),
            };
            return Ok((ie, next));
        }
        if value.len() < 8 {
            return Err(invalid_length());
        }

        let mut buf = &value[1..];
        let supi_format = SupiFormat::try_from((first >> 4) & 0x07).map_err(|_| {
            NasError::InvalidIdentityEncoding(format!("SUPI format {}", (first >> 4) & 0x07))
        })?;
        let mut plmn = [0u8; 3];
        buf.copy_to_slice(&mut plmn);
        let mut ri = [0u8; 2];
        buf.copy_to_slice(&mut ri);
        let protection_scheme_id = buf.get_u8() & 0x0F;
        let home_network_public_key_id = buf.get_u8();

        let suci = Suci {
            supi_format,
            plmn: Plmn::decode(plmn).map_err(|e| NasError::InvalidIdentityEncoding(e.to_string()))?,
            routing_indicator: ri,
            protection_scheme_id,
            home_network_public_key_id,
            scheme_output: buf.to_vec(),
        };
        Ok((Self::Suci(suci), next))
    }

    /// Writes the two-octet length and the value.
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        match self {
            IeMobileIdentity::Suci(suci) => {
                let mut value = Vec::with_capacity(8 + suci.scheme_output.len());
                value.put_u8((u8::from(suci.supi_format) << 4) | u8::from(IdentityType::Suci));
                value.put_slice(&suci.plmn.encode());
                value.put_slice(&suci.routing_indicator);
                value.put_u8(suci.protection_scheme_id);
                value.put_u8(suci.home_network_public_key_id);
                value.put_slice(&suci.scheme_output);
                put_lve(buf, "5GS mobile identity", &value)
            }
            IeMobileIdentity::Other { value, .. } => put_lve(buf, "5GS mobile identity", value),
        }
    }
}

/// NAS message container (TS 24.501 9.11.3.33), optional TLV-E
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IeNasMessageContainer(pub Vec<u8>);

impl IeNasMessageContainer {
    /// Writes IEI, two-octet length and the contained PDU.
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        let length = lve_length("NAS message container", &self.0)?;
        buf.put_u8(iei::NAS_MESSAGE_CONTAINER);
        buf.put_u16(length);
        buf.put_slice(&self.0);
        Ok(())
    }
}

/// Payload container (TS 24.501 9.11.3.39), mandatory LV-E
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IePayloadContainer(pub Vec<u8>);

impl IePayloadContainer {
    /// Decodes the LV-E value at `offset`.
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<(Self, usize)> {
        let (value, next) = read_lve(pdu, offset, "payload container")?;
        Ok((Self(value.to_vec()), next))
    }

    /// Writes the two-octet length and the payload.
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        put_lve(buf, "payload container", &self.0)
    }
}
