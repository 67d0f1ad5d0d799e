//! Type 4 information elements (TLV, one-octet length)

use bytes::{Buf, BufMut};

use super::{iei, need, tail};
use crate::error::{NasError, NasResult};

/// Reads a one-octet length and that many value bytes starting at `offset`.
///
/// Returns the value and the offset after it.
pub(crate) fn read_lv<'a>(pdu: &'a [u8], offset: usize, ie: &'static str) -> NasResult<(&'a [u8], usize)> {
    let mut buf = tail(pdu, offset);
    need(&buf, ie, offset, 1)?;
    let length = usize::from(buf.get_u8());
    need(&buf, ie, offset + 1, length)?;
    Ok((&buf[..length], offset + 1 + length))
}

/// One-octet length of `value`, or `InvalidIeLength` if it does not fit.
pub(crate) fn lv_length(ie: &'static str, value: &[u8]) -> NasResult<u8> {
    u8::try_from(value.len()).map_err(|_| NasError::InvalidIeLength {
        ie,
        length: value.len(),
    })
}

fn put_tlv<B: BufMut>(buf: &mut B, iei: u8, ie: &'static str, value: &[u8]) -> NasResult<()> {
    let length = lv_length(ie, value)?;
    buf.put_u8(iei);
    buf.put_u8(length);
    buf.put_slice(value);
    Ok(())
}

/// 5GMM capability (TS 24.501 9.11.3.1)
///
/// Only the first capability octet is modelled; further octets are accepted
/// on decode and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IeFiveGmmCapability {
    /// First capability octet
    pub flags: u8,
}

impl IeFiveGmmCapability {
    /// N3 data transfer supported
    pub const N3_DATA: u8 = 0x20;
    /// LTE positioning protocol supported
    pub const LPP: u8 = 0x08;
    /// S1 mode supported
    pub const S1_MODE: u8 = 0x01;

    /// Decodes the length and value at `offset` (after the IEI).
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<(Self, usize)> {
        let (value, next) = read_lv(pdu, offset, "5GMM capability")?;
        if !(1..=13).contains(&value.len()) {
            return Err(NasError::InvalidIeLength {
                ie: "5GMM capability",
                length: value.len(),
            });
        }
        Ok((Self { flags: value[0] }, next))
    }

    /// Writes IEI, length and the capability octet.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(iei::FIVEGMM_CAPABILITY);
        buf.put_u8(1);
        buf.put_u8(self.flags);
    }
}

impl Default for IeFiveGmmCapability {
    fn default() -> Self {
        Self { flags: Self::N3_DATA }
    }
}

/// UE security capability (TS 24.501 9.11.3.54)
///
/// Algorithm octets are bitmaps with EA0/IA0 in the most significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IeUeSecurityCapability {
    /// 5GS encryption algorithms
    pub ea: u8,
    /// 5GS integrity algorithms
    pub ia: u8,
    /// EPS encryption algorithms
    pub eea: Option<u8>,
    /// EPS integrity algorithms
    pub eia: Option<u8>,
}

impl IeUeSecurityCapability {
    /// EA0 / IA0 bit
    pub const NULL_ALGORITHM: u8 = 0x80;

    /// Null ciphering and integrity only, with empty EPS octets.
    pub const fn null_algorithms() -> Self {
        Self {
            ea: Self::NULL_ALGORITHM,
            ia: Self::NULL_ALGORITHM,
            eea: Some(0),
            eia: Some(0),
        }
    }

    /// True if 5GS encryption algorithm `alg` (0 for EA0) is advertised.
    pub fn supports_ea(&self, alg: u8) -> bool {
        alg < 8 && self.ea & (0x80 >> alg) != 0
    }

    /// True if 5GS integrity algorithm `alg` (0 for IA0) is advertised.
    pub fn supports_ia(&self, alg: u8) -> bool {
        alg < 8 && self.ia & (0x80 >> alg) != 0
    }

    /// Decodes the length and value at `offset` (after the IEI).
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<(Self, usize)> {
        let (value, next) = read_lv(pdu, offset, "UE security capability")?;
        if !(2..=8).contains(&value.len()) {
            return Err(NasError::InvalidIeLength {
                ie: "UE security capability",
                length: value.len(),
            });
        }
        let ie = Self {
            ea: value[0],
            ia: value[1],
            eea: value.get(2).copied(),
            eia: value.get(3).copied(),
        };
        Ok((ie, next))
    }

    /// Writes IEI, length and the algorithm octets.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(iei::UE_SECURITY_CAPABILITY);
        match (self.eea, self.eia) {
            (None, None) => {
                buf.put_u8(2);
                buf.put_slice(&[self.ea, self.ia]);
            }
            (eea, eia) => {
                buf.put_u8(4);
                buf.put_slice(&[self.ea, self.ia, eea.unwrap_or(0), eia.unwrap_or(0)]);
            }
        }
    }
}

impl Default for IeUeSecurityCapability {
    fn default() -> Self {
        Self::null_algorithms()
    }
}

/// Authentication parameter AUTN (TS 24.501 9.11.3.15)
///
/// The 16-byte token splits at fixed offsets into SQN ⊕ AK, AMF and MAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IeAuthParamAutn {
    /// Sequence number concealed with the anonymity key
    pub sqn_xor_ak: [u8; 6],
    /// Authentication management field
    pub amf: [u8; 2],
    /// Network MAC (MAC-A)
    pub mac: [u8; 8],
}

impl IeAuthParamAutn {
    /// AUTN value size in bytes
    pub const SIZE: usize = 16;

    /// Splits a 16-byte AUTN into its fields.
    pub fn from_bytes(autn: &[u8; Self::SIZE]) -> Self {
        let mut buf = &autn[..];
        let mut ie = Self::default();
        buf.copy_to_slice(&mut ie.sqn_xor_ak);
        buf.copy_to_slice(&mut ie.amf);
        buf.copy_to_slice(&mut ie.mac);
        ie
    }

    /// Concatenates the fields back into the 16-byte token.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut autn = [0u8; Self::SIZE];
        let mut buf = &mut autn[..];
        buf.put_slice(&self.sqn_xor_ak);
        buf.put_slice(&self.amf);
        buf.put_slice(&self.mac);
        autn
    }

    /// Decodes the length and value at `offset` (after the IEI).
    ///
    /// The length must be exactly 16.
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<(Self, usize)> {
        let (value, next) = read_lv(pdu, offset, "AUTN")?;
        let autn: &[u8; Self::SIZE] = value.try_into().map_err(|_| NasError::InvalidIeLength {
            ie: "AUTN",
            length: value.len(),
        })?;
        Ok((Self::from_bytes(autn), next))
    }

    /// Writes IEI, length and the token.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(iei::AUTHENTICATION_PARAMETER_AUTN);
        buf.put_u8(16);
        buf.put_slice(&self.to_bytes());
    }
}

/// ABBA (TS 24.501 9.11.3.10), carried as opaque bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Abba(pub Vec<u8>);

impl Abba {
    /// Decodes the mandatory LV-encoded value at `offset`.
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<(Self, usize)> {
        let (value, next) = read_lv(pdu, offset, "ABBA")?;
        Ok((Self(value.to_vec()), next))
    }

    /// Writes length and value (no IEI).
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        buf.put_u8(lv_length("ABBA", &self.0)?);
        buf.put_slice(&self.0);
        Ok(())
    }
}

impl Default for Abba {
    fn default() -> Self {
        Self(vec![0x00, 0x00])
    }
}

/// Authentication response parameter (TS 24.501 9.11.3.17): RES or RES*
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IeAuthResponseParameter(pub Vec<u8>);

impl IeAuthResponseParameter {
    /// Decodes the length and value at `offset` (after the IEI).
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<(Self, usize)> {
        let (value, next) = read_lv(pdu, offset, "authentication response parameter")?;
        Ok((Self(value.to_vec()), next))
    }

    /// Writes IEI, length and value.
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        put_tlv(
            buf,
            iei::AUTHENTICATION_RESPONSE_PARAMETER,
            "authentication response parameter",
            &self.0,
        )
    }
}
