//! IEI dispatch tables
//!
//! Each message that carries optional IEs owns an immutable table mapping an
//! IEI to its decoder. Decoding stops at the first IEI the table does not
//! list; the rest of the PDU is not skipped.

use std::fmt;

use tracing::warn;

use super::{iei, tail, IeAuthParamAutn, IeAuthParamRand, IeFiveGmmCapability, IeUeSecurityCapability};
use super::InformationElement;
use crate::error::{NasError, NasResult};

/// Decodes one IE value at the offset following its IEI.
pub type IeDecoder = fn(&[u8], usize) -> NasResult<(InformationElement, usize)>;

/// Immutable IEI to decoder mapping.
#[derive(Clone, Copy)]
pub struct IeTable {
    message: &'static str,
    entries: &'static [(u8, IeDecoder)],
}

fn autn_entry(pdu: &[u8], offset: usize) -> NasResult<(InformationElement, usize)> {
    IeAuthParamAutn::decode(pdu, offset).map(|(ie, next)| (InformationElement::AuthParamAutn(ie), next))
}

fn rand_entry(pdu: &[u8], offset: usize) -> NasResult<(InformationElement, usize)> {
    IeAuthParamRand::decode(pdu, offset).map(|(ie, next)| (InformationElement::AuthParamRand(ie), next))
}

fn capability_entry(pdu: &[u8], offset: usize) -> NasResult<(InformationElement, usize)> {
    IeFiveGmmCapability::decode(pdu, offset).map(|(ie, next)| (InformationElement::FiveGmmCapability(ie), next))
}

fn security_capability_entry(pdu: &[u8], offset: usize) -> NasResult<(InformationElement, usize)> {
    IeUeSecurityCapability::decode(pdu, offset)
        .map(|(ie, next)| (InformationElement::UeSecurityCapability(ie), next))
}

/// Optional IEs of the Authentication Request handled by this codec.
pub static AUTHENTICATION_REQUEST_IES: IeTable = IeTable::new(
    "Authentication Request",
    &[
        (iei::AUTHENTICATION_PARAMETER_AUTN, autn_entry as IeDecoder),
        (iei::AUTHENTICATION_PARAMETER_RAND, rand_entry as IeDecoder),
    ],
);

/// Optional IEs of the Registration Request handled by this codec.
pub static REGISTRATION_REQUEST_IES: IeTable = IeTable::new(
    "Registration Request",
    &[
        (iei::FIVEGMM_CAPABILITY, capability_entry as IeDecoder),
        (iei::UE_SECURITY_CAPABILITY, security_capability_entry as IeDecoder),
    ],
);

impl IeTable {
    /// Creates a table for `message` from `(iei, decoder)` pairs.
    pub const fn new(message: &'static str, entries: &'static [(u8, IeDecoder)]) -> Self {
        Self { message, entries }
    }

    /// Decoder registered for `iei`.
    pub fn lookup(&self, iei: u8) -> Option<IeDecoder> {
        self.entries
            .iter()
            .find(|(registered, _)| *registered == iei)
            .map(|&(_, decoder)| decoder)
    }

    /// Decodes IEs from `start` until the end of `pdu`.
    ///
    /// An unregistered IEI yields `UnsupportedInformationElement` carrying
    /// the IEs decoded so far.
    pub fn decode_all(&self, pdu: &[u8], start: usize) -> NasResult<Vec<InformationElement>> {
        let mut decoded = Vec::new();
        let mut offset = start;

        while let Some(&iei) = tail(pdu, offset).first() {
            let Some(decoder) = self.lookup(iei) else {
                warn!(
                    message = self.message,
                    iei,
                    offset,
                    "unsupported IE, aborting decode"
                );
                return Err(NasError::UnsupportedInformationElement { iei, offset, decoded });
            };
            let (ie, next) = decoder(pdu, offset + 1)?;
            decoded.push(ie);
            offset = next;
        }
        Ok(decoded)
    }
}

impl fmt::Debug for IeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ieis: Vec<String> = self.entries.iter().map(|(iei, _)| format!("0x{iei:02x}")).collect();
        f.debug_struct("IeTable")
            .field("message", &self.message)
            .field("ieis", &ieis)
            .finish()
    }
}
