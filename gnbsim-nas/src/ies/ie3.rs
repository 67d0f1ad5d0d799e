//! Type 3 information elements (fixed length, no length octet)

use bytes::{Buf, BufMut};

use super::{iei, need, tail};
use crate::error::NasResult;

/// Authentication parameter RAND (TS 24.501 9.11.3.16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IeAuthParamRand(pub [u8; IeAuthParamRand::SIZE]);

impl IeAuthParamRand {
    /// RAND value size in bytes
    pub const SIZE: usize = 16;

    /// Reads the 16-byte value at `offset`; returns it with the next offset.
    pub fn decode(pdu: &[u8], offset: usize) -> NasResult<(Self, usize)> {
        let mut buf = tail(pdu, offset);
        need(&buf, "RAND", offset, Self::SIZE)?;

        let mut value = [0u8; Self::SIZE];
        buf.copy_to_slice(&mut value);
        Ok((Self(value), offset + Self::SIZE))
    }

    /// Writes the IEI and the value.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(iei::AUTHENTICATION_PARAMETER_RAND);
        buf.put_slice(&self.0);
    }
}
