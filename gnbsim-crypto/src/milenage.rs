//! Milenage authentication functions (3GPP TS 35.206)
//!
//! - f1 / f1*: network authentication code MAC-A and resync code MAC-S
//! - f2: response RES
//! - f3 / f4: cipher key CK and integrity key IK
//! - f5 / f5*: anonymity keys for AUTN and AUTS
//!
//! All functions share one kernel: OUTn = E_K(rot(X ⊕ OPc, rn) ⊕ cn) ⊕ OPc,
//! with the default rotations and constants from TS 35.206 section 4.1.

use crate::aes::{xor_into, Aes128Block, Block, BLOCK_SIZE, KEY_SIZE};

/// OP/OPc size in bytes
pub const OP_SIZE: usize = 16;
/// RAND size in bytes
pub const RAND_SIZE: usize = 16;
/// SQN size in bytes
pub const SQN_SIZE: usize = 6;
/// AMF size in bytes
pub const AMF_SIZE: usize = 2;
/// MAC-A / MAC-S size in bytes
pub const MAC_SIZE: usize = 8;
/// RES size in bytes
pub const RES_SIZE: usize = 8;
/// CK and IK size in bytes
pub const CK_IK_SIZE: usize = 16;
/// AK size in bytes
pub const AK_SIZE: usize = 6;

// Rotations r1..r5 in bytes, and the final octet of constants c1..c5.
const R1: usize = 8;
const R2: usize = 0;
const R3: usize = 4;
const R4: usize = 8;
const R5: usize = 12;
const C1: u8 = 0x00;
const C2: u8 = 0x01;
const C3: u8 = 0x02;
const C4: u8 = 0x04;
const C5: u8 = 0x08;

fn take<const N: usize>(block: &Block, start: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&block[start..start + N]);
    out
}

/// Derives OPc = E_K(OP) ⊕ OP.
pub fn compute_opc(key: &[u8; KEY_SIZE], op: &[u8; OP_SIZE]) -> [u8; OP_SIZE] {
    let mut opc = Aes128Block::new(key).encrypt(op);
    xor_into(&mut opc, op);
    opc
}

/// Key material produced by f2, f3, f4 and f5 for one RAND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilenageOutput {
    /// f2: authentication response
    pub res: [u8; RES_SIZE],
    /// f3: cipher key
    pub ck: [u8; CK_IK_SIZE],
    /// f4: integrity key
    pub ik: [u8; CK_IK_SIZE],
    /// f5: anonymity key
    pub ak: [u8; AK_SIZE],
}

/// Milenage instance bound to a subscriber key and OPc.
#[derive(Clone)]
pub struct Milenage {
    cipher: Aes128Block,
    opc: [u8; OP_SIZE],
}

impl Milenage {
    /// Creates an instance from K and a precomputed OPc.
    pub fn new(key: &[u8; KEY_SIZE], opc: &[u8; OP_SIZE]) -> Self {
        Self {
            cipher: Aes128Block::new(key),
            opc: *opc,
        }
    }

    /// Creates an instance from K and the operator key OP.
    pub fn with_op(key: &[u8; KEY_SIZE], op: &[u8; OP_SIZE]) -> Self {
        Self::new(key, &compute_opc(key, op))
    }

    /// OPc in use.
    pub fn opc(&self) -> &[u8; OP_SIZE] {
        &self.opc
    }

    fn temp(&self, rand: &[u8; RAND_SIZE]) -> Block {
        let mut block = *rand;
        xor_into(&mut block, &self.opc);
        self.cipher.encrypt(&block)
    }

    fn output_block(&self, mut block: Block, rotation: usize, constant: u8, temp: Option<&Block>) -> Block {
        xor_into(&mut block, &self.opc);
        block.rotate_left(rotation);
        if let Some(temp) = temp {
            xor_into(&mut block, temp);
        }
        block[BLOCK_SIZE - 1] ^= constant;

        let mut out = self.cipher.encrypt(&block);
        xor_into(&mut out, &self.opc);
        out
    }

    /// f1 and f1*: returns `(MAC-A, MAC-S)`.
    pub fn f1_pair(
        &self,
        rand: &[u8; RAND_SIZE],
        sqn: &[u8; SQN_SIZE],
        amf: &[u8; AMF_SIZE],
    ) -> ([u8; MAC_SIZE], [u8; MAC_SIZE]) {
        let mut in1 = [0u8; BLOCK_SIZE];
        for half in in1.chunks_exact_mut(SQN_SIZE + AMF_SIZE) {
            half[..SQN_SIZE].copy_from_slice(sqn);
            half[SQN_SIZE..].copy_from_slice(amf);
        }

        let temp = self.temp(rand);
        let out1 = self.output_block(in1, R1, C1, Some(&temp));
        (take(&out1, 0), take(&out1, MAC_SIZE))
    }

    /// f1: network authentication code MAC-A.
    pub fn f1(&self, rand: &[u8; RAND_SIZE], sqn: &[u8; SQN_SIZE], amf: &[u8; AMF_SIZE]) -> [u8; MAC_SIZE] {
        self.f1_pair(rand, sqn, amf).0
    }

    /// f1*: resynchronisation code MAC-S.
    pub fn f1_star(&self, rand: &[u8; RAND_SIZE], sqn: &[u8; SQN_SIZE], amf: &[u8; AMF_SIZE]) -> [u8; MAC_SIZE] {
        self.f1_pair(rand, sqn, amf).1
    }

    /// f2, f3, f4 and f5 in one pass over RAND.
    pub fn f2345(&self, rand: &[u8; RAND_SIZE]) -> MilenageOutput {
        let temp = self.temp(rand);
        let out2 = self.output_block(temp, R2, C2, None);
        let out3 = self.output_block(temp, R3, C3, None);
        let out4 = self.output_block(temp, R4, C4, None);

        MilenageOutput {
            res: take(&out2, 8),
            ck: out3,
            ik: out4,
            ak: take(&out2, 0),
        }
    }

    /// f5*: anonymity key used to conceal SQN in AUTS.
    pub fn f5_star(&self, rand: &[u8; RAND_SIZE]) -> [u8; AK_SIZE] {
        let out5 = self.output_block(self.temp(rand), R5, C5, None);
        take(&out5, 0)
    }
}
