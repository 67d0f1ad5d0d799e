//! 5G AKA challenge verification on the device side
//!
//! TS 33.102 6.3.3 and TS 33.501 6.1.3.2. Given K, OPc, RAND and AUTN the
//! device must:
//!
//! 1. derive AK (f5) together with RES, CK and IK (f2 to f4)
//! 2. recover SQN = (SQN ⊕ AK) ⊕ AK
//! 3. compute MAC-A (f1) over the recovered SQN and the AMF from AUTN
//! 4. accept the network only if MAC-A equals the MAC carried in AUTN
//!
//! These steps only run together through [`process_challenge`]; MAC-A is
//! never computed over an SQN that was not unmasked with this RAND's AK.

use std::fmt;

use gnbsim_crypto::milenage::{Milenage, AK_SIZE, CK_IK_SIZE, MAC_SIZE, RES_SIZE, SQN_SIZE};
use thiserror::Error;

use crate::ies::{IeAuthParamAutn, IeAuthParamRand};

/// Authentication state of a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthState {
    /// No challenge processed yet
    #[default]
    AwaitingChallenge,
    /// Last challenge carried a valid network MAC
    Verified,
    /// Last challenge failed the MAC check
    Rejected,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthState::AwaitingChallenge => "AWAITING-CHALLENGE",
            AuthState::Verified => "VERIFIED",
            AuthState::Rejected => "REJECTED",
        })
    }
}

/// The MAC in AUTN does not match the one computed from K and OPc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("AUTN MAC mismatch: computed {}, received {}", hex::encode(.computed), hex::encode(.received))]
pub struct AuthenticationMismatch {
    /// MAC-A computed locally
    pub computed: [u8; MAC_SIZE],
    /// MAC carried in AUTN
    pub received: [u8; MAC_SIZE],
}

/// Material derived from an accepted challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AkaVectors {
    /// f2: response to return to the network
    pub res: [u8; RES_SIZE],
    /// f3: cipher key
    pub ck: [u8; CK_IK_SIZE],
    /// f4: integrity key
    pub ik: [u8; CK_IK_SIZE],
    /// f5: anonymity key
    pub ak: [u8; AK_SIZE],
    /// Sequence number recovered from AUTN
    pub sqn: [u8; SQN_SIZE],
    /// f1: MAC-A, equal to the MAC in AUTN
    pub mac_a: [u8; MAC_SIZE],
    /// f1*: resynchronisation MAC over the same SQN and AMF
    pub mac_s: [u8; MAC_SIZE],
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Verifies a network challenge and derives the AKA outputs.
pub fn process_challenge(
    key: &[u8; 16],
    opc: &[u8; 16],
    rand: &IeAuthParamRand,
    autn: &IeAuthParamAutn,
) -> Result<AkaVectors, AuthenticationMismatch> {
    let milenage = Milenage::new(key, opc);
    let keys = milenage.f2345(&rand.0);

    let mut sqn = autn.sqn_xor_ak;
    sqn.iter_mut().zip(keys.ak).for_each(|(s, ak)| *s ^= ak);

    let (mac_a, mac_s) = milenage.f1_pair(&rand.0, &sqn, &autn.amf);
    if !constant_time_eq(&mac_a, &autn.mac) {
        return Err(AuthenticationMismatch {
            computed: mac_a,
            received: autn.mac,
        });
    }

    Ok(AkaVectors {
        res: keys.res,
        ck: keys.ck,
        ik: keys.ik,
        ak: keys.ak,
        sqn,
        mac_a,
        mac_s,
    })
}
