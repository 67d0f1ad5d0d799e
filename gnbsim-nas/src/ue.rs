//! Per-device subscriber state
//!
//! A [`Subscriber`] owns the provisioned identity, the long-term keys and the
//! working state of the current authentication challenge. Only the codec and
//! the AKA engine mutate it, always through `&mut`.

use std::fmt;

use gnbsim_common::{OpType, SubscriberIdentity, SubscriberProfile};
use gnbsim_crypto::kdf::{derive_res_star, RES_STAR_SIZE};
use gnbsim_crypto::milenage::compute_opc;
use tracing::{info, warn};

use crate::aka::{self, AkaVectors, AuthState};
use crate::error::{NasError, NasResult};
use crate::ies::{IeAuthParamAutn, IeAuthParamRand};

/// Long-term keys plus the state of the last challenge.
#[derive(Clone)]
pub struct AuthParams {
    long_term_key: [u8; 16],
    opc: [u8; 16],
    rand: Option<IeAuthParamRand>,
    autn: Option<IeAuthParamAutn>,
    vectors: Option<AkaVectors>,
}

impl AuthParams {
    fn new(long_term_key: [u8; 16], opc: [u8; 16]) -> Self {
        Self {
            long_term_key,
            opc,
            rand: None,
            autn: None,
            vectors: None,
        }
    }

    /// Operator key derivative in use.
    pub fn opc(&self) -> &[u8; 16] {
        &self.opc
    }

    /// RAND of the last challenge.
    pub fn rand(&self) -> Option<&IeAuthParamRand> {
        self.rand.as_ref()
    }

    /// AUTN of the last challenge.
    pub fn autn(&self) -> Option<&IeAuthParamAutn> {
        self.autn.as_ref()
    }

    /// RES of the last challenge; present only once its MAC verified.
    pub fn derived_response(&self) -> Option<&[u8]> {
        self.vectors.as_ref().map(|v| v.res.as_slice())
    }

    /// All outputs of the last verified challenge.
    pub fn vectors(&self) -> Option<&AkaVectors> {
        self.vectors.as_ref()
    }
}

impl fmt::Debug for AuthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthParams")
            .field("rand", &self.rand)
            .field("autn", &self.autn)
            .field("verified", &self.vectors.is_some())
            .finish_non_exhaustive()
    }
}

/// A simulated device's subscription and authentication state.
#[derive(Debug, Clone)]
pub struct Subscriber {
    identity: SubscriberIdentity,
    auth: AuthParams,
    state: AuthState,
}

impl Subscriber {
    /// Creates a subscriber from an identity, K and OPc.
    pub fn new(identity: SubscriberIdentity, long_term_key: [u8; 16], opc: [u8; 16]) -> Self {
        Self {
            identity,
            auth: AuthParams::new(long_term_key, opc),
            state: AuthState::default(),
        }
    }

    /// Creates a subscriber from a profile, deriving OPc when OP is configured.
    pub fn from_profile(profile: &SubscriberProfile) -> NasResult<Self> {
        let identity = profile.identity()?;
        let key = profile.key_bytes()?;
        let op = profile.op_bytes()?;
        let opc = match profile.op_type {
            OpType::Op => compute_opc(&key, &op),
            OpType::Opc => op,
        };
        Ok(Self::new(identity, key, opc))
    }

    /// Provisioned identity.
    pub fn identity(&self) -> &SubscriberIdentity {
        &self.identity
    }

    /// SUPI, e.g. `imsi-001010123456789`.
    pub fn supi(&self) -> String {
        self.identity.supi()
    }

    /// Current authentication state.
    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Keys and challenge state.
    pub fn auth_params(&self) -> &AuthParams {
        &self.auth
    }

    /// RES to send in the Authentication Response, once verified.
    pub fn derived_response(&self) -> Option<&[u8]> {
        self.auth.derived_response()
    }

    /// Stores a new challenge and verifies it.
    ///
    /// Any earlier response is dropped first, so a rejected challenge never
    /// leaves a stale RES behind.
    pub fn process_challenge(&mut self, rand: &IeAuthParamRand, autn: &IeAuthParamAutn) -> NasResult<()> {
        self.auth.vectors = None;
        self.auth.rand = Some(*rand);
        self.auth.autn = Some(*autn);

        match aka::process_challenge(&self.auth.long_term_key, &self.auth.opc, rand, autn) {
            Ok(vectors) => {
                self.auth.vectors = Some(vectors);
                self.state = AuthState::Verified;
                info!(supi = %self.supi(), "authentication challenge verified");
                Ok(())
            }
            Err(mismatch) => {
                self.state = AuthState::Rejected;
                warn!(supi = %self.supi(), %mismatch, "authentication challenge rejected");
                Err(mismatch.into())
            }
        }
    }

    /// RES* for the last verified challenge, keyed on the home PLMN's serving network name.
    pub fn res_star(&self) -> NasResult<[u8; RES_STAR_SIZE]> {
        let (Some(vectors), Some(rand)) = (&self.auth.vectors, &self.auth.rand) else {
            return Err(NasError::NoDerivedResponse(self.state));
        };
        let serving_network_name = self.identity.plmn.serving_network_name();
        Ok(derive_res_star(&vectors.ck, &vectors.ik, &serving_network_name, &rand.0, &vectors.res))
    }
}
