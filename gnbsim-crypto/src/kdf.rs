//! Key derivation (3GPP TS 33.220 Annex B, TS 33.501 Annex A)

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// HMAC-SHA256 output size in bytes
pub const HMAC_SHA256_SIZE: usize = 32;

/// FC for RES* / XRES* derivation (TS 33.501 A.4)
pub const FC_RES_STAR: u8 = 0x6B;

/// RES* size in bytes
pub const RES_STAR_SIZE: usize = 16;

/// HMAC-SHA256 over `input`.
pub fn hmac_sha256(key: &[u8], input: &[u8]) -> [u8; HMAC_SHA256_SIZE] {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(input);
    let mut out = [0u8; HMAC_SHA256_SIZE];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Generic KDF: HMAC-SHA256(key, FC || P0 || L0 || ... || Pn || Ln).
///
/// Each Li is the big-endian 2-octet length of Pi.
pub fn kdf(key: &[u8], fc: u8, parameters: &[&[u8]]) -> [u8; HMAC_SHA256_SIZE] {
    let mut s = Vec::with_capacity(1 + parameters.iter().map(|p| p.len() + 2).sum::<usize>());
    s.push(fc);
    for parameter in parameters {
        s.extend_from_slice(parameter);
        s.extend_from_slice(&(parameter.len() as u16).to_be_bytes());
    }
    hmac_sha256(key, &s)
}

/// Derives RES* from CK, IK, the serving network name, RAND and RES.
///
/// The key is CK || IK, and the result is the low 128 bits of the KDF output.
pub fn derive_res_star(
    ck: &[u8; 16],
    ik: &[u8; 16],
    serving_network_name: &str,
    rand: &[u8; 16],
    res: &[u8],
) -> [u8; RES_STAR_SIZE] {
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(ck);
    key[16..].copy_from_slice(ik);

    let output = kdf(&key, FC_RES_STAR, &[serving_network_name.as_bytes(), rand, res]);
    let mut res_star = [0u8; RES_STAR_SIZE];
    res_star.copy_from_slice(&output[HMAC_SHA256_SIZE - RES_STAR_SIZE..]);
    res_star
}
