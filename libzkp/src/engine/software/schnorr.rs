//! Single-signer Schnorr signatures with aggregatable partial signatures.
//!
//! A signature is `r || s` (32 bytes each, big-endian), where `r` is the x coordinate of the total nonce `R` taken
//! with an even y, and `s = k + e*x` with `e = SHA256(r || P || message)`. `P` is the compressed total public key, so
//! partial signatures over the same message and nonce total add up to a full signature.

use crate::engine::software::args::{exact_length, Arguments};
use crate::engine::software::curve::{
    compressed, has_odd_y, hash_to_scalar, lift_x, nonzero_scalar_from_bytes, point_from_bytes,
    random_nonzero_scalar, scalar_from_bytes, scalar_to_bytes, x_coordinate,
};
use crate::engine::{EngineError, Operation, Response};
use k256::ecdsa::Signature as DerCapableSignature;
use k256::{FieldBytes, ProjectivePoint, Scalar};
use log::*;

const SIGNATURE_SIZE: usize = 64;

struct SchnorrSignature {
    r: [u8; 32],
    s: Scalar,
}

impl SchnorrSignature {
    fn parse(bytes: &[u8]) -> Result<Self, EngineError> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(EngineError::malformed(format!(
                "signature must be {SIGNATURE_SIZE} bytes, but got {}",
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        let s = scalar_from_bytes(&bytes[32..], "signature s")?;
        Ok(SchnorrSignature { r, s })
    }

    /// Accepts the 64-byte compact form or its DER encoding.
    fn normalize(bytes: &[u8]) -> Result<Self, EngineError> {
        if bytes.len() == SIGNATURE_SIZE {
            return Self::parse(bytes);
        }
        let der = DerCapableSignature::from_der(bytes)
            .map_err(|e| EngineError::malformed(format!("signature is neither compact nor valid DER: {e}")))?;
        let (r, s) = der.split_bytes();
        let mut compact = r.to_vec();
        compact.extend_from_slice(&s);
        Self::parse(&compact)
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.r.to_vec();
        bytes.extend_from_slice(&scalar_to_bytes(&self.s));
        bytes
    }
}

fn challenge(r: &[u8; 32], public_key_total: &ProjectivePoint, message: &[u8]) -> Result<Scalar, EngineError> {
    let key = compressed(public_key_total, "public key total")?;
    Ok(hash_to_scalar(&[r, &key, message]))
}

/// Negates `nonce` if its public point has an odd y, so that `r` always names an even-y point.
fn normalize_nonce(nonce: Scalar, public_nonce: &ProjectivePoint) -> Scalar {
    if has_odd_y(public_nonce) {
        -nonce
    } else {
        nonce
    }
}

pub fn create(args: &mut Arguments) -> Result<Response, EngineError> {
    let message = args.bytes("message")?;
    let secret = nonzero_scalar_from_bytes(&args.bytes("secret key")?, "secret key")?;
    let secret_nonce = args.optional_bytes("secret nonce")?;
    let public_key = point_from_bytes(&args.bytes("public key")?, "public key")?;
    let public_nonce = args.optional_bytes("public nonce")?;
    let public_nonce_total = args.optional_bytes("public nonce total")?;

    let (nonce, total) = match (secret_nonce, public_nonce, public_nonce_total) {
        (None, None, None) => {
            let nonce = random_nonzero_scalar();
            (nonce, ProjectivePoint::GENERATOR * nonce)
        }
        (Some(secret_nonce), Some(public_nonce), Some(public_nonce_total)) => {
            let nonce = nonzero_scalar_from_bytes(&secret_nonce, "secret nonce")?;
            let public_nonce = point_from_bytes(&public_nonce, "public nonce")?;
            if ProjectivePoint::GENERATOR * nonce != public_nonce {
                return Err(EngineError::malformed("secret nonce does not match public nonce"));
            }
            (nonce, point_from_bytes(&public_nonce_total, "public nonce total")?)
        }
        _ => {
            return Err(EngineError::malformed(
                "secret nonce, public nonce and public nonce total must be supplied together or not at all",
            ))
        }
    };
    let nonce = normalize_nonce(nonce, &total);
    let r = x_coordinate(&total);
    let e = challenge(&r, &public_key, &message)?;
    let signature = SchnorrSignature { r, s: nonce + e * secret };
    Ok(Response::Text(hex::encode(signature.to_bytes())))
}

pub fn add(args: &mut Arguments) -> Result<Response, EngineError> {
    let signatures = args.list("signatures")?;
    let total = point_from_bytes(&args.bytes("public nonce total")?, "public nonce total")?;
    if signatures.is_empty() {
        return Err(EngineError::malformed("at least one signature is required"));
    }
    let r = x_coordinate(&total);
    let mut s = Scalar::ZERO;
    for bytes in &signatures {
        let partial = SchnorrSignature::parse(bytes)?;
        if partial.r != r {
            return Err(EngineError::failure("partial signature was not made with the public nonce total"));
        }
        s += partial.s;
    }
    debug!("Added {} partial signatures", signatures.len());
    Ok(Response::Text(hex::encode(SchnorrSignature { r, s }.to_bytes())))
}

pub fn verify(args: &mut Arguments) -> Result<Response, EngineError> {
    let signature = SchnorrSignature::normalize(&args.bytes("signature")?)?;
    let message = args.bytes("message")?;
    let public_nonce = match args.optional_bytes("public nonce")? {
        Some(bytes) => Some(point_from_bytes(&bytes, "public nonce")?),
        None => None,
    };
    let public_key = point_from_bytes(&args.bytes("public key")?, "public key")?;
    let public_key_total = point_from_bytes(&args.bytes("public key total")?, "public key total")?;
    let is_partial = args.flag("is partial")?;

    let e = challenge(&signature.r, &public_key_total, &message)?;
    let q = ProjectivePoint::GENERATOR * signature.s - public_key * e;
    let verified = if is_partial {
        let public_nonce =
            public_nonce.ok_or_else(|| EngineError::malformed("verifying a partial signature requires its public nonce"))?;
        q == public_nonce || q == -public_nonce
    } else {
        let nonce_matches = public_nonce.map(|nonce| x_coordinate(&nonce) == signature.r).unwrap_or(true);
        q != ProjectivePoint::IDENTITY && !has_odd_y(&q) && x_coordinate(&q) == signature.r && nonce_matches
    };
    trace!("Single-signer signature verification (partial: {is_partial}): {verified}");
    Ok(Response::Bool(verified))
}

pub fn is_valid(args: &mut Arguments) -> Result<Response, EngineError> {
    let bytes = args.bytes("signature")?;
    let valid = SchnorrSignature::normalize(&bytes).and_then(|sig| lift_x(&sig.r, "signature r")).is_ok();
    Ok(Response::Bool(valid))
}

/// Reads the raw in-memory layout: `r` then `s`, each 32 bytes little-endian.
pub fn from_data(args: &mut Arguments) -> Result<Response, EngineError> {
    let data: [u8; SIGNATURE_SIZE] =
        exact_length(Operation::SingleSignerSignatureFromData, "data", args.bytes("data")?)?;
    let mut r = [0u8; 32];
    r.copy_from_slice(&data[..32]);
    r.reverse();
    let mut s = [0u8; 32];
    s.copy_from_slice(&data[32..]);
    s.reverse();
    let signature = SchnorrSignature { r, s: scalar_from_bytes(&s, "signature s")? };
    Ok(Response::Text(hex::encode(signature.to_bytes())))
}

/// DER to 64-byte compact form. A compact signature is returned as-is.
pub fn compact(args: &mut Arguments) -> Result<Response, EngineError> {
    let signature = SchnorrSignature::normalize(&args.bytes("signature")?)?;
    Ok(Response::Text(hex::encode(signature.to_bytes())))
}

/// 64-byte compact form to DER.
pub fn uncompact(args: &mut Arguments) -> Result<Response, EngineError> {
    let signature = SchnorrSignature::parse(&args.bytes("signature")?)?;
    let r = FieldBytes::clone_from_slice(&signature.r);
    let s = signature.s.to_bytes();
    let der = DerCapableSignature::from_scalars(r, s)
        .map_err(|e| EngineError::invalid(format!("signature cannot be DER-encoded: {e}")))?
        .to_der();
    Ok(Response::Text(hex::encode(der.as_bytes())))
}
