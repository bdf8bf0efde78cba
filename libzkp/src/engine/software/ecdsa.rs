//! Deterministic ECDSA over a 32-byte message hash.

use crate::engine::software::args::Arguments;
use crate::engine::{EngineError, Response};
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};

const HASH_SIZE: usize = 32;

fn message_hash(args: &mut Arguments) -> Result<Vec<u8>, EngineError> {
    let hash = args.bytes("message hash")?;
    if hash.len() != HASH_SIZE {
        return Err(EngineError::malformed(format!("message hash must be {HASH_SIZE} bytes, but got {}", hash.len())));
    }
    Ok(hash)
}

/// RFC 6979 nonces, low-S, DER-encoded.
pub fn sign(args: &mut Arguments) -> Result<Response, EngineError> {
    let hash = message_hash(args)?;
    let secret_key = args.fixed::<32>("secret key")?;
    let key = SigningKey::from_slice(&secret_key)
        .map_err(|_| EngineError::invalid("secret key is not a valid scalar"))?;
    let signature: Signature =
        key.sign_prehash(&hash).map_err(|e| EngineError::failure(format!("could not sign message hash: {e}")))?;
    Ok(Response::Text(hex::encode(signature.to_der().as_bytes())))
}

pub fn verify(args: &mut Arguments) -> Result<Response, EngineError> {
    let bytes = args.bytes("signature")?;
    let hash = message_hash(args)?;
    let key = VerifyingKey::from_sec1_bytes(&args.bytes("public key")?)
        .map_err(|_| EngineError::invalid("public key is not a point on the curve"))?;
    let signature = match bytes.len() {
        64 => Signature::from_slice(&bytes),
        _ => Signature::from_der(&bytes),
    }
    .map_err(|e| EngineError::malformed(format!("signature could not be parsed: {e}")))?;
    Ok(Response::Bool(key.verify_prehash(&hash, &signature).is_ok()))
}
