//! Key, blind and nonce operations.

use crate::engine::software::args::Arguments;
use crate::engine::software::curve::{
    compressed, hash_to_scalar, nonzero_scalar_from_bytes, point_from_bytes, random_nonzero_scalar, scalar_from_bytes,
    scalar_to_bytes, uncompressed,
};
use crate::engine::software::generators::Generators;
use crate::engine::software::pedersen::commit;
use crate::engine::{EngineError, Response};
use k256::{ProjectivePoint, Scalar};
use log::*;
use sha2::{Digest, Sha256};

fn hex_response(bytes: Vec<u8>) -> Result<Response, EngineError> {
    Ok(Response::Text(hex::encode(bytes)))
}

pub fn is_valid_secret_key(args: &mut Arguments) -> Result<Response, EngineError> {
    let bytes = args.bytes("secret key")?;
    Ok(Response::Bool(nonzero_scalar_from_bytes(&bytes, "secret key").is_ok()))
}

pub fn is_valid_public_key(args: &mut Arguments) -> Result<Response, EngineError> {
    let bytes = args.bytes("public key")?;
    Ok(Response::Bool(point_from_bytes(&bytes, "public key").is_ok()))
}

pub fn public_key_from_secret_key(args: &mut Arguments) -> Result<Response, EngineError> {
    let secret = nonzero_scalar_from_bytes(&args.bytes("secret key")?, "secret key")?;
    hex_response(compressed(&(ProjectivePoint::GENERATOR * secret), "public key")?)
}

/// The data is hashed to a scalar rather than validated as a key.
pub fn public_key_from_data(args: &mut Arguments) -> Result<Response, EngineError> {
    let data = args.bytes("data")?;
    let digest: [u8; 32] = Sha256::digest(&data).into();
    let secret = nonzero_scalar_from_bytes(&digest, "hashed data")?;
    hex_response(compressed(&(ProjectivePoint::GENERATOR * secret), "public key")?)
}

pub fn uncompress_public_key(args: &mut Arguments) -> Result<Response, EngineError> {
    let point = point_from_bytes(&args.bytes("public key")?, "public key")?;
    hex_response(uncompressed(&point, "public key")?)
}

pub fn secret_key_tweak_add(args: &mut Arguments) -> Result<Response, EngineError> {
    let secret = nonzero_scalar_from_bytes(&args.bytes("secret key")?, "secret key")?;
    let tweak = scalar_from_bytes(&args.bytes("tweak")?, "tweak")?;
    let result = secret + tweak;
    if bool::from(result.is_zero()) {
        return Err(EngineError::invalid("tweaked secret key is zero"));
    }
    hex_response(scalar_to_bytes(&result))
}

pub fn public_key_tweak_add(args: &mut Arguments) -> Result<Response, EngineError> {
    let point = point_from_bytes(&args.bytes("public key")?, "public key")?;
    let tweak = scalar_from_bytes(&args.bytes("tweak")?, "tweak")?;
    hex_response(compressed(&(point + ProjectivePoint::GENERATOR * tweak), "tweaked public key")?)
}

pub fn secret_key_tweak_multiply(args: &mut Arguments) -> Result<Response, EngineError> {
    let secret = nonzero_scalar_from_bytes(&args.bytes("secret key")?, "secret key")?;
    let tweak = nonzero_scalar_from_bytes(&args.bytes("tweak")?, "tweak")?;
    hex_response(scalar_to_bytes(&(secret * tweak)))
}

pub fn public_key_tweak_multiply(args: &mut Arguments) -> Result<Response, EngineError> {
    let point = point_from_bytes(&args.bytes("public key")?, "public key")?;
    let tweak = nonzero_scalar_from_bytes(&args.bytes("tweak")?, "tweak")?;
    hex_response(compressed(&(point * tweak), "tweaked public key")?)
}

/// ECDH: SHA-256 of the compressed shared point.
pub fn shared_secret(args: &mut Arguments) -> Result<Response, EngineError> {
    let secret = nonzero_scalar_from_bytes(&args.bytes("secret key")?, "secret key")?;
    let point = point_from_bytes(&args.bytes("public key")?, "public key")?;
    let shared = compressed(&(point * secret), "shared point")?;
    let digest: [u8; 32] = Sha256::digest(&shared).into();
    nonzero_scalar_from_bytes(&digest, "shared secret")?;
    hex_response(digest.to_vec())
}

pub fn combine_public_keys(args: &mut Arguments) -> Result<Response, EngineError> {
    let keys = args.list("public keys")?;
    if keys.is_empty() {
        return Err(EngineError::malformed("at least one public key is required"));
    }
    let mut total = ProjectivePoint::IDENTITY;
    for key in &keys {
        total += point_from_bytes(key, "public key")?;
    }
    hex_response(compressed(&total, "combined public key")?)
}

pub fn create_secret_nonce(_args: &mut Arguments) -> Result<Response, EngineError> {
    hex_response(scalar_to_bytes(&random_nonzero_scalar()))
}

/// `positive - negative`. A zero result is a legitimate blind.
pub fn blind_sum(args: &mut Arguments) -> Result<Response, EngineError> {
    let positive = args.list("positive blinds")?;
    let negative = args.list("negative blinds")?;
    let mut sum = Scalar::ZERO;
    for blind in &positive {
        sum += scalar_from_bytes(blind, "blind")?;
    }
    for blind in &negative {
        sum -= scalar_from_bytes(blind, "blind")?;
    }
    trace!("Summed {} positive and {} negative blinds", positive.len(), negative.len());
    hex_response(scalar_to_bytes(&sum))
}

/// `blind + H(commit(blind, value) || blind*J)`.
pub fn blind_switch(generators: &Generators, args: &mut Arguments) -> Result<Response, EngineError> {
    let blind = nonzero_scalar_from_bytes(&args.bytes("blind")?, "blind")?;
    let value = args.value("value")?;
    let commitment = commit(generators, &blind, value)?;
    let switch_point = compressed(&(generators.j * blind), "switch point")?;
    let switched = blind + hash_to_scalar(&[&commitment, &switch_point]);
    if bool::from(switched.is_zero()) {
        return Err(EngineError::invalid("switched blind is zero"));
    }
    hex_response(scalar_to_bytes(&switched))
}
