//! Pedersen commitments and their public key form.
//!
//! A commitment is the compressed encoding of `blind*G + value*H` with the prefix moved from `0x02/0x03` to
//! `0x08/0x09`, so that a commitment can never be mistaken for a key.

use crate::engine::software::args::Arguments;
use crate::engine::software::curve::{
    compressed, point_from_bytes, scalar_from_bytes, COMPRESSED_EVEN, COMPRESSED_ODD,
};
use crate::engine::software::generators::Generators;
use crate::engine::{EngineError, Response};
use k256::{ProjectivePoint, Scalar};

const COMMITMENT_EVEN: u8 = 0x08;
const COMMITMENT_ODD: u8 = 0x09;

pub fn encode_commitment(point: &ProjectivePoint) -> Result<Vec<u8>, EngineError> {
    let mut encoded = compressed(point, "commitment")?;
    encoded[0] = if encoded[0] == COMPRESSED_ODD { COMMITMENT_ODD } else { COMMITMENT_EVEN };
    Ok(encoded)
}

pub fn decode_commitment(bytes: &[u8]) -> Result<ProjectivePoint, EngineError> {
    if bytes.len() != 33 {
        return Err(EngineError::malformed(format!("commitment must be 33 bytes, but got {}", bytes.len())));
    }
    let prefix = match bytes[0] {
        COMMITMENT_EVEN => COMPRESSED_EVEN,
        COMMITMENT_ODD => COMPRESSED_ODD,
        other => return Err(EngineError::invalid(format!("commitment has an invalid prefix {other:#04x}"))),
    };
    let mut key = bytes.to_vec();
    key[0] = prefix;
    point_from_bytes(&key, "commitment")
}

pub fn commit_point(generators: &Generators, blind: &Scalar, value: u64) -> ProjectivePoint {
    generators.g * blind + generators.h * Scalar::from(value)
}

pub fn commit(generators: &Generators, blind: &Scalar, value: u64) -> Result<Vec<u8>, EngineError> {
    encode_commitment(&commit_point(generators, blind, value))
}

pub fn is_valid_commit(args: &mut Arguments) -> Result<Response, EngineError> {
    let bytes = args.bytes("commitment")?;
    Ok(Response::Bool(decode_commitment(&bytes).is_ok()))
}

pub fn pedersen_commit(generators: &Generators, args: &mut Arguments) -> Result<Response, EngineError> {
    let blind = scalar_from_bytes(&args.bytes("blind")?, "blind")?;
    let value = args.value("value")?;
    Ok(Response::Text(hex::encode(commit(generators, &blind, value)?)))
}

pub fn pedersen_commit_sum(args: &mut Arguments) -> Result<Response, EngineError> {
    let positive = args.list("positive commitments")?;
    let negative = args.list("negative commitments")?;
    let mut total = ProjectivePoint::IDENTITY;
    for c in &positive {
        total += decode_commitment(c)?;
    }
    for c in &negative {
        total -= decode_commitment(c)?;
    }
    Ok(Response::Text(hex::encode(encode_commitment(&total)?)))
}

pub fn commitment_to_public_key(args: &mut Arguments) -> Result<Response, EngineError> {
    let point = decode_commitment(&args.bytes("commitment")?)?;
    Ok(Response::Text(hex::encode(compressed(&point, "public key")?)))
}

pub fn public_key_to_commitment(args: &mut Arguments) -> Result<Response, EngineError> {
    let point = point_from_bytes(&args.bytes("public key")?, "public key")?;
    Ok(Response::Text(hex::encode(encode_commitment(&point)?)))
}
