//! Conversions between boundary bytes and secp256k1 scalars and points.

use crate::engine::EngineError;
use k256::elliptic_curve::ff::{Field, PrimeField};
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::point::AffineCoordinates;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{FieldBytes, ProjectivePoint, PublicKey, Scalar, U256};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

pub const COMPRESSED_EVEN: u8 = 0x02;
pub const COMPRESSED_ODD: u8 = 0x03;

/// Parses a 32-byte big-endian scalar. Values at or above the group order are rejected, not reduced.
pub fn scalar_from_bytes(bytes: &[u8], name: &str) -> Result<Scalar, EngineError> {
    if bytes.len() != 32 {
        return Err(EngineError::malformed(format!("{name} must be 32 bytes, but got {}", bytes.len())));
    }
    let repr = FieldBytes::clone_from_slice(bytes);
    Option::<Scalar>::from(Scalar::from_repr(repr))
        .ok_or_else(|| EngineError::invalid(format!("{name} is not less than the group order")))
}

/// A scalar in `[1, n)`.
pub fn nonzero_scalar_from_bytes(bytes: &[u8], name: &str) -> Result<Scalar, EngineError> {
    let scalar = scalar_from_bytes(bytes, name)?;
    if bool::from(scalar.is_zero()) {
        return Err(EngineError::invalid(format!("{name} is zero")));
    }
    Ok(scalar)
}

pub fn scalar_to_bytes(scalar: &Scalar) -> Vec<u8> {
    scalar.to_bytes().to_vec()
}

/// Interprets 32 bytes as a big-endian integer reduced modulo the group order.
pub fn reduce(bytes: &[u8; 32]) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(bytes))
}

pub fn hash_to_scalar(parts: &[&[u8]]) -> Scalar {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    reduce(&hasher.finalize().into())
}

pub fn random_nonzero_scalar() -> Scalar {
    loop {
        let scalar = Scalar::random(&mut OsRng);
        if !bool::from(scalar.is_zero()) {
            return scalar;
        }
    }
}

/// Parses a SEC1 compressed or uncompressed point. The point at infinity is not a valid key.
pub fn point_from_bytes(bytes: &[u8], name: &str) -> Result<ProjectivePoint, EngineError> {
    PublicKey::from_sec1_bytes(bytes)
        .map(|key| key.to_projective())
        .map_err(|_| EngineError::invalid(format!("{name} is not a point on the curve")))
}

/// Recovers the point with the given x coordinate and an even y coordinate.
pub fn lift_x(x: &[u8], name: &str) -> Result<ProjectivePoint, EngineError> {
    if x.len() != 32 {
        return Err(EngineError::malformed(format!("{name} must be 32 bytes, but got {}", x.len())));
    }
    let mut encoded = [0u8; 33];
    encoded[0] = COMPRESSED_EVEN;
    encoded[1..].copy_from_slice(x);
    point_from_bytes(&encoded, name)
}

fn non_identity(point: &ProjectivePoint, name: &str) -> Result<(), EngineError> {
    if *point == ProjectivePoint::IDENTITY {
        Err(EngineError::invalid(format!("{name} is the point at infinity")))
    } else {
        Ok(())
    }
}

pub fn compressed(point: &ProjectivePoint, name: &str) -> Result<Vec<u8>, EngineError> {
    non_identity(point, name)?;
    Ok(point.to_affine().to_encoded_point(true).as_bytes().to_vec())
}

pub fn uncompressed(point: &ProjectivePoint, name: &str) -> Result<Vec<u8>, EngineError> {
    non_identity(point, name)?;
    Ok(point.to_affine().to_encoded_point(false).as_bytes().to_vec())
}

pub fn has_odd_y(point: &ProjectivePoint) -> bool {
    bool::from(point.to_affine().y_is_odd())
}

pub fn x_coordinate(point: &ProjectivePoint) -> [u8; 32] {
    point.to_affine().x().into()
}
