//! Facade tests. The contract tests script the engine; the rest run the facade over the software engine.

#[cfg(feature = "software_engine")]
mod bulletproof_tests;
#[cfg(feature = "software_engine")]
mod key_tests;

use crate::types::{Blind, ByteRole, Nonce, SecretKey};
#[cfg(feature = "software_engine")]
use crate::{engine::EngineConfig, Secp256k1Zkp, SoftwareEngine};

pub const CURVE_ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
pub const GENERATOR_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

#[cfg(feature = "software_engine")]
pub fn facade() -> Secp256k1Zkp<SoftwareEngine> {
    env_logger::try_init().ok();
    let engine = SoftwareEngine::new(EngineConfig::default()).expect("software engine to initialise");
    Secp256k1Zkp::new(engine)
}

/// The 32-byte big-endian encoding of a small scalar.
pub fn scalar_bytes(n: u64) -> Vec<u8> {
    let mut bytes = vec![0u8; 32];
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    bytes
}

pub fn secret_key(n: u64) -> SecretKey {
    SecretKey::from_bytes(scalar_bytes(n))
}

pub fn blind(fill: u8) -> Blind {
    Blind::from_bytes(vec![fill; 32])
}

pub fn nonce(fill: u8) -> Nonce {
    Nonce::from_bytes(vec![fill; 32])
}

/// `n - k` for small `k`.
pub fn order_minus(k: u8) -> Vec<u8> {
    let mut bytes = hex::decode(CURVE_ORDER).expect("valid hex");
    bytes[31] -= k;
    bytes
}
