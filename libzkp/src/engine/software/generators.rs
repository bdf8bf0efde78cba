use crate::engine::software::curve::{lift_x, COMPRESSED_EVEN};
use crate::engine::EngineError;
use k256::{ProjectivePoint, PublicKey};
use log::*;
use sha2::{Digest, Sha256};

/// Bit width of every range proof.
pub const RANGE_BITS: usize = 64;

/// x coordinate of the secp256k1-zkp value generator `H`, a nothing-up-my-sleeve point with even y.
const VALUE_GENERATOR_X: &str = "50929b74c1a04954b78b4b6035e97a5e078a5a0f28ec96d547bfee9ace803ac0";

const DOMAIN: &[u8] = b"libzkp/generators";

/// The fixed generators shared by every call. Built once per engine and never mutated.
pub struct Generators {
    /// The secp256k1 base point. Blinding factors multiply this one.
    pub g: ProjectivePoint,
    /// The value generator.
    pub h: ProjectivePoint,
    /// The switch-commitment generator.
    pub j: ProjectivePoint,
    pub g_vec: Vec<ProjectivePoint>,
    pub h_vec: Vec<ProjectivePoint>,
}

impl Generators {
    pub fn new() -> Result<Self, EngineError> {
        let h_x = hex::decode(VALUE_GENERATOR_X).map_err(|e| EngineError::invalid(e.to_string()))?;
        let h = lift_x(&h_x, "value generator")?;
        let j = hash_to_point(b"J", 0);
        let g_vec = (0..RANGE_BITS as u32).map(|i| hash_to_point(b"G", i)).collect();
        let h_vec = (0..RANGE_BITS as u32).map(|i| hash_to_point(b"H", i)).collect();
        debug!("Derived {} pairs of range proof generators", RANGE_BITS);
        Ok(Generators { g: ProjectivePoint::GENERATOR, h, j, g_vec, h_vec })
    }
}

/// Try-and-increment: hash a candidate x coordinate until one lies on the curve.
fn hash_to_point(label: &[u8], index: u32) -> ProjectivePoint {
    let mut counter = 0u32;
    loop {
        let digest = Sha256::new()
            .chain_update(DOMAIN)
            .chain_update(label)
            .chain_update(index.to_be_bytes())
            .chain_update(counter.to_be_bytes())
            .finalize();
        let mut encoded = [0u8; 33];
        encoded[0] = COMPRESSED_EVEN;
        encoded[1..].copy_from_slice(&digest);
        if let Ok(key) = PublicKey::from_sec1_bytes(&encoded) {
            return key.to_projective();
        }
        counter = counter.wrapping_add(1);
    }
}
