//! A typed async facade over secp256k1 Pedersen commitments, bulletproof range proofs, single-signer signatures,
//! key tweaks, ECDH and message-hash signatures.
//!
//! [`Secp256k1Zkp`] drives any [`Engine`]. Every operation returns either its result or [`OperationFailed`].
//!
//! The `software_engine` feature (on by default) provides [`SoftwareEngine`], a pure-Rust engine built on `k256`. It
//! is an unaudited reference implementation for tests and tooling. Its range proofs and aggregatable signatures have
//! not been reviewed for soundness or side channels. Production deployments should bind an audited secp256k1-zkp engine
//! behind the [`Engine`] trait instead.

pub mod encoding;
pub mod engine;
pub mod error;
pub mod facade;
pub mod types;

#[cfg(test)]
mod tests;

#[cfg(feature = "software_engine")]
pub use engine::software::SoftwareEngine;
pub use engine::{Engine, EngineConfig};
pub use error::{FacadeResult, OperationFailed};
pub use facade::Secp256k1Zkp;
