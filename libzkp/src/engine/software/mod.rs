//! A pure-Rust engine over secp256k1.
//!
//! Arithmetic comes from `k256`; range proof transcripts from `merlin`. The engine keeps no state beyond its
//! configuration and the precomputed [`Generators`], which every call shares read-only.

mod args;
mod bulletproof;
mod curve;
mod ecdsa;
mod generators;
mod keys;
mod pedersen;
mod schnorr;

use crate::engine::software::args::Arguments;
use crate::engine::software::curve::{scalar_from_bytes, scalar_to_bytes};
use crate::engine::{Argument, Engine, EngineConfig, EngineError, Operation, Response};
use crate::types::{Blind, ByteRole, Commitment, ExtraCommit, Nonce, ProofMessage, PublicKey, TauX, Value};
use generators::Generators;
use k256::Scalar;
use log::*;
use std::future::Future;
use std::sync::Arc;

pub use bulletproof::PROOF_SIZE;

/// An unaudited reference engine. Suitable for tests and tooling, not for protecting real funds.
#[derive(Clone)]
pub struct SoftwareEngine {
    config: EngineConfig,
    generators: Arc<Generators>,
}

impl SoftwareEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let generators = Arc::new(Generators::new()?);
        info!("Software engine ready (blocking pool: {})", config.use_blocking_pool);
        Ok(SoftwareEngine { config, generators })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one call on the current thread.
    pub fn execute(&self, operation: Operation, arguments: Vec<Argument>) -> Result<Response, EngineError> {
        dispatch(&self.config, &self.generators, operation, arguments)
    }

    /// Round one of a multi-party range proof: this party's `T1` and `T2` shares.
    pub fn bulletproof_round_one(&self, party_nonce: &Nonce) -> Result<(PublicKey, PublicKey), EngineError> {
        let seed = secret_seed(party_nonce)?;
        let (t_one, t_two) = bulletproof::round_one(&seed)?;
        Ok((PublicKey::from_bytes(t_one), PublicKey::from_bytes(t_two)))
    }

    /// Round two of a multi-party range proof: this party's `tau_x` share, given the summed round-one shares.
    pub fn bulletproof_round_two(
        &self,
        party_nonce: &Nonce,
        party_blind: &Blind,
        statement: &MultiPartyStatement,
    ) -> Result<TauX, EngineError> {
        let seed = secret_seed(party_nonce)?;
        let message: [u8; 20] = statement
            .message
            .as_bytes()
            .try_into()
            .map_err(|_| EngineError::malformed("proof message must be 20 bytes"))?;
        let shared = bulletproof::SharedProofInputs {
            commitment: statement.commitment.as_bytes().to_vec(),
            value: statement.value.as_u64(),
            nonce: secret_seed(&statement.nonce)?,
            extra: statement.extra.as_bytes().to_vec(),
            message,
            t_one_total: statement.t_one_total.as_bytes().to_vec(),
            t_two_total: statement.t_two_total.as_bytes().to_vec(),
        };
        let share = bulletproof::round_two(&self.generators, &seed, party_blind.as_bytes(), &shared)?;
        Ok(TauX::from_bytes(share))
    }

    /// Adds `tau_x` shares.
    pub fn sum_tau_x_shares(&self, shares: &[TauX]) -> Result<TauX, EngineError> {
        let mut sum = Scalar::ZERO;
        for share in shares {
            sum += scalar_from_bytes(share.as_bytes(), "tau_x share")?;
        }
        Ok(TauX::from_bytes(scalar_to_bytes(&sum)))
    }
}

/// The statement every party to a multi-party range proof agrees on before round two.
#[derive(Debug, Clone)]
pub struct MultiPartyStatement {
    pub commitment: Commitment,
    pub value: Value,
    pub nonce: Nonce,
    pub extra: ExtraCommit,
    pub message: ProofMessage,
    pub t_one_total: PublicKey,
    pub t_two_total: PublicKey,
}

fn secret_seed(nonce: &Nonce) -> Result<[u8; 32], EngineError> {
    nonce.as_bytes().try_into().map_err(|_| EngineError::malformed("nonce must be 32 bytes"))
}

impl Engine for SoftwareEngine {
    fn invoke(
        &self,
        operation: Operation,
        arguments: Vec<Argument>,
    ) -> impl Future<Output = Result<Response, EngineError>> + Send {
        let config = self.config.clone();
        let generators = Arc::clone(&self.generators);
        async move {
            // Without a tokio runtime there is no blocking pool, so the call runs on the polling thread.
            let on_tokio = tokio::runtime::Handle::try_current().is_ok();
            if config.use_blocking_pool && on_tokio {
                tokio::task::spawn_blocking(move || dispatch(&config, &generators, operation, arguments))
                    .await
                    .map_err(|e| EngineError::Transport(format!("{operation} did not complete: {e}")))?
            } else {
                dispatch(&config, &generators, operation, arguments)
            }
        }
    }
}

fn dispatch(
    config: &EngineConfig,
    generators: &Generators,
    operation: Operation,
    arguments: Vec<Argument>,
) -> Result<Response, EngineError> {
    trace!("Executing {operation} with {} arguments", arguments.len());
    let mut args = Arguments::new(operation, arguments, config.max_list_length);
    let a = &mut args;
    let response = match operation {
        Operation::BlindSwitch => keys::blind_switch(generators, a),
        Operation::BlindSum => keys::blind_sum(a),
        Operation::IsValidSecretKey => keys::is_valid_secret_key(a),
        Operation::IsValidPublicKey => keys::is_valid_public_key(a),
        Operation::IsValidCommit => pedersen::is_valid_commit(a),
        Operation::IsValidSingleSignerSignature => schnorr::is_valid(a),
        Operation::CreateBulletproof => bulletproof::create(generators, a),
        Operation::CreateBulletproofBlindless => bulletproof::create_blindless(generators, a),
        Operation::RewindBulletproof => bulletproof::rewind(generators, a),
        Operation::VerifyBulletproof => bulletproof::verify(generators, a),
        Operation::PublicKeyFromSecretKey => keys::public_key_from_secret_key(a),
        Operation::PublicKeyFromData => keys::public_key_from_data(a),
        Operation::UncompressPublicKey => keys::uncompress_public_key(a),
        Operation::SecretKeyTweakAdd => keys::secret_key_tweak_add(a),
        Operation::PublicKeyTweakAdd => keys::public_key_tweak_add(a),
        Operation::SecretKeyTweakMultiply => keys::secret_key_tweak_multiply(a),
        Operation::PublicKeyTweakMultiply => keys::public_key_tweak_multiply(a),
        Operation::SharedSecretKeyFromSecretKeyAndPublicKey => keys::shared_secret(a),
        Operation::PedersenCommit => pedersen::pedersen_commit(generators, a),
        Operation::PedersenCommitSum => pedersen::pedersen_commit_sum(a),
        Operation::PedersenCommitToPublicKey => pedersen::commitment_to_public_key(a),
        Operation::PublicKeyToPedersenCommit => pedersen::public_key_to_commitment(a),
        Operation::CreateSingleSignerSignature => schnorr::create(a),
        Operation::AddSingleSignerSignatures => schnorr::add(a),
        Operation::VerifySingleSignerSignature => schnorr::verify(a),
        Operation::SingleSignerSignatureFromData => schnorr::from_data(a),
        Operation::CompactSingleSignerSignature => schnorr::compact(a),
        Operation::UncompactSingleSignerSignature => schnorr::uncompact(a),
        Operation::CombinePublicKeys => keys::combine_public_keys(a),
        Operation::CreateSecretNonce => keys::create_secret_nonce(a),
        Operation::CreateMessageHashSignature => ecdsa::sign(a),
        Operation::VerifyMessageHashSignature => ecdsa::verify(a),
    }?;
    args.finish()?;
    Ok(response)
}
