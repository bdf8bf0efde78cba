use crate::encoding::{bytes_argument, expect_bool, expect_bytes, expect_rewound, value_argument};
use crate::engine::{Engine, Operation};
use crate::error::FacadeResult;
use crate::facade::{arguments, Secp256k1Zkp};
use crate::types::{Blind, Commitment, ExtraCommit, Nonce, Proof, ProofMessage, PublicKey, RewoundBulletproof, TauX, Value};

impl<E: Engine> Secp256k1Zkp<E> {
    /// Proves that the commitment to `value` under `blind` holds a 64-bit value.
    ///
    /// `nonce` is the rewind nonce: whoever holds it can later recover `value`, `blind` and `message` from the proof.
    /// `private_nonce` blinds the proof itself and should not be shared. `extra_commit` is bound into the proof and must
    /// be supplied again to verify it.
    pub async fn create_bulletproof(
        &self,
        blind: &Blind,
        value: Value,
        nonce: &Nonce,
        private_nonce: &Nonce,
        extra_commit: &ExtraCommit,
        message: &ProofMessage,
    ) -> FacadeResult<Proof> {
        let args = arguments([
            bytes_argument(blind),
            Ok(value_argument(value)),
            bytes_argument(nonce),
            bytes_argument(private_nonce),
            bytes_argument(extra_commit),
            bytes_argument(message),
        ]);
        self.call(Operation::CreateBulletproof, args, expect_bytes).await
    }

    /// Assembles a multi-party proof from the summed `tau_x` and the summed `T1`/`T2` shares of every party.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_bulletproof_blindless(
        &self,
        tau_x: &TauX,
        t_one: &PublicKey,
        t_two: &PublicKey,
        commitment: &Commitment,
        value: Value,
        nonce: &Nonce,
        extra_commit: &ExtraCommit,
        message: &ProofMessage,
    ) -> FacadeResult<Proof> {
        let args = arguments([
            bytes_argument(tau_x),
            bytes_argument(t_one),
            bytes_argument(t_two),
            bytes_argument(commitment),
            Ok(value_argument(value)),
            bytes_argument(nonce),
            bytes_argument(extra_commit),
            bytes_argument(message),
        ]);
        self.call(Operation::CreateBulletproofBlindless, args, expect_bytes).await
    }

    /// Recovers the value, blind and message of a proof made with an empty extra commitment. A nonce other than the
    /// one the proof was made with fails; it never yields a wrong value.
    pub async fn rewind_bulletproof(
        &self,
        proof: &Proof,
        commitment: &Commitment,
        nonce: &Nonce,
    ) -> FacadeResult<RewoundBulletproof> {
        let args = arguments([bytes_argument(proof), bytes_argument(commitment), bytes_argument(nonce)]);
        self.call(Operation::RewindBulletproof, args, expect_rewound).await
    }

    /// As [`Self::rewind_bulletproof`], for a proof made with a non-empty extra commitment.
    pub async fn rewind_bulletproof_with_extra_commit(
        &self,
        proof: &Proof,
        commitment: &Commitment,
        nonce: &Nonce,
        extra_commit: &ExtraCommit,
    ) -> FacadeResult<RewoundBulletproof> {
        let args = arguments([
            bytes_argument(proof),
            bytes_argument(commitment),
            bytes_argument(nonce),
            bytes_argument(extra_commit),
        ]);
        self.call(Operation::RewindBulletproof, args, expect_rewound).await
    }

    /// `Ok(false)` when the proof does not verify. Fails only when the proof or commitment cannot be parsed.
    pub async fn verify_bulletproof(
        &self,
        proof: &Proof,
        commitment: &Commitment,
        extra_commit: &ExtraCommit,
    ) -> FacadeResult<bool> {
        let args = arguments([bytes_argument(proof), bytes_argument(commitment), bytes_argument(extra_commit)]);
        self.call(Operation::VerifyBulletproof, args, expect_bool).await
    }
}
