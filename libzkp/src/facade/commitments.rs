use crate::encoding::{bytes_argument, expect_bool, expect_bytes, list_argument, unchecked_bytes_argument, value_argument};
use crate::engine::{Engine, Operation};
use crate::error::FacadeResult;
use crate::facade::{arguments, Secp256k1Zkp};
use crate::types::{Blind, Commitment, PublicKey, Value};

impl<E: Engine> Secp256k1Zkp<E> {
    pub async fn validate_commitment(&self, commitment: &Commitment) -> FacadeResult<bool> {
        let args = arguments([Ok(unchecked_bytes_argument(commitment))]);
        self.call(Operation::IsValidCommit, args, expect_bool).await
    }

    /// Commits to `value` under `blind`.
    pub async fn pedersen_commit(&self, blind: &Blind, value: Value) -> FacadeResult<Commitment> {
        let args = arguments([bytes_argument(blind), Ok(value_argument(value))]);
        self.call(Operation::PedersenCommit, args, expect_bytes).await
    }

    /// The homomorphic sum of `positive` minus the sum of `negative`.
    pub async fn pedersen_commit_sum(&self, positive: &[Commitment], negative: &[Commitment]) -> FacadeResult<Commitment> {
        let args = arguments([list_argument(positive), list_argument(negative)]);
        self.call(Operation::PedersenCommitSum, args, expect_bytes).await
    }

    pub async fn pedersen_commit_to_public_key(&self, commitment: &Commitment) -> FacadeResult<PublicKey> {
        let args = arguments([bytes_argument(commitment)]);
        self.call(Operation::PedersenCommitToPublicKey, args, expect_bytes).await
    }

    pub async fn public_key_to_pedersen_commit(&self, public_key: &PublicKey) -> FacadeResult<Commitment> {
        let args = arguments([bytes_argument(public_key)]);
        self.call(Operation::PublicKeyToPedersenCommit, args, expect_bytes).await
    }
}
