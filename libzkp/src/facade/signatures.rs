use crate::encoding::{
    bytes_argument, expect_bool, expect_bytes, list_argument, optional_bytes_argument, unchecked_bytes_argument,
};
use crate::engine::{Argument, Engine, Operation, Response};
use crate::error::{BoundaryError, FacadeResult};
use crate::facade::{arguments, raw_bytes, Secp256k1Zkp};
use crate::types::{
    ByteRole, Message, MessageHash, PublicKey, SecretKey, Signature, SigningNonces, SINGLE_SIGNER_SIGNATURE_SIZE,
};

/// Decodes a signature that must be in its 64-byte compact form.
fn expect_compact_signature(operation: Operation, response: Response) -> Result<Signature, BoundaryError> {
    let signature: Signature = expect_bytes(operation, response)?;
    let actual = signature.as_bytes().len();
    if actual != SINGLE_SIGNER_SIGNATURE_SIZE {
        return Err(BoundaryError::InvalidLength {
            role: "compact signature",
            expected: SINGLE_SIGNER_SIGNATURE_SIZE.to_string(),
            actual,
        });
    }
    Ok(signature)
}

fn nonce_arguments(nonces: &SigningNonces) -> [Result<Argument, BoundaryError>; 3] {
    match nonces {
        SigningNonces::Generated => [Ok(Argument::Null), Ok(Argument::Null), Ok(Argument::Null)],
        SigningNonces::Supplied { secret_nonce, public_nonce, public_nonce_total } => {
            [bytes_argument(secret_nonce), bytes_argument(public_nonce), bytes_argument(public_nonce_total)]
        }
    }
}

impl<E: Engine> Secp256k1Zkp<E> {
    /// `Ok(true)` if `signature`, compact or DER-encoded, has a valid `r` and `s`.
    pub async fn validate_single_signer_signature(&self, signature: &Signature) -> FacadeResult<bool> {
        let args = arguments([Ok(unchecked_bytes_argument(signature))]);
        self.call(Operation::IsValidSingleSignerSignature, args, expect_bool).await
    }

    /// Signs `message` as-is.
    ///
    /// With [`SigningNonces::Generated`] the engine picks a fresh nonce and the result is a complete signature by
    /// `secret_key` alone (`public_key` is then its public key). With [`SigningNonces::Supplied`] the result is one
    /// signer's partial signature: `public_key` must be the sum of all signers' keys and `public_nonce_total` the sum
    /// of all signers' public nonces.
    pub async fn create_single_signer_signature(
        &self,
        message: &Message,
        secret_key: &SecretKey,
        nonces: &SigningNonces,
        public_key: &PublicKey,
    ) -> FacadeResult<Signature> {
        let [secret_nonce, public_nonce, public_nonce_total] = nonce_arguments(nonces);
        let args = arguments([
            bytes_argument(message),
            bytes_argument(secret_key),
            secret_nonce,
            bytes_argument(public_key),
            public_nonce,
            public_nonce_total,
        ]);
        self.call(Operation::CreateSingleSignerSignature, args, expect_compact_signature).await
    }

    /// Combines partial signatures that were all made against `public_nonce_total`.
    pub async fn add_single_signer_signatures(
        &self,
        signatures: &[Signature],
        public_nonce_total: &PublicKey,
    ) -> FacadeResult<Signature> {
        let args = arguments([list_argument(signatures), bytes_argument(public_nonce_total)]);
        self.call(Operation::AddSingleSignerSignatures, args, expect_compact_signature).await
    }

    /// Verifies a complete signature (`is_partial == false`) or one signer's share of it.
    ///
    /// For a share, `public_nonce` is that signer's public nonce and `public_key` its public key. For a complete
    /// signature `public_key` and `public_key_total` are both the combined key, and `public_nonce` may be omitted.
    /// `signature` may be compact or DER-encoded.
    pub async fn verify_single_signer_signature(
        &self,
        signature: &Signature,
        message: &Message,
        public_nonce: Option<&PublicKey>,
        public_key: &PublicKey,
        public_key_total: &PublicKey,
        is_partial: bool,
    ) -> FacadeResult<bool> {
        let args = arguments([
            bytes_argument(signature),
            bytes_argument(message),
            optional_bytes_argument(public_nonce),
            bytes_argument(public_key),
            bytes_argument(public_key_total),
            Ok(Argument::Bool(is_partial)),
        ]);
        self.call(Operation::VerifySingleSignerSignature, args, expect_bool).await
    }

    /// Parses the raw in-memory form of a signature into its compact form.
    pub async fn decode_single_signer_signature_from_data(&self, data: &[u8]) -> FacadeResult<Signature> {
        let args = arguments([raw_bytes(data)]);
        self.call(Operation::SingleSignerSignatureFromData, args, expect_compact_signature).await
    }

    /// DER to compact.
    pub async fn compact_single_signer_signature(&self, signature: &Signature) -> FacadeResult<Signature> {
        let args = arguments([bytes_argument(signature)]);
        self.call(Operation::CompactSingleSignerSignature, args, expect_compact_signature).await
    }

    /// Compact to DER.
    pub async fn uncompact_single_signer_signature(&self, signature: &Signature) -> FacadeResult<Signature> {
        let args = arguments([bytes_argument(signature)]);
        self.call(Operation::UncompactSingleSignerSignature, args, expect_bytes).await
    }

    /// A deterministic signature over a 32-byte hash. It does not take part in the nonce protocol above.
    pub async fn create_message_hash_signature(
        &self,
        message_hash: &MessageHash,
        secret_key: &SecretKey,
    ) -> FacadeResult<Signature> {
        let args = arguments([bytes_argument(message_hash), bytes_argument(secret_key)]);
        self.call(Operation::CreateMessageHashSignature, args, expect_bytes).await
    }

    pub async fn verify_message_hash_signature(
        &self,
        signature: &Signature,
        message_hash: &MessageHash,
        public_key: &PublicKey,
    ) -> FacadeResult<bool> {
        let args = arguments([bytes_argument(signature), bytes_argument(message_hash), bytes_argument(public_key)]);
        self.call(Operation::VerifyMessageHashSignature, args, expect_bool).await
    }
}
