use crate::encoding::{bytes_argument, expect_bool, expect_bytes, list_argument, unchecked_bytes_argument, value_argument};
use crate::engine::{Engine, Operation};
use crate::error::FacadeResult;
use crate::facade::{arguments, raw_bytes, Secp256k1Zkp};
use crate::types::{Blind, Nonce, PublicKey, SecretKey, Tweak, Value};

impl<E: Engine> Secp256k1Zkp<E> {
    /// `Ok(true)` if `secret_key` is a scalar in `[1, n)`. Wrong lengths answer `Ok(false)`.
    pub async fn validate_secret_key(&self, secret_key: &SecretKey) -> FacadeResult<bool> {
        let args = arguments([Ok(unchecked_bytes_argument(secret_key))]);
        self.call(Operation::IsValidSecretKey, args, expect_bool).await
    }

    /// `Ok(true)` if `public_key` decodes to a point on the curve.
    pub async fn validate_public_key(&self, public_key: &PublicKey) -> FacadeResult<bool> {
        let args = arguments([Ok(unchecked_bytes_argument(public_key))]);
        self.call(Operation::IsValidPublicKey, args, expect_bool).await
    }

    /// Switch blinding: a new blind derived from `blind` and the commitment to `value` under it.
    pub async fn derive_blind_switch(&self, blind: &Blind, value: Value) -> FacadeResult<Blind> {
        let args = arguments([bytes_argument(blind), Ok(value_argument(value))]);
        self.call(Operation::BlindSwitch, args, expect_bytes).await
    }

    /// Sum of `positive` minus sum of `negative`. Either list may be empty.
    pub async fn sum_blinds(&self, positive: &[Blind], negative: &[Blind]) -> FacadeResult<Blind> {
        let args = arguments([list_argument(positive), list_argument(negative)]);
        self.call(Operation::BlindSum, args, expect_bytes).await
    }

    pub async fn derive_public_key_from_secret_key(&self, secret_key: &SecretKey) -> FacadeResult<PublicKey> {
        let args = arguments([bytes_argument(secret_key)]);
        self.call(Operation::PublicKeyFromSecretKey, args, expect_bytes).await
    }

    /// Hashes arbitrary `data` to a scalar and returns its public key. `data` need not be a valid secret key.
    pub async fn derive_public_key_from_data(&self, data: &[u8]) -> FacadeResult<PublicKey> {
        let args = arguments([raw_bytes(data)]);
        self.call(Operation::PublicKeyFromData, args, expect_bytes).await
    }

    pub async fn uncompress_public_key(&self, public_key: &PublicKey) -> FacadeResult<PublicKey> {
        let args = arguments([bytes_argument(public_key)]);
        self.call(Operation::UncompressPublicKey, args, expect_bytes).await
    }

    pub async fn tweak_secret_key_add(&self, secret_key: &SecretKey, tweak: &Tweak) -> FacadeResult<SecretKey> {
        let args = arguments([bytes_argument(secret_key), bytes_argument(tweak)]);
        self.call(Operation::SecretKeyTweakAdd, args, expect_bytes).await
    }

    pub async fn tweak_public_key_add(&self, public_key: &PublicKey, tweak: &Tweak) -> FacadeResult<PublicKey> {
        let args = arguments([bytes_argument(public_key), bytes_argument(tweak)]);
        self.call(Operation::PublicKeyTweakAdd, args, expect_bytes).await
    }

    pub async fn tweak_secret_key_multiply(&self, secret_key: &SecretKey, tweak: &Tweak) -> FacadeResult<SecretKey> {
        let args = arguments([bytes_argument(secret_key), bytes_argument(tweak)]);
        self.call(Operation::SecretKeyTweakMultiply, args, expect_bytes).await
    }

    pub async fn tweak_public_key_multiply(&self, public_key: &PublicKey, tweak: &Tweak) -> FacadeResult<PublicKey> {
        let args = arguments([bytes_argument(public_key), bytes_argument(tweak)]);
        self.call(Operation::PublicKeyTweakMultiply, args, expect_bytes).await
    }

    /// ECDH. Both sides of an exchange arrive at the same key-shaped secret.
    pub async fn derive_shared_secret(&self, secret_key: &SecretKey, public_key: &PublicKey) -> FacadeResult<SecretKey> {
        let args = arguments([bytes_argument(secret_key), bytes_argument(public_key)]);
        self.call(Operation::SharedSecretKeyFromSecretKeyAndPublicKey, args, expect_bytes).await
    }

    pub async fn combine_public_keys(&self, public_keys: &[PublicKey]) -> FacadeResult<PublicKey> {
        let args = arguments([list_argument(public_keys)]);
        self.call(Operation::CombinePublicKeys, args, expect_bytes).await
    }

    /// A fresh secret nonce from the engine's randomness source. Use it for one signature only.
    pub async fn create_secret_nonce(&self) -> FacadeResult<Nonce> {
        self.call(Operation::CreateSecretNonce, Ok(vec![]), expect_bytes).await
    }
}
