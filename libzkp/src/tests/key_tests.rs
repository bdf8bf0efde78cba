use crate::error::OperationFailed;
use crate::tests::{blind, facade, order_minus, scalar_bytes, secret_key, CURVE_ORDER, GENERATOR_COMPRESSED};
use crate::types::*;

const GENERATOR_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                                      483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

fn tweak(n: u64) -> Tweak {
    Tweak::from_bytes(scalar_bytes(n))
}

#[tokio::test]
async fn secret_key_validity() {
    let zkp = facade();
    assert_eq!(zkp.validate_secret_key(&secret_key(1)).await, Ok(true));
    assert_eq!(zkp.validate_secret_key(&SecretKey::from_bytes(order_minus(1))).await, Ok(true));
    assert_eq!(zkp.validate_secret_key(&secret_key(0)).await, Ok(false));
    let order = SecretKey::from_hex(CURVE_ORDER).unwrap();
    assert_eq!(zkp.validate_secret_key(&order).await, Ok(false));
    assert_eq!(zkp.validate_secret_key(&SecretKey::from_bytes(vec![0xff; 32])).await, Ok(false));
    assert_eq!(zkp.validate_secret_key(&SecretKey::from_bytes(vec![1; 31])).await, Ok(false));
    assert_eq!(zkp.validate_secret_key(&SecretKey::from_bytes(vec![1; 33])).await, Ok(false));
    assert_eq!(zkp.validate_secret_key(&SecretKey::from_bytes(vec![])).await, Ok(false));
}

#[tokio::test]
async fn public_key_validity() {
    let zkp = facade();
    let generator = PublicKey::from_hex(GENERATOR_COMPRESSED).unwrap();
    assert_eq!(zkp.validate_public_key(&generator).await, Ok(true));
    assert_eq!(zkp.validate_public_key(&PublicKey::from_hex(GENERATOR_UNCOMPRESSED).unwrap()).await, Ok(true));
    let mut off_curve = vec![0x02];
    off_curve.extend_from_slice(&[0xff; 32]);
    assert_eq!(zkp.validate_public_key(&PublicKey::from_bytes(off_curve)).await, Ok(false));
    assert_eq!(zkp.validate_public_key(&PublicKey::from_bytes(vec![0x02; 10])).await, Ok(false));
}

#[tokio::test]
async fn derives_known_public_keys() {
    let zkp = facade();
    let public = zkp.derive_public_key_from_secret_key(&secret_key(1)).await.unwrap();
    assert_eq!(public.to_hex(), GENERATOR_COMPRESSED);
    let uncompressed = zkp.uncompress_public_key(&public).await.unwrap();
    assert_eq!(uncompressed.to_hex(), GENERATOR_UNCOMPRESSED);
    assert_eq!(zkp.derive_public_key_from_secret_key(&secret_key(0)).await, Err(OperationFailed));
    let short = SecretKey::from_bytes(vec![1; 16]);
    assert_eq!(zkp.derive_public_key_from_secret_key(&short).await, Err(OperationFailed));
}

#[tokio::test]
async fn public_key_from_data_is_deterministic() {
    let zkp = facade();
    let a = zkp.derive_public_key_from_data(b"seed one").await.unwrap();
    let b = zkp.derive_public_key_from_data(b"seed one").await.unwrap();
    let c = zkp.derive_public_key_from_data(b"seed two").await.unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(zkp.validate_public_key(&a).await, Ok(true));
    assert!(zkp.derive_public_key_from_data(&[]).await.is_ok());
}

#[tokio::test]
async fn additive_tweaks_agree() {
    let zkp = facade();
    let secret = zkp.tweak_secret_key_add(&secret_key(5), &tweak(7)).await.unwrap();
    assert_eq!(secret, secret_key(12));
    let public = zkp.derive_public_key_from_secret_key(&secret_key(5)).await.unwrap();
    let tweaked = zkp.tweak_public_key_add(&public, &tweak(7)).await.unwrap();
    assert_eq!(tweaked, zkp.derive_public_key_from_secret_key(&secret).await.unwrap());
    let unchanged = zkp.tweak_secret_key_add(&secret_key(5), &tweak(0)).await.unwrap();
    assert_eq!(unchanged, secret_key(5));
}

#[tokio::test]
async fn additive_tweak_to_zero_fails() {
    let zkp = facade();
    let minus_one = Tweak::from_bytes(order_minus(1));
    assert_eq!(zkp.tweak_secret_key_add(&secret_key(1), &minus_one).await, Err(OperationFailed));
    let generator = PublicKey::from_hex(GENERATOR_COMPRESSED).unwrap();
    assert_eq!(zkp.tweak_public_key_add(&generator, &minus_one).await, Err(OperationFailed));
    let overflowing = Tweak::from_hex(CURVE_ORDER).unwrap();
    assert_eq!(zkp.tweak_secret_key_add(&secret_key(1), &overflowing).await, Err(OperationFailed));
}

#[tokio::test]
async fn multiplicative_tweaks_agree() {
    let zkp = facade();
    let secret = zkp.tweak_secret_key_multiply(&secret_key(6), &tweak(7)).await.unwrap();
    assert_eq!(secret, secret_key(42));
    let public = zkp.derive_public_key_from_secret_key(&secret_key(6)).await.unwrap();
    let tweaked = zkp.tweak_public_key_multiply(&public, &tweak(7)).await.unwrap();
    assert_eq!(tweaked, zkp.derive_public_key_from_secret_key(&secret_key(42)).await.unwrap());
    assert_eq!(zkp.tweak_secret_key_multiply(&secret_key(6), &tweak(0)).await, Err(OperationFailed));
    assert_eq!(zkp.tweak_public_key_multiply(&public, &tweak(0)).await, Err(OperationFailed));
}

#[tokio::test]
async fn shared_secrets_match() {
    let zkp = facade();
    let alice = secret_key(0xa11ce);
    let bob = secret_key(0xb0b);
    let alice_public = zkp.derive_public_key_from_secret_key(&alice).await.unwrap();
    let bob_public = zkp.derive_public_key_from_secret_key(&bob).await.unwrap();
    let one = zkp.derive_shared_secret(&alice, &bob_public).await.unwrap();
    let other = zkp.derive_shared_secret(&bob, &alice_public).await.unwrap();
    assert_eq!(one, other);
    assert_eq!(zkp.validate_secret_key(&one).await, Ok(true));
    let uncompressed = zkp.uncompress_public_key(&bob_public).await.unwrap();
    assert_eq!(zkp.derive_shared_secret(&alice, &uncompressed).await.unwrap(), one);
}

#[tokio::test]
async fn combining_public_keys() {
    let zkp = facade();
    let one = zkp.derive_public_key_from_secret_key(&secret_key(1)).await.unwrap();
    let two = zkp.derive_public_key_from_secret_key(&secret_key(2)).await.unwrap();
    let three = zkp.derive_public_key_from_secret_key(&secret_key(3)).await.unwrap();
    assert_eq!(zkp.combine_public_keys(&[one.clone(), two]).await.unwrap(), three);
    assert_eq!(zkp.combine_public_keys(&[one.clone()]).await.unwrap(), one);
    assert_eq!(zkp.combine_public_keys(&[]).await, Err(OperationFailed));
    let minus_one = zkp.derive_public_key_from_secret_key(&SecretKey::from_bytes(order_minus(1))).await.unwrap();
    assert_eq!(zkp.combine_public_keys(&[one, minus_one]).await, Err(OperationFailed));
}

#[tokio::test]
async fn secret_nonces_are_fresh_and_valid() {
    let zkp = facade();
    let a = zkp.create_secret_nonce().await.unwrap();
    let b = zkp.create_secret_nonce().await.unwrap();
    assert_ne!(a, b);
    assert_eq!(zkp.validate_secret_key(&SecretKey::from_nonce(&a)).await, Ok(true));
}

#[tokio::test]
async fn blind_sums() {
    let zkp = facade();
    let (a, b) = (blind(0x11), blind(0x22));
    let ab = zkp.sum_blinds(&[a.clone(), b.clone()], &[]).await.unwrap();
    let ba = zkp.sum_blinds(&[b.clone(), a.clone()], &[]).await.unwrap();
    assert_eq!(ab, ba);
    assert_eq!(ab, blind(0x33));
    assert_eq!(zkp.sum_blinds(&[a.clone()], &[a.clone()]).await.unwrap(), blind(0));
    assert_eq!(zkp.sum_blinds(&[], &[]).await.unwrap(), blind(0));
    assert_eq!(zkp.sum_blinds(&[ab], &[b]).await.unwrap(), a);
    let too_large = Blind::from_hex(CURVE_ORDER).unwrap();
    assert_eq!(zkp.sum_blinds(&[too_large], &[]).await, Err(OperationFailed));
}

#[tokio::test]
async fn blind_switch_is_deterministic() {
    let zkp = facade();
    let switched = zkp.derive_blind_switch(&blind(0x42), Value::new(1000)).await.unwrap();
    assert_eq!(switched, zkp.derive_blind_switch(&blind(0x42), Value::new(1000)).await.unwrap());
    assert_ne!(switched, blind(0x42));
    assert_ne!(switched, zkp.derive_blind_switch(&blind(0x42), Value::new(1001)).await.unwrap());
    assert_eq!(zkp.validate_secret_key(&SecretKey::from_bytes(switched.as_bytes().to_vec())).await, Ok(true));
    assert_eq!(zkp.derive_blind_switch(&blind(0), Value::new(1)).await, Err(OperationFailed));
}
