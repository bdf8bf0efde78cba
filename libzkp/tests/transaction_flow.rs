//! A confidential transfer built from the public API alone: commitments that balance, range proofs on every output
//! and a kernel signature over the excess.
#![cfg(feature = "software_engine")]

use libzkp::types::*;
use libzkp::{EngineConfig, OperationFailed, Secp256k1Zkp, SoftwareEngine};
use std::sync::Arc;

fn new_facade() -> Secp256k1Zkp<Arc<SoftwareEngine>> {
    env_logger::try_init().ok();
    let engine = SoftwareEngine::new(EngineConfig::default()).expect("engine to start");
    Secp256k1Zkp::new(Arc::new(engine))
}

async fn fresh_blind(zkp: &Secp256k1Zkp<Arc<SoftwareEngine>>) -> Blind {
    let nonce = zkp.create_secret_nonce().await.unwrap();
    Blind::from_bytes(nonce.as_bytes().to_vec())
}

#[tokio::test]
async fn balanced_transfer() {
    let zkp = new_facade();
    let input_blind = fresh_blind(&zkp).await;
    let (change_blind, payment_blind) = (fresh_blind(&zkp).await, fresh_blind(&zkp).await);
    let input = zkp.pedersen_commit(&input_blind, Value::new(1_000)).await.unwrap();
    let change = zkp.pedersen_commit(&change_blind, Value::new(700)).await.unwrap();
    let payment = zkp.pedersen_commit(&payment_blind, Value::new(300)).await.unwrap();

    // Outputs minus inputs commit to zero value, so the excess is a public key for the blind difference.
    let excess_blind = zkp.sum_blinds(&[change_blind.clone(), payment_blind.clone()], &[input_blind]).await.unwrap();
    let excess = zkp.pedersen_commit_sum(&[change.clone(), payment.clone()], &[input]).await.unwrap();
    let excess_key = zkp.pedersen_commit_to_public_key(&excess).await.unwrap();
    let excess_secret = SecretKey::from_bytes(excess_blind.as_bytes().to_vec());
    assert_eq!(zkp.derive_public_key_from_secret_key(&excess_secret).await.unwrap(), excess_key);

    let kernel = Message::from_bytes(b"fee=0;lock_height=0".to_vec());
    let signature = zkp
        .create_single_signer_signature(&kernel, &excess_secret, &SigningNonces::Generated, &excess_key)
        .await
        .unwrap();
    let verified = zkp.verify_single_signer_signature(&signature, &kernel, None, &excess_key, &excess_key, false).await;
    assert_eq!(verified, Ok(true));

    let extra = ExtraCommit::empty();
    let message = ProofMessage::from_bytes(vec![0; PROOF_MESSAGE_SIZE]);
    for (blind, value, commitment) in [(&change_blind, 700, &change), (&payment_blind, 300, &payment)] {
        let rewind_nonce = zkp.create_secret_nonce().await.unwrap();
        let private_nonce = zkp.create_secret_nonce().await.unwrap();
        let proof = zkp
            .create_bulletproof(blind, Value::new(value), &rewind_nonce, &private_nonce, &extra, &message)
            .await
            .unwrap();
        assert_eq!(zkp.verify_bulletproof(&proof, commitment, &extra).await, Ok(true));
        let rewound = zkp.rewind_bulletproof(&proof, commitment, &rewind_nonce).await.unwrap();
        assert_eq!(rewound.value, Value::new(value));
        assert_eq!(&rewound.blind, blind);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_one_engine() {
    let zkp = Arc::new(new_facade());
    let mut tasks = Vec::new();
    for i in 1..=8u8 {
        let zkp = Arc::clone(&zkp);
        tasks.push(tokio::spawn(async move {
            let blind = Blind::from_bytes(vec![i; 32]);
            let value = Value::new(u64::from(i) * 1_000);
            let nonce = Nonce::from_bytes(vec![i; 32]);
            let private_nonce = Nonce::from_bytes(vec![i + 100; 32]);
            let message = ProofMessage::from_bytes(vec![i; PROOF_MESSAGE_SIZE]);
            let proof = zkp
                .create_bulletproof(&blind, value, &nonce, &private_nonce, &ExtraCommit::empty(), &message)
                .await?;
            let commitment = zkp.pedersen_commit(&blind, value).await?;
            let rewound = zkp.rewind_bulletproof(&proof, &commitment, &nonce).await?;
            Ok::<_, OperationFailed>((value, rewound))
        }));
    }
    for task in tasks {
        let (value, rewound) = task.await.unwrap().unwrap();
        assert_eq!(rewound.value, value);
    }
}

#[tokio::test]
async fn failures_are_indistinguishable() {
    let zkp = new_facade();
    let short_key = SecretKey::from_bytes(vec![1; 31]);
    let zero_key = SecretKey::from_bytes(vec![0; 32]);
    let short = zkp.derive_public_key_from_secret_key(&short_key).await;
    let zero = zkp.derive_public_key_from_secret_key(&zero_key).await;
    assert_eq!(short, Err(OperationFailed));
    assert_eq!(short, zero);
}
