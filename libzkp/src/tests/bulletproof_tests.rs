use crate::engine::software::MultiPartyStatement;
use crate::engine::software::PROOF_SIZE;
use crate::error::OperationFailed;
use crate::tests::{blind, facade, nonce};
use crate::types::*;

fn message(fill: u8) -> ProofMessage {
    ProofMessage::from_bytes(vec![fill; PROOF_MESSAGE_SIZE])
}

#[tokio::test]
async fn proofs_verify_against_their_commitment() {
    let zkp = facade();
    let b = blind(0x19);
    let value = Value::new(100);
    let extra = ExtraCommit::empty();
    let proof = zkp.create_bulletproof(&b, value, &nonce(0x01), &nonce(0x02), &extra, &message(0)).await.unwrap();
    assert_eq!(proof.as_bytes().len(), PROOF_SIZE);
    let commitment = zkp.pedersen_commit(&b, value).await.unwrap();
    assert_eq!(zkp.verify_bulletproof(&proof, &commitment, &extra).await, Ok(true));
    let other = zkp.pedersen_commit(&b, Value::new(101)).await.unwrap();
    assert_eq!(zkp.verify_bulletproof(&proof, &other, &extra).await, Ok(false));
}

#[tokio::test]
async fn rewinding_recovers_value_blind_and_message() {
    let zkp = facade();
    let b = blind(0x2a);
    let value = Value::new(250);
    let rewind_nonce = nonce(0x61);
    let msg = message(0x7e);
    let proof =
        zkp.create_bulletproof(&b, value, &rewind_nonce, &nonce(0x62), &ExtraCommit::empty(), &msg).await.unwrap();
    let commitment = zkp.pedersen_commit(&b, value).await.unwrap();
    let rewound = zkp.rewind_bulletproof(&proof, &commitment, &rewind_nonce).await.unwrap();
    assert_eq!(rewound, RewoundBulletproof { value, blind: b, message: msg });
    assert_eq!(zkp.rewind_bulletproof(&proof, &commitment, &nonce(0x63)).await, Err(OperationFailed));
}

#[tokio::test]
async fn extra_commitments_bind_the_proof() {
    let zkp = facade();
    let b = blind(0x4c);
    let value = Value::new(31337);
    let extra = ExtraCommit::from_bytes(b"kernel features".to_vec());
    let rewind_nonce = nonce(0x0f);
    let proof = zkp.create_bulletproof(&b, value, &rewind_nonce, &nonce(0x10), &extra, &message(1)).await.unwrap();
    let commitment = zkp.pedersen_commit(&b, value).await.unwrap();
    assert_eq!(zkp.verify_bulletproof(&proof, &commitment, &extra).await, Ok(true));
    assert_eq!(zkp.verify_bulletproof(&proof, &commitment, &ExtraCommit::empty()).await, Ok(false));

    assert_eq!(zkp.rewind_bulletproof(&proof, &commitment, &rewind_nonce).await, Err(OperationFailed));
    let rewound = zkp.rewind_bulletproof_with_extra_commit(&proof, &commitment, &rewind_nonce, &extra).await.unwrap();
    assert_eq!(rewound.value, value);
    assert_eq!(rewound.blind, b);
}

#[tokio::test]
async fn unparseable_proofs_fail() {
    let zkp = facade();
    let commitment = zkp.pedersen_commit(&blind(0x01), Value::new(1)).await.unwrap();
    let garbage = Proof::from_bytes(vec![0xab; PROOF_SIZE]);
    assert_eq!(zkp.verify_bulletproof(&garbage, &commitment, &ExtraCommit::empty()).await, Err(OperationFailed));
    let short = Proof::from_bytes(vec![0x02; 100]);
    assert_eq!(zkp.verify_bulletproof(&short, &commitment, &ExtraCommit::empty()).await, Err(OperationFailed));
    assert_eq!(zkp.rewind_bulletproof(&short, &commitment, &nonce(1)).await, Err(OperationFailed));
}

#[tokio::test]
async fn range_boundaries() {
    let zkp = facade();
    let extra = ExtraCommit::empty();
    for value in [Value::new(0), Value::new(u64::MAX)] {
        let b = blind(0x5a);
        let proof = zkp.create_bulletproof(&b, value, &nonce(3), &nonce(4), &extra, &message(9)).await.unwrap();
        let commitment = zkp.pedersen_commit(&b, value).await.unwrap();
        assert_eq!(zkp.verify_bulletproof(&proof, &commitment, &extra).await, Ok(true));
        let rewound = zkp.rewind_bulletproof(&proof, &commitment, &nonce(3)).await.unwrap();
        assert_eq!(rewound.value, value);
    }
}

#[tokio::test]
async fn bad_creation_inputs_fail() {
    let zkp = facade();
    let extra = ExtraCommit::empty();
    let zero_nonce = nonce(0);
    let made = zkp.create_bulletproof(&blind(1), Value::new(5), &zero_nonce, &nonce(2), &extra, &message(0)).await;
    assert_eq!(made, Err(OperationFailed));
    let made = zkp.create_bulletproof(&blind(0xff), Value::new(5), &nonce(1), &nonce(2), &extra, &message(0)).await;
    assert_eq!(made, Err(OperationFailed));
}

#[tokio::test]
async fn two_parties_build_one_proof() {
    let zkp = facade();
    let engine = zkp.engine();
    let value = Value::new(5_000);
    let (first_blind, second_blind) = (blind(0x13), blind(0x24));
    let (first_nonce, second_nonce) = (zkp.create_secret_nonce().await.unwrap(), zkp.create_secret_nonce().await.unwrap());
    let shared_nonce = nonce(0x35);
    let extra = ExtraCommit::from_bytes(b"joint output".to_vec());
    let msg = message(0x42);

    let total_blind = zkp.sum_blinds(&[first_blind.clone(), second_blind.clone()], &[]).await.unwrap();
    let commitment = zkp.pedersen_commit(&total_blind, value).await.unwrap();

    let (first_t1, first_t2) = engine.bulletproof_round_one(&first_nonce).unwrap();
    let (second_t1, second_t2) = engine.bulletproof_round_one(&second_nonce).unwrap();
    let t_one_total = zkp.combine_public_keys(&[first_t1, second_t1]).await.unwrap();
    let t_two_total = zkp.combine_public_keys(&[first_t2, second_t2]).await.unwrap();

    let statement = MultiPartyStatement {
        commitment: commitment.clone(),
        value,
        nonce: shared_nonce.clone(),
        extra: extra.clone(),
        message: msg.clone(),
        t_one_total: t_one_total.clone(),
        t_two_total: t_two_total.clone(),
    };
    let shares = [
        engine.bulletproof_round_two(&first_nonce, &first_blind, &statement).unwrap(),
        engine.bulletproof_round_two(&second_nonce, &second_blind, &statement).unwrap(),
    ];
    let tau_x = engine.sum_tau_x_shares(&shares).unwrap();

    let proof = zkp
        .create_bulletproof_blindless(&tau_x, &t_one_total, &t_two_total, &commitment, value, &shared_nonce, &extra, &msg)
        .await
        .unwrap();
    assert_eq!(zkp.verify_bulletproof(&proof, &commitment, &extra).await, Ok(true));
    assert_eq!(zkp.verify_bulletproof(&proof, &commitment, &ExtraCommit::empty()).await, Ok(false));

    // One party's share alone does not make a valid proof.
    let lone = zkp
        .create_bulletproof_blindless(&shares[0], &t_one_total, &t_two_total, &commitment, value, &shared_nonce, &extra, &msg)
        .await
        .unwrap();
    assert_eq!(zkp.verify_bulletproof(&lone, &commitment, &extra).await, Ok(false));
}
