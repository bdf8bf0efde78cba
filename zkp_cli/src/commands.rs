use crate::config::{CliCommand, ProveCommand};
use crate::error::CliError;
use libzkp::engine::{ConfigError, EngineConfig};
use libzkp::types::{ByteRole, ProofMessage, PROOF_MESSAGE_SIZE};
use libzkp::{Secp256k1Zkp, SoftwareEngine};
use log::*;
use std::path::{Path, PathBuf};

pub fn default_config_path() -> PathBuf {
    let mut home = std::env::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.push(".zkp");
    home.push("engine.yml");
    home
}

/// Loads the engine configuration, falling back to the defaults when the file does not exist.
pub fn load_engine_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, CliError> {
    let path = path.as_ref();
    match EngineConfig::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::IoError(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("No configuration file found at {}. Using defaults.", path.display());
            Ok(EngineConfig::default())
        }
        Err(err) => Err(err.into()),
    }
}

/// A facade over the unaudited reference engine.
pub fn new_facade(config: EngineConfig) -> Result<Secp256k1Zkp<SoftwareEngine>, CliError> {
    let engine = SoftwareEngine::new(config)?;
    Ok(Secp256k1Zkp::new(engine))
}

/// Runs one command and returns what it prints.
pub async fn execute(zkp: &Secp256k1Zkp<SoftwareEngine>, command: CliCommand) -> Result<String, CliError> {
    let output = match command {
        CliCommand::Nonce => zkp.create_secret_nonce().await.map_err(CliError::failed("nonce"))?.to_hex(),
        CliCommand::PublicKey { secret_key, uncompressed } => {
            let key = zkp
                .derive_public_key_from_secret_key(&secret_key)
                .await
                .map_err(CliError::failed("public key"))?;
            let key = if uncompressed {
                zkp.uncompress_public_key(&key).await.map_err(CliError::failed("uncompress"))?
            } else {
                key
            };
            key.to_hex()
        }
        CliCommand::Commit { blind, value } => {
            zkp.pedersen_commit(&blind, value).await.map_err(CliError::failed("commit"))?.to_hex()
        }
        CliCommand::Prove(cmd) => prove(zkp, cmd).await?,
        CliCommand::VerifyProof { proof, commitment, extra } => {
            let extra = extra.into_extra_commit();
            let verified =
                zkp.verify_bulletproof(&proof, &commitment, &extra).await.map_err(CliError::failed("verify proof"))?;
            verified.to_string()
        }
        CliCommand::Rewind { proof, commitment, nonce, extra } => {
            let rewound = match extra.extra_commit {
                Some(extra) => zkp.rewind_bulletproof_with_extra_commit(&proof, &commitment, &nonce, &extra).await,
                None => zkp.rewind_bulletproof(&proof, &commitment, &nonce).await,
            }
            .map_err(CliError::failed("rewind"))?;
            serde_json::to_string_pretty(&rewound)?
        }
        CliCommand::SignHash { message_hash, secret_key } => zkp
            .create_message_hash_signature(&message_hash, &secret_key)
            .await
            .map_err(CliError::failed("sign hash"))?
            .to_hex(),
        CliCommand::VerifyHash { signature, message_hash, public_key } => zkp
            .verify_message_hash_signature(&signature, &message_hash, &public_key)
            .await
            .map_err(CliError::failed("verify hash"))?
            .to_string(),
    };
    Ok(output)
}

async fn prove(zkp: &Secp256k1Zkp<SoftwareEngine>, cmd: ProveCommand) -> Result<String, CliError> {
    let private_nonce = match cmd.private_nonce {
        Some(nonce) => nonce,
        None => zkp.create_secret_nonce().await.map_err(CliError::failed("nonce"))?,
    };
    let message = cmd.message.unwrap_or_else(|| ProofMessage::from_bytes(vec![0; PROOF_MESSAGE_SIZE]));
    let extra = cmd.extra.into_extra_commit();
    let proof = zkp
        .create_bulletproof(&cmd.blind, cmd.value, &cmd.nonce, &private_nonce, &extra, &message)
        .await
        .map_err(CliError::failed("prove"))?;
    debug!("Created a {} byte proof", proof.as_bytes().len());
    Ok(proof.to_hex())
}
