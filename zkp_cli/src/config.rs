use clap::{Args, Parser, Subcommand};
use libzkp::types::{
    Blind, ByteRole, Commitment, ExtraCommit, MessageHash, Nonce, Proof, ProofMessage, PublicKey, SecretKey, Signature,
    Value,
};
use std::path::PathBuf;

/// secp256k1 commitments, range proofs and signatures.
///
/// Binary arguments are lowercase hex; values are decimal.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// Path to the engine configuration file. The default is `$HOME/.zkp/engine.yml`.
    #[arg(long = "config-file", short = 'c')]
    pub config_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CliCommand,
}

fn hex_arg<R: ByteRole>(s: &str) -> Result<R, String> {
    R::from_hex(s).map_err(|e| format!("invalid hex for {}: {e}", R::ROLE))
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate a fresh secret nonce.
    #[command(name = "nonce")]
    Nonce,
    /// Derive the public key of a secret key.
    #[command(name = "public-key", alias = "pk")]
    PublicKey {
        #[arg(value_parser = hex_arg::<SecretKey>)]
        secret_key: SecretKey,
        /// Print the 65-byte uncompressed form.
        #[arg(long, short = 'u', default_value_t = false)]
        uncompressed: bool,
    },
    /// Commit to a value.
    #[command(name = "commit")]
    Commit {
        #[arg(value_parser = hex_arg::<Blind>)]
        blind: Blind,
        value: Value,
    },
    /// Create a range proof for the commitment to `value` under `blind`.
    #[command(name = "prove")]
    Prove(ProveCommand),
    /// Verify a range proof.
    #[command(name = "verify-proof")]
    VerifyProof {
        #[arg(value_parser = hex_arg::<Proof>)]
        proof: Proof,
        #[arg(value_parser = hex_arg::<Commitment>)]
        commitment: Commitment,
        #[command(flatten)]
        extra: ExtraCommitArg,
    },
    /// Recover the value, blind and message from a range proof.
    #[command(name = "rewind")]
    Rewind {
        #[arg(value_parser = hex_arg::<Proof>)]
        proof: Proof,
        #[arg(value_parser = hex_arg::<Commitment>)]
        commitment: Commitment,
        #[arg(value_parser = hex_arg::<Nonce>)]
        nonce: Nonce,
        #[command(flatten)]
        extra: ExtraCommitArg,
    },
    /// Sign a 32-byte message hash.
    #[command(name = "sign-hash")]
    SignHash {
        #[arg(value_parser = hex_arg::<MessageHash>)]
        message_hash: MessageHash,
        #[arg(value_parser = hex_arg::<SecretKey>)]
        secret_key: SecretKey,
    },
    /// Verify a signature over a 32-byte message hash.
    #[command(name = "verify-hash")]
    VerifyHash {
        #[arg(value_parser = hex_arg::<Signature>)]
        signature: Signature,
        #[arg(value_parser = hex_arg::<MessageHash>)]
        message_hash: MessageHash,
        #[arg(value_parser = hex_arg::<PublicKey>)]
        public_key: PublicKey,
    },
}

#[derive(Debug, Args)]
pub struct ProveCommand {
    #[arg(value_parser = hex_arg::<Blind>)]
    pub blind: Blind,
    pub value: Value,
    /// The rewind nonce. Whoever holds it can recover the value, blind and message.
    #[arg(long, short = 'n', value_parser = hex_arg::<Nonce>)]
    pub nonce: Nonce,
    /// The private nonce. A fresh one is generated if omitted.
    #[arg(long = "private-nonce", short = 'p', value_parser = hex_arg::<Nonce>)]
    pub private_nonce: Option<Nonce>,
    /// 20 bytes embedded in the proof. All zeroes if omitted.
    #[arg(long, short = 'm', value_parser = hex_arg::<ProofMessage>)]
    pub message: Option<ProofMessage>,
    #[command(flatten)]
    pub extra: ExtraCommitArg,
}

#[derive(Debug, Args)]
pub struct ExtraCommitArg {
    /// Extra data bound into the proof.
    #[arg(long = "extra", short = 'e', value_parser = hex_arg::<ExtraCommit>)]
    pub extra_commit: Option<ExtraCommit>,
}

impl ExtraCommitArg {
    pub fn into_extra_commit(self) -> ExtraCommit {
        self.extra_commit.unwrap_or_else(ExtraCommit::empty)
    }
}

pub struct GlobalOptions {
    pub config_file: Option<PathBuf>,
}

impl Config {
    pub fn to_parts(self) -> (GlobalOptions, CliCommand) {
        let global = GlobalOptions { config_file: self.config_file };
        (global, self.command)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn parses_a_proof_request() {
        let blind = "11".repeat(32);
        let nonce = "22".repeat(32);
        let args = ["zkp-cli", "-c", "x.yml", "prove", blind.as_str(), "42", "-n", nonce.as_str(), "-e", "abcd"];
        let config = Config::try_parse_from(args).unwrap();
        assert_eq!(config.config_file, Some(PathBuf::from("x.yml")));
        let CliCommand::Prove(cmd) = config.command else { panic!("expected prove") };
        assert_eq!(cmd.value, Value::new(42));
        assert_eq!(cmd.blind, Blind::from_bytes(vec![0x11; 32]));
        assert!(cmd.private_nonce.is_none());
        assert_eq!(cmd.extra.into_extra_commit(), ExtraCommit::from_bytes(vec![0xab, 0xcd]));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Config::try_parse_from(["zkp-cli", "commit", "zz", "1"]).is_err());
        assert!(Config::try_parse_from(["zkp-cli", "commit", "00", "-1"]).is_err());
        assert!(Config::try_parse_from(["zkp-cli", "commit", "00", "18446744073709551616"]).is_err());
    }
}
