//! The data model: every cryptographic value is a byte string with a role.
//!
//! Types in this module never interpret their bytes. They carry the role's expected length, which the facade checks
//! before a value crosses into the engine, and they serialize as lowercase hex. Whether the bytes form a valid scalar,
//! point or proof is for the engine to decide.
//!
//! Secret roles ([`SecretKey`], [`Blind`], [`Nonce`], [`Tweak`], [`TauX`]) keep their bytes in a [`Zeroizing`]
//! buffer and never print them.

use crate::encoding::parse_decimal;
use crate::error::{BoundaryError, FacadeResult, OperationFailed};
use hex::FromHexError;
use log::*;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use subtle::{Choice, ConstantTimeEq};
use thiserror::Error;
use zeroize::Zeroizing;

pub const SCALAR_SIZE: usize = 32;
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;
pub const COMMITMENT_SIZE: usize = 33;
pub const MESSAGE_HASH_SIZE: usize = 32;
pub const PROOF_MESSAGE_SIZE: usize = 20;
pub const SINGLE_SIGNER_SIGNATURE_SIZE: usize = 64;

/// The byte lengths a role accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Exact(usize),
    OneOf(&'static [usize]),
    Any,
}

impl Length {
    pub fn accepts(&self, len: usize) -> bool {
        match self {
            Length::Exact(expected) => *expected == len,
            Length::OneOf(options) => options.contains(&len),
            Length::Any => true,
        }
    }
}

impl Display for Length {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Length::Exact(expected) => write!(f, "{expected}"),
            Length::OneOf(options) => {
                let options = options.iter().map(|o| o.to_string()).collect::<Vec<_>>();
                write!(f, "one of {}", options.join(", "))
            }
            Length::Any => write!(f, "any number of"),
        }
    }
}

/// A byte string with a named role and an expected length.
pub trait ByteRole: Sized {
    /// Human-readable role name, used in diagnostics.
    const ROLE: &'static str;
    const LENGTH: Length;

    /// Wraps raw bytes. No validation takes place.
    fn from_bytes(bytes: Vec<u8>) -> Self;

    fn as_bytes(&self) -> &[u8];

    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, FromHexError> {
        hex::decode(hex).map(Self::from_bytes)
    }

    fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    fn has_valid_length(&self) -> bool {
        Self::LENGTH.accepts(self.as_bytes().len())
    }
}

macro_rules! hex_serde {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                hex::encode(self.as_bytes()).serialize(s)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                let hex_str = String::deserialize(de)?;
                hex::decode(hex_str).map(Self::from_bytes).map_err(serde::de::Error::custom)
            }
        }
    };
}

macro_rules! public_role {
    ($(#[$meta:meta])* $name:ident, $role:literal, $length:expr) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name(Vec<u8>);

        impl ByteRole for $name {
            const ROLE: &'static str = $role;
            const LENGTH: Length = $length;

            fn from_bytes(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }

            fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(&self.0))
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }

        impl From<&[u8]> for $name {
            fn from(bytes: &[u8]) -> Self {
                Self(bytes.to_vec())
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        hex_serde!($name);
    };
}

macro_rules! secret_role {
    ($(#[$meta:meta])* $name:ident, $role:literal) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(Zeroizing<Vec<u8>>);

        impl ConstantTimeEq for $name {
            fn ct_eq(&self, other: &Self) -> Choice {
                self.as_bytes().ct_eq(other.as_bytes())
            }
        }

        /// Compares in constant time for equal-length values. The length itself is not secret.
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.ct_eq(other).into()
            }
        }

        impl Eq for $name {}

        impl ByteRole for $name {
            const ROLE: &'static str = $role;
            const LENGTH: Length = Length::Exact(SCALAR_SIZE);

            fn from_bytes(bytes: Vec<u8>) -> Self {
                Self(Zeroizing::new(bytes))
            }

            fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}(..)", stringify!($name))
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self::from_bytes(bytes)
            }
        }

        impl From<&[u8]> for $name {
            fn from(bytes: &[u8]) -> Self {
                Self::from_bytes(bytes.to_vec())
            }
        }

        hex_serde!($name);
    };
}

secret_role!(
    /// A 32-byte secp256k1 scalar used as a private key.
    SecretKey,
    "secret key"
);
secret_role!(
    /// A 32-byte blinding factor for a Pedersen commitment.
    Blind,
    "blind"
);
secret_role!(
    /// A 32-byte single-use scalar. Reusing a secret nonce across signatures leaks the signing key.
    Nonce,
    "nonce"
);
secret_role!(
    /// A 32-byte scalar added to, or multiplied into, a key.
    Tweak,
    "tweak"
);
secret_role!(
    /// The summed `tau_x` share of a multi-party bulletproof.
    TauX,
    "tau_x"
);

public_role!(
    /// A SEC1 curve point, compressed (33 bytes) or uncompressed (65 bytes).
    PublicKey,
    "public key",
    Length::OneOf(&[COMPRESSED_PUBLIC_KEY_SIZE, UNCOMPRESSED_PUBLIC_KEY_SIZE])
);
public_role!(
    /// A 33-byte Pedersen commitment.
    Commitment,
    "commitment",
    Length::Exact(COMMITMENT_SIZE)
);
public_role!(
    /// A 32-byte digest signed by the message-hash signature operations.
    MessageHash,
    "message hash",
    Length::Exact(MESSAGE_HASH_SIZE)
);
public_role!(
    /// The 20 bytes of auxiliary data embedded in (and recovered from) a bulletproof.
    ProofMessage,
    "proof message",
    Length::Exact(PROOF_MESSAGE_SIZE)
);
public_role!(
    /// Opaque data bound into a bulletproof's transcript. May be empty.
    ExtraCommit,
    "extra commitment",
    Length::Any
);
public_role!(
    /// An opaque message, signed exactly as given.
    Message,
    "message",
    Length::Any
);
public_role!(
    /// A serialized bulletproof range proof.
    Proof,
    "proof",
    Length::Any
);
public_role!(
    /// A signature in any of its representations. The engine decides which lengths it accepts.
    Signature,
    "signature",
    Length::Any
);

impl ExtraCommit {
    pub fn empty() -> Self {
        Self(Vec::new())
    }
}

impl SecretKey {
    /// Reinterprets a secret nonce as a secret key, e.g. to derive its public nonce.
    pub fn from_nonce(nonce: &Nonce) -> Self {
        Self::from_bytes(nonce.as_bytes().to_vec())
    }
}

/// A 64-bit amount. It crosses the engine boundary as a decimal string so no precision is lost on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Value(u64);

impl Value {
    pub const fn new(value: u64) -> Self {
        Value(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn to_decimal(&self) -> String {
        self.0.to_string()
    }

    pub fn checked_add(&self, other: Value) -> Option<Value> {
        self.0.checked_add(other.0).map(Value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value(value)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Not a 64-bit unsigned decimal value: {0:?}")]
pub struct ValueParseError(pub String);

impl FromStr for Value {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Value).ok_or_else(|| ValueParseError(s.to_string()))
    }
}

impl Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_decimal().serialize(s)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let decimal = String::deserialize(de)?;
        decimal.parse().map_err(serde::de::Error::custom)
    }
}

/// The data embedded in a bulletproof, as recovered by rewinding it with the right nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewoundBulletproof {
    pub value: Value,
    pub blind: Blind,
    pub message: ProofMessage,
}

/// The nonce group of a single-signer signature.
///
/// Either the engine generates the nonce (a complete signature by a lone signer), or the caller supplies its secret
/// nonce, its public nonce and the sum of all co-signers' public nonces (a partial signature). There is no way to
/// express a partial group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningNonces {
    Generated,
    Supplied { secret_nonce: Nonce, public_nonce: PublicKey, public_nonce_total: PublicKey },
}

impl SigningNonces {
    pub fn supplied(secret_nonce: Nonce, public_nonce: PublicKey, public_nonce_total: PublicKey) -> Self {
        SigningNonces::Supplied { secret_nonce, public_nonce, public_nonce_total }
    }

    /// Builds the nonce group from independently optional parts. All three must be present, or none.
    pub fn from_parts(
        secret_nonce: Option<Nonce>,
        public_nonce: Option<PublicKey>,
        public_nonce_total: Option<PublicKey>,
    ) -> FacadeResult<Self> {
        match (secret_nonce, public_nonce, public_nonce_total) {
            (None, None, None) => Ok(SigningNonces::Generated),
            (Some(secret_nonce), Some(public_nonce), Some(public_nonce_total)) => {
                Ok(SigningNonces::Supplied { secret_nonce, public_nonce, public_nonce_total })
            }
            _ => {
                warn!("{}", BoundaryError::IncompleteNonceGroup);
                Err(OperationFailed)
            }
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, SigningNonces::Generated)
    }
}
