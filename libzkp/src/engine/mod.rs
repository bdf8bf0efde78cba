//! The boundary to the cryptographic engine.
//!
//! The facade talks to an engine through a single call-and-await primitive, [`Engine::invoke`]. Every argument and
//! every result crosses the boundary in its textual form: binary values as lowercase hex, 64-bit values as decimal
//! strings, absent optionals as [`Argument::Null`]. Both [`Argument`] and [`Response`] serialize untagged so that a
//! remote transport can carry them as plain JSON.

mod config;
#[cfg(feature = "dummy_engine")]
pub mod dummy_impl;
mod error;
#[cfg(feature = "software_engine")]
pub mod software;

pub use config::{ConfigError, EngineConfig};
pub use error::EngineError;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::sync::Arc;

pub trait Engine: Send + Sync {
    /// Run `operation` with the given positional arguments and wait for its single result.
    ///
    /// Once issued, a call runs to completion. Dropping the returned future abandons the result but does not cancel
    /// the work.
    fn invoke(
        &self,
        operation: Operation,
        arguments: Vec<Argument>,
    ) -> impl Future<Output = Result<Response, EngineError>> + Send;
}

impl<E: Engine> Engine for Arc<E> {
    fn invoke(
        &self,
        operation: Operation,
        arguments: Vec<Argument>,
    ) -> impl Future<Output = Result<Response, EngineError>> + Send {
        (**self).invoke(operation, arguments)
    }
}

macro_rules! operations {
    ($($variant:ident => $wire:literal),* $(,)?) => {
        /// The operation catalogue, named as the engine knows them.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Operation {
            $(#[serde(rename = $wire)] $variant),*
        }

        impl Operation {
            pub const ALL: &'static [Operation] = &[$(Operation::$variant),*];

            pub fn wire_name(&self) -> &'static str {
                match self {
                    $(Operation::$variant => $wire),*
                }
            }
        }
    };
}

operations! {
    BlindSwitch => "blindSwitch",
    BlindSum => "blindSum",
    IsValidSecretKey => "isValidSecretKey",
    IsValidPublicKey => "isValidPublicKey",
    IsValidCommit => "isValidCommit",
    IsValidSingleSignerSignature => "isValidSingleSignerSignature",
    CreateBulletproof => "createBulletproof",
    CreateBulletproofBlindless => "createBulletproofBlindless",
    RewindBulletproof => "rewindBulletproof",
    VerifyBulletproof => "verifyBulletproof",
    PublicKeyFromSecretKey => "publicKeyFromSecretKey",
    PublicKeyFromData => "publicKeyFromData",
    UncompressPublicKey => "uncompressPublicKey",
    SecretKeyTweakAdd => "secretKeyTweakAdd",
    PublicKeyTweakAdd => "publicKeyTweakAdd",
    SecretKeyTweakMultiply => "secretKeyTweakMultiply",
    PublicKeyTweakMultiply => "publicKeyTweakMultiply",
    SharedSecretKeyFromSecretKeyAndPublicKey => "sharedSecretKeyFromSecretKeyAndPublicKey",
    PedersenCommit => "pedersenCommit",
    PedersenCommitSum => "pedersenCommitSum",
    PedersenCommitToPublicKey => "pedersenCommitToPublicKey",
    PublicKeyToPedersenCommit => "publicKeyToPedersenCommit",
    CreateSingleSignerSignature => "createSingleSignerSignature",
    AddSingleSignerSignatures => "addSingleSignerSignatures",
    VerifySingleSignerSignature => "verifySingleSignerSignature",
    SingleSignerSignatureFromData => "singleSignerSignatureFromData",
    CompactSingleSignerSignature => "compactSingleSignerSignature",
    UncompactSingleSignerSignature => "uncompactSingleSignerSignature",
    CombinePublicKeys => "combinePublicKeys",
    CreateSecretNonce => "createSecretNonce",
    CreateMessageHashSignature => "createMessageHashSignature",
    VerifyMessageHashSignature => "verifyMessageHashSignature",
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// One positional argument of an engine call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Null,
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl Argument {
    pub fn kind(&self) -> &'static str {
        match self {
            Argument::Null => "null",
            Argument::Bool(_) => "bool",
            Argument::Text(_) => "text",
            Argument::List(_) => "list",
        }
    }
}

// Arguments routinely carry secret keys and nonces, so only their shape is printed.
impl std::fmt::Debug for Argument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::Null => f.write_str("Null"),
            Argument::Bool(b) => write!(f, "Bool({b})"),
            Argument::Text(s) => write!(f, "Text(<{} chars>)", s.len()),
            Argument::List(items) => write!(f, "List(<{} items>)", items.len()),
        }
    }
}

/// The components of a rewound bulletproof, as they cross the boundary.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewoundFields {
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Blind")]
    pub blind: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl std::fmt::Debug for RewoundFields {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewoundFields").field("value", &self.value).field("blind", &"..").field("message", &self.message).finish()
    }
}

/// The single result of an engine call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Bool(bool),
    Text(String),
    Rewound(RewoundFields),
}

impl Response {
    pub fn kind(&self) -> &'static str {
        match self {
            Response::Bool(_) => "bool",
            Response::Text(_) => "text",
            Response::Rewound(_) => "rewound bulletproof",
        }
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Bool(b) => write!(f, "Bool({b})"),
            Response::Text(s) => write!(f, "Text(<{} chars>)", s.len()),
            Response::Rewound(fields) => write!(f, "Rewound({fields:?})"),
        }
    }
}
