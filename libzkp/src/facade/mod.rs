//! The primitive facade.
//!
//! [`Secp256k1Zkp`] exposes one async method per engine operation. Each method checks the lengths of its inputs,
//! encodes them, awaits exactly one engine response and decodes it. Every failure along the way, whatever its cause,
//! is logged and then returned as [`OperationFailed`].
//!
//! The facade holds no state besides its engine, so any number of calls may be in flight at once.

mod bulletproofs;
mod commitments;
mod keys;
mod signatures;

use crate::engine::{Argument, Engine, Operation, Response};
use crate::error::{BoundaryError, FacadeResult, OperationFailed};
use log::*;

pub struct Secp256k1Zkp<E> {
    engine: E,
}

impl<E: Engine> Secp256k1Zkp<E> {
    pub fn new(engine: E) -> Self {
        Secp256k1Zkp { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    async fn call<T>(
        &self,
        operation: Operation,
        arguments: Result<Vec<Argument>, BoundaryError>,
        decode: impl FnOnce(Operation, Response) -> Result<T, BoundaryError>,
    ) -> FacadeResult<T> {
        self.try_call(operation, arguments, decode).await.map_err(|err| {
            warn!("{operation} failed: {err}");
            OperationFailed
        })
    }

    async fn try_call<T>(
        &self,
        operation: Operation,
        arguments: Result<Vec<Argument>, BoundaryError>,
        decode: impl FnOnce(Operation, Response) -> Result<T, BoundaryError>,
    ) -> Result<T, BoundaryError> {
        let arguments = arguments?;
        debug!("Calling {operation} with {} arguments", arguments.len());
        let response = self.engine.invoke(operation, arguments).await?;
        trace!("{operation} responded with {}", response.kind());
        decode(operation, response)
    }
}

/// Collects encoded arguments, failing on the first one that could not be encoded.
fn arguments<const N: usize>(items: [Result<Argument, BoundaryError>; N]) -> Result<Vec<Argument>, BoundaryError> {
    items.into_iter().collect()
}

fn raw_bytes(bytes: &[u8]) -> Result<Argument, BoundaryError> {
    Ok(Argument::Text(hex::encode(bytes)))
}
