//! Encoding discipline at the engine boundary.
//!
//! Outgoing binary values are length-checked against their role and hex-encoded. Incoming hex is decoded and checked
//! the same way, so a truncated or oversized engine result never reaches a caller.

use crate::engine::{Argument, Operation, Response};
use crate::error::BoundaryError;
use crate::types::{Blind, ByteRole, ProofMessage, RewoundBulletproof, Value};

/// Parses an unsigned 64-bit decimal. Only ASCII digits are accepted: no sign, whitespace or radix prefix.
pub fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub fn check_length<R: ByteRole>(value: &R) -> Result<(), BoundaryError> {
    if value.has_valid_length() {
        Ok(())
    } else {
        Err(BoundaryError::InvalidLength {
            role: R::ROLE,
            expected: R::LENGTH.to_string(),
            actual: value.as_bytes().len(),
        })
    }
}

/// Hex-encodes `value` after checking its length.
pub fn bytes_argument<R: ByteRole>(value: &R) -> Result<Argument, BoundaryError> {
    check_length(value)?;
    Ok(Argument::Text(value.to_hex()))
}

/// Hex-encodes `value` as-is. Predicates use this so the engine can answer `false` for a wrong-length value.
pub fn unchecked_bytes_argument<R: ByteRole>(value: &R) -> Argument {
    Argument::Text(value.to_hex())
}

pub fn optional_bytes_argument<R: ByteRole>(value: Option<&R>) -> Result<Argument, BoundaryError> {
    value.map(bytes_argument).unwrap_or(Ok(Argument::Null))
}

pub fn list_argument<R: ByteRole>(values: &[R]) -> Result<Argument, BoundaryError> {
    let items = values
        .iter()
        .map(|v| {
            check_length(v)?;
            Ok(v.to_hex())
        })
        .collect::<Result<Vec<String>, BoundaryError>>()?;
    Ok(Argument::List(items))
}

pub fn value_argument(value: Value) -> Argument {
    Argument::Text(value.to_decimal())
}

pub fn decode_bytes<R: ByteRole>(hex_str: &str) -> Result<R, BoundaryError> {
    let value = R::from_hex(hex_str).map_err(|source| BoundaryError::InvalidHex { role: R::ROLE, source })?;
    check_length(&value)?;
    Ok(value)
}

pub fn decode_value(decimal: &str) -> Result<Value, BoundaryError> {
    parse_decimal(decimal).map(Value::new).ok_or_else(|| BoundaryError::InvalidDecimal(decimal.to_string()))
}

fn unexpected(operation: Operation, response: &Response) -> BoundaryError {
    BoundaryError::UnexpectedResponse { operation, response: response.kind().to_string() }
}

pub fn expect_bool(operation: Operation, response: Response) -> Result<bool, BoundaryError> {
    match response {
        Response::Bool(b) => Ok(b),
        other => Err(unexpected(operation, &other)),
    }
}

pub fn expect_bytes<R: ByteRole>(operation: Operation, response: Response) -> Result<R, BoundaryError> {
    match response {
        Response::Text(hex_str) => decode_bytes(&hex_str),
        other => Err(unexpected(operation, &other)),
    }
}

pub fn expect_rewound(operation: Operation, response: Response) -> Result<RewoundBulletproof, BoundaryError> {
    match response {
        Response::Rewound(fields) => Ok(RewoundBulletproof {
            value: decode_value(&fields.value)?,
            blind: decode_bytes::<Blind>(&fields.blind)?,
            message: decode_bytes::<ProofMessage>(&fields.message)?,
        }),
        other => Err(unexpected(operation, &other)),
    }
}
