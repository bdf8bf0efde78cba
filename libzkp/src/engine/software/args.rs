use crate::encoding::parse_decimal;
use crate::engine::{Argument, EngineError, Operation};

/// A cursor over the positional arguments of one call.
///
/// Every accessor consumes one argument and names it in the error when it is missing or has the wrong shape.
pub(crate) struct Arguments {
    operation: Operation,
    values: std::vec::IntoIter<Argument>,
    position: usize,
    max_list_length: Option<usize>,
}

impl Arguments {
    pub fn new(operation: Operation, values: Vec<Argument>, max_list_length: Option<usize>) -> Self {
        Arguments { operation, values: values.into_iter(), position: 0, max_list_length }
    }

    fn next(&mut self, name: &str) -> Result<Argument, EngineError> {
        self.position += 1;
        self.values.next().ok_or_else(|| {
            EngineError::malformed(format!("{} is missing argument {} ({name})", self.operation, self.position))
        })
    }

    fn wrong_shape(&self, name: &str, expected: &str, got: &Argument) -> EngineError {
        EngineError::malformed(format!("{}: {name} must be {expected}, but got {}", self.operation, got.kind()))
    }

    pub fn bytes(&mut self, name: &str) -> Result<Vec<u8>, EngineError> {
        match self.next(name)? {
            Argument::Text(hex_str) => decode_hex(self.operation, name, &hex_str),
            other => Err(self.wrong_shape(name, "a hex string", &other)),
        }
    }

    pub fn fixed<const N: usize>(&mut self, name: &str) -> Result<[u8; N], EngineError> {
        let bytes = self.bytes(name)?;
        exact_length(self.operation, name, bytes)
    }

    pub fn optional_bytes(&mut self, name: &str) -> Result<Option<Vec<u8>>, EngineError> {
        match self.next(name)? {
            Argument::Null => Ok(None),
            Argument::Text(hex_str) => decode_hex(self.operation, name, &hex_str).map(Some),
            other => Err(self.wrong_shape(name, "a hex string or null", &other)),
        }
    }

    /// A trailing argument that older callers omit. Absent means empty.
    pub fn trailing_bytes_or_empty(&mut self, name: &str) -> Result<Vec<u8>, EngineError> {
        if self.values.as_slice().is_empty() {
            return Ok(Vec::new());
        }
        self.bytes(name)
    }

    pub fn value(&mut self, name: &str) -> Result<u64, EngineError> {
        match self.next(name)? {
            Argument::Text(decimal) => parse_decimal(&decimal).ok_or_else(|| {
                EngineError::malformed(format!("{}: {name} is not a 64-bit decimal: {decimal:?}", self.operation))
            }),
            other => Err(self.wrong_shape(name, "a decimal string", &other)),
        }
    }

    pub fn flag(&mut self, name: &str) -> Result<bool, EngineError> {
        match self.next(name)? {
            Argument::Bool(b) => Ok(b),
            other => Err(self.wrong_shape(name, "a boolean", &other)),
        }
    }

    pub fn list(&mut self, name: &str) -> Result<Vec<Vec<u8>>, EngineError> {
        match self.next(name)? {
            Argument::List(items) => {
                if let Some(limit) = self.max_list_length.filter(|limit| items.len() > *limit) {
                    return Err(EngineError::malformed(format!(
                        "{}: {name} has {} items, more than the limit of {limit}",
                        self.operation,
                        items.len(),
                    )));
                }
                items.iter().map(|item| decode_hex(self.operation, name, item)).collect()
            }
            other => Err(self.wrong_shape(name, "a list of hex strings", &other)),
        }
    }

    /// Fails if the caller passed more arguments than the operation takes.
    pub fn finish(mut self) -> Result<(), EngineError> {
        match self.values.next() {
            None => Ok(()),
            Some(_) => Err(EngineError::malformed(format!(
                "{} takes {} arguments, but more were supplied",
                self.operation, self.position
            ))),
        }
    }
}

fn decode_hex(operation: Operation, name: &str, hex_str: &str) -> Result<Vec<u8>, EngineError> {
    if hex_str.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(EngineError::malformed(format!("{operation}: {name} is not lowercase hex")));
    }
    hex::decode(hex_str).map_err(|e| EngineError::malformed(format!("{operation}: {name} is not valid hex: {e}")))
}

pub(crate) fn exact_length<const N: usize>(
    operation: Operation,
    name: &str,
    bytes: Vec<u8>,
) -> Result<[u8; N], EngineError> {
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| EngineError::malformed(format!("{operation}: {name} must be {N} bytes, but got {len}")))
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(values: Vec<Argument>) -> Arguments {
        Arguments::new(Operation::BlindSum, values, Some(2))
    }

    #[test]
    fn reads_in_order() {
        let mut a = args(vec![
            Argument::Text("0a0b".into()),
            Argument::Null,
            Argument::Text("42".into()),
            Argument::Bool(false),
            Argument::List(vec!["01".into()]),
        ]);
        assert_eq!(a.bytes("first").unwrap(), vec![10, 11]);
        assert_eq!(a.optional_bytes("second").unwrap(), None);
        assert_eq!(a.value("third").unwrap(), 42);
        assert!(!a.flag("fourth").unwrap());
        assert_eq!(a.list("fifth").unwrap(), vec![vec![1]]);
        a.finish().unwrap();
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(args(vec![]).bytes("x").is_err());
        assert!(args(vec![Argument::Text("0A".into())]).bytes("x").is_err());
        assert!(args(vec![Argument::Text("abc".into())]).bytes("x").is_err());
        assert!(args(vec![Argument::Bool(true)]).value("x").is_err());
        assert!(args(vec![Argument::Text("-3".into())]).value("x").is_err());
        assert!(args(vec![Argument::Text("00".into())]).fixed::<2>("x").is_err());
        let too_long = Argument::List(vec!["01".into(), "02".into(), "03".into()]);
        assert!(args(vec![too_long]).list("x").is_err());
        assert!(args(vec![Argument::Null]).finish().is_err());
    }

    #[test]
    fn lists_are_unlimited_by_default() {
        let long = Argument::List(vec!["01".into(); 1000]);
        let mut a = Arguments::new(Operation::CombinePublicKeys, vec![long.clone()], None);
        assert_eq!(a.list("x").unwrap().len(), 1000);
        let mut at_limit = Arguments::new(Operation::CombinePublicKeys, vec![long.clone()], Some(1000));
        assert_eq!(at_limit.list("x").unwrap().len(), 1000);
        let mut over_limit = Arguments::new(Operation::CombinePublicKeys, vec![long], Some(999));
        assert!(over_limit.list("x").is_err());
    }
}
