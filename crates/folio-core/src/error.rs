use thiserror::Error;

/// Errors produced when reading configuration tokens such as `"start-end"`.
///
/// Interaction itself never fails; stale handles and unmeasured elements are
/// treated as no-ops. Only the string surface can be wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown {kind} `{value}`")]
    Unknown { kind: &'static str, value: String },
    #[error("expected one of {expected} for {kind}, got an empty string")]
    Empty {
        kind: &'static str,
        expected: &'static str,
    },
}

impl ParseError {
    pub fn unknown(kind: &'static str, value: &str) -> Self {
        ParseError::Unknown {
            kind,
            value: value.to_string(),
        }
    }
}
