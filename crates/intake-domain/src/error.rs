use thiserror::Error;

/// Errors raised while translating driver input into schema addresses or options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Unknown {kind} `{key}`")]
    UnknownField { kind: &'static str, key: String },
    #[error("`{value}` is not a valid {kind}")]
    UnknownOption { kind: &'static str, value: String },
    #[error("Invalid form id: {0}")]
    InvalidFormId(String),
}
