use thiserror::Error;

/// Errors produced during registration, parsing, and value queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Registration-time misuse: an empty or prefix-only flag, a reserved
    /// name, a duplicate registration, or a flag/value-name collision.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The argument vector had a hole before its declared length.
    ///
    /// All parse state derived so far is discarded before this is returned;
    /// registered declarations survive.
    #[error("malformed argument list")]
    MalformedArgumentList,

    /// Required flags that never appeared, in registration order.
    #[error("missing required options: {}", .0.join(", "))]
    MissingRequiredOption(Vec<String>),

    /// A value index past the end of an option's collected values.
    #[error("no value at index {index} for {flag} ({len} collected)")]
    IndexOutOfRange {
        flag: String,
        index: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
