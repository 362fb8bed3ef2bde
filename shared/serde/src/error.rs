use thiserror::Error;

/// Errors produced while reading a value back out of a bit stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran past the end of its buffer
    #[error("Unexpected end of buffer while reading")]
    UnexpectedEnd,

    /// The encoded value does not fit the type being read
    #[error("Encoded value is out of range for {type_name}")]
    OutOfRange { type_name: &'static str },

    /// A string payload was not valid UTF-8
    #[error("Encoded string is not valid UTF-8")]
    InvalidUtf8,
}
