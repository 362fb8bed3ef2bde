use thiserror::Error;

/// Errors raised while encoding or decoding a single replicated value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// No codec was registered for the type and it has no built-in fallback
    #[error("No serializer registered for type '{type_name}'. Register one with `CodecRegistry::register()` (or `register_blittable()` for plain-old-data structs) before spawning objects that replicate it")]
    MissingSerializer { type_name: &'static str },

    /// The payload did not decode cleanly into the declared type
    #[error("Corrupt payload for type '{type_name}': {detail}")]
    CorruptPayload {
        type_name: &'static str,
        detail: String,
    },

    /// A value handed to a codec was not of the codec's type
    #[error("Codec for type '{expected}' was handed a value of another type")]
    TypeMismatch { expected: &'static str },
}
