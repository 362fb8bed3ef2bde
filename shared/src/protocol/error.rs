use thiserror::Error;

/// Errors that can occur while building the Protocol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol was modified after being locked
    #[error("Protocol already locked! Object schemas and settings must be added before the Protocol is handed to a Server or Client")]
    AlreadyLocked,

    /// An object schema with the same name was already added
    #[error("Object schema '{name}' was added to the Protocol twice")]
    DuplicateObject { name: &'static str },

    /// Too many object schemas for the `ObjectKind` id space
    #[error("Protocol cannot hold more than {max} object schemas")]
    TooManyObjects { max: usize },

    /// Too many slots on one object schema for the `SlotIndex` id space
    #[error("Object schema '{name}' cannot declare more than {max} replicated slots")]
    TooManySlots { name: &'static str, max: usize },
}
