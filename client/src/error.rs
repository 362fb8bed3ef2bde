use thiserror::Error;

use netvar_shared::{ObjectId, VariableError};

/// Errors returned directly by `Client` calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetvarClientError {
    /// The object is not spawned on this Client
    #[error("{object_id} is not spawned on this Client")]
    ObjectNotFound { object_id: ObjectId },

    #[error(transparent)]
    Variable(#[from] VariableError),
}
