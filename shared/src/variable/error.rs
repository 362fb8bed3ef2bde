use thiserror::Error;

use crate::{ObjectId, SlotIndex};

/// Errors from reading or writing a replicated variable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    /// `set` was called on a peer that does not hold the variable's authority.
    /// The value is left unchanged.
    #[error("Cannot write slot {slot} of {object_id}: local peer does not hold {authority} authority")]
    AuthorityViolation {
        object_id: ObjectId,
        slot: SlotIndex,
        authority: &'static str,
    },

    /// The object has no slot at this index
    #[error("{object_id} has no replicated slot {slot}")]
    SlotNotFound { object_id: ObjectId, slot: SlotIndex },

    /// The slot exists but holds a different value type
    #[error("Slot {slot} of {object_id} does not hold a value of type '{expected}'")]
    TypeMismatch {
        object_id: ObjectId,
        slot: SlotIndex,
        expected: &'static str,
    },
}
