use crate::{codec::NetValue, AuthorityRole, ObjectId, SlotIndex};

use super::VariableError;

/// A replicated value plus the bookkeeping needed to send it.
///
/// Every successful [`set`](Self::set) marks the variable dirty, even when the
/// new value equals the old one. The dirty flag is cleared once a delta
/// carrying the value has been handed to the transport.
#[derive(Clone, Debug)]
pub struct ReplicatedVariable<T: NetValue> {
    value: T,
    dirty: bool,
    owning_object: ObjectId,
    slot: SlotIndex,
    authority: AuthorityRole,
    has_authority: bool,
}

impl<T: NetValue> ReplicatedVariable<T> {
    pub fn new(
        owning_object: ObjectId,
        slot: SlotIndex,
        authority: AuthorityRole,
        has_authority: bool,
        value: T,
    ) -> Self {
        Self {
            value,
            dirty: false,
            owning_object,
            slot,
            authority,
            has_authority,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Stores `value` and marks the variable dirty
    pub fn set(&mut self, value: T) -> Result<(), VariableError> {
        self.check_authority()?;
        self.value = value;
        self.dirty = true;
        Ok(())
    }

    /// Edits the value in place, marking the variable dirty
    pub fn mutate<F: FnOnce(&mut T)>(&mut self, func: F) -> Result<(), VariableError> {
        self.check_authority()?;
        func(&mut self.value);
        self.dirty = true;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn authority(&self) -> AuthorityRole {
        self.authority
    }

    /// Whether the local peer is the one allowed to write this variable
    pub fn has_authority(&self) -> bool {
        self.has_authority
    }

    pub fn owning_object(&self) -> ObjectId {
        self.owning_object
    }

    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    /// Overwrites the value with one received from the network.
    /// Remote copies never become dirty.
    pub(crate) fn apply_remote(&mut self, value: T) {
        self.value = value;
        self.dirty = false;
    }

    fn check_authority(&self) -> Result<(), VariableError> {
        if self.has_authority {
            return Ok(());
        }
        Err(VariableError::AuthorityViolation {
            object_id: self.owning_object,
            slot: self.slot,
            authority: self.authority.name(),
        })
    }
}
