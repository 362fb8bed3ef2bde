use crate::{ObjectId, ReplicationError, SlotIndex};

/// What happened during one call to `receive()`
#[derive(Default)]
pub struct Events {
    spawns: Vec<ObjectId>,
    despawns: Vec<ObjectId>,
    updates: Vec<(ObjectId, SlotIndex)>,
    errors: Vec<ReplicationError>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty()
            && self.despawns.is_empty()
            && self.updates.is_empty()
            && self.errors.is_empty()
    }

    /// Objects that became visible locally, in arrival order
    pub fn spawns(&self) -> &[ObjectId] {
        &self.spawns
    }

    pub fn despawns(&self) -> &[ObjectId] {
        &self.despawns
    }

    /// Slots overwritten by a remote peer, in the order they were applied
    pub fn updates(&self) -> &[(ObjectId, SlotIndex)] {
        &self.updates
    }

    pub fn has_update(&self, object_id: &ObjectId, slot: SlotIndex) -> bool {
        self.updates
            .iter()
            .any(|(id, index)| id == object_id && *index == slot)
    }

    pub fn errors(&self) -> &[ReplicationError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn take_errors(&mut self) -> Vec<ReplicationError> {
        std::mem::take(&mut self.errors)
    }

    // Used by the peer crates while draining the transport

    pub fn push_spawn(&mut self, object_id: ObjectId) {
        self.spawns.push(object_id);
    }

    pub fn push_despawn(&mut self, object_id: ObjectId) {
        self.despawns.push(object_id);
    }

    pub fn push_update(&mut self, object_id: ObjectId, slot: SlotIndex) {
        self.updates.push((object_id, slot));
    }

    pub fn push_error(&mut self, error: ReplicationError) {
        self.errors.push(error);
    }

    pub fn extend_errors(&mut self, errors: impl IntoIterator<Item = ReplicationError>) {
        self.errors.extend(errors);
    }
}
