use crate::{
    codec::NetValue, protocol::ObjectSchema, AnyVariable, ObjectId, ObjectKind, PeerId,
    ReplicatedVariable, SlotIndex, VarKey, VariableError,
};

/// One spawned object as seen by one peer: its identity and its replicated
/// variables, in slot order
pub struct NetworkObject {
    id: ObjectId,
    kind: ObjectKind,
    owner: Option<PeerId>,
    variables: Vec<Box<dyn AnyVariable>>,
}

impl NetworkObject {
    /// Builds the variables declared by `schema`. The local peer receives
    /// write access to each slot whose authority it holds.
    pub fn instantiate(
        schema: &ObjectSchema,
        id: ObjectId,
        kind: ObjectKind,
        owner: Option<PeerId>,
        local_peer: PeerId,
    ) -> Self {
        let variables = schema.instantiate(id, |role| role.is_held_by(local_peer, owner));
        Self {
            id,
            kind,
            owner,
            variables,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn owner(&self) -> Option<PeerId> {
        self.owner
    }

    // Typed access

    pub fn variable<T: NetValue>(&self, key: VarKey<T>) -> Result<&ReplicatedVariable<T>, VariableError> {
        let slot = key.slot();
        self.slot(slot)
            .ok_or(VariableError::SlotNotFound {
                object_id: self.id,
                slot,
            })?
            .as_any()
            .downcast_ref::<ReplicatedVariable<T>>()
            .ok_or(VariableError::TypeMismatch {
                object_id: self.id,
                slot,
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn variable_mut<T: NetValue>(
        &mut self,
        key: VarKey<T>,
    ) -> Result<&mut ReplicatedVariable<T>, VariableError> {
        let slot = key.slot();
        let id = self.id;
        self.slot_mut(slot)
            .ok_or(VariableError::SlotNotFound { object_id: id, slot })?
            .as_any_mut()
            .downcast_mut::<ReplicatedVariable<T>>()
            .ok_or(VariableError::TypeMismatch {
                object_id: id,
                slot,
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn get<T: NetValue>(&self, key: VarKey<T>) -> Result<&T, VariableError> {
        Ok(self.variable(key)?.get())
    }

    pub fn set<T: NetValue>(&mut self, key: VarKey<T>, value: T) -> Result<(), VariableError> {
        self.variable_mut(key)?.set(value)
    }

    // Untyped access

    pub fn slot(&self, index: SlotIndex) -> Option<&dyn AnyVariable> {
        self.variables.get(index as usize).map(|variable| variable.as_ref())
    }

    pub(crate) fn slot_mut(&mut self, index: SlotIndex) -> Option<&mut dyn AnyVariable> {
        match self.variables.get_mut(index as usize) {
            Some(variable) => Some(variable.as_mut()),
            None => None,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.variables.len()
    }

    /// Slots the local peer wrote since they were last sent
    pub fn dirty_slots(&self) -> Vec<SlotIndex> {
        self.variables
            .iter()
            .enumerate()
            .filter(|(_, variable)| variable.has_authority() && variable.is_dirty())
            .map(|(index, _)| index as SlotIndex)
            .collect()
    }

    pub fn has_dirty_slots(&self) -> bool {
        self.variables
            .iter()
            .any(|variable| variable.has_authority() && variable.is_dirty())
    }
}
