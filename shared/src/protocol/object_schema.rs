use std::{fmt, marker::PhantomData, sync::Arc};

use crate::{
    codec::{NetValue, ValueType},
    AnyVariable, AuthorityRole, ObjectId, ReplicatedVariable, SlotIndex,
};

use super::ProtocolError;

type VariableFactory = dyn Fn(ObjectId, SlotIndex, bool) -> Box<dyn AnyVariable> + Send + Sync;

/// Typed handle to a slot, returned when the slot is declared.
/// Peers built from the same schema get the same handles.
pub struct VarKey<T> {
    slot: SlotIndex,
    phantom: PhantomData<fn() -> T>,
}

impl<T> VarKey<T> {
    pub(crate) fn new(slot: SlotIndex) -> Self {
        Self {
            slot,
            phantom: PhantomData,
        }
    }

    pub fn slot(&self) -> SlotIndex {
        self.slot
    }
}

impl<T> Clone for VarKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VarKey<T> {}

impl<T> fmt::Debug for VarKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarKey<{}>({})", std::any::type_name::<T>(), self.slot)
    }
}

/// Declaration of one replicated variable
#[derive(Clone)]
pub struct SlotDef {
    name: &'static str,
    value_type: ValueType,
    authority: AuthorityRole,
    factory: Arc<VariableFactory>,
}

impl SlotDef {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn authority(&self) -> AuthorityRole {
        self.authority
    }
}

/// Ordered list of the replicated slots an object kind carries.
///
/// Slot indices follow declaration order and never change afterwards.
#[derive(Clone)]
pub struct ObjectSchema {
    name: &'static str,
    slots: Vec<SlotDef>,
}

impl ObjectSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slots: Vec::new(),
        }
    }

    /// Declares a slot whose initial value is `T::default()`
    pub fn add_slot<T: NetValue + Default>(
        &mut self,
        name: &'static str,
        authority: AuthorityRole,
    ) -> Result<VarKey<T>, ProtocolError> {
        self.add_slot_with(name, authority, T::default())
    }

    /// Declares a slot with an explicit initial value
    pub fn add_slot_with<T: NetValue>(
        &mut self,
        name: &'static str,
        authority: AuthorityRole,
        initial: T,
    ) -> Result<VarKey<T>, ProtocolError> {
        let max = SlotIndex::MAX as usize + 1;
        if self.slots.len() >= max {
            return Err(ProtocolError::TooManySlots {
                name: self.name,
                max,
            });
        }
        let slot = self.slots.len() as SlotIndex;

        let factory: Arc<VariableFactory> =
            Arc::new(move |object_id, slot, has_authority| -> Box<dyn AnyVariable> {
                Box::new(ReplicatedVariable::new(
                    object_id,
                    slot,
                    authority,
                    has_authority,
                    initial.clone(),
                ))
            });

        self.slots.push(SlotDef {
            name,
            value_type: ValueType::of::<T>(),
            authority,
            factory,
        });

        Ok(VarKey::new(slot))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn slots(&self) -> &[SlotDef] {
        &self.slots
    }

    pub fn slot(&self, index: SlotIndex) -> Option<&SlotDef> {
        self.slots.get(index as usize)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Creates the variables of a new instance. `has_authority` decides,
    /// per role, whether the local peer may write.
    pub(crate) fn instantiate(
        &self,
        object_id: ObjectId,
        has_authority: impl Fn(AuthorityRole) -> bool,
    ) -> Vec<Box<dyn AnyVariable>> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, def)| {
                (def.factory)(object_id, index as SlotIndex, has_authority(def.authority))
            })
            .collect()
    }
}
