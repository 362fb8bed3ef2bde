use std::any::Any;

use netvar_serde::BitWrite;

use crate::{
    codec::{CodecError, CodecRegistry, NetValue, ValueType},
    AuthorityRole,
};

use super::ReplicatedVariable;

/// Type-erased view of a `ReplicatedVariable<T>`, used by the delta pipeline
/// which only knows slots by index and declared type.
pub trait AnyVariable: Send + Sync {
    fn value_type(&self) -> ValueType;
    fn authority(&self) -> AuthorityRole;
    fn has_authority(&self) -> bool;
    fn is_dirty(&self) -> bool;
    fn clear_dirty(&mut self);

    fn write_value(&self, registry: &CodecRegistry, writer: &mut dyn BitWrite)
        -> Result<(), CodecError>;

    /// Applies a decoded value received from the network
    fn apply_decoded(&mut self, value: Box<dyn Any + Send + Sync>) -> Result<(), CodecError>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: NetValue> AnyVariable for ReplicatedVariable<T> {
    fn value_type(&self) -> ValueType {
        ValueType::of::<T>()
    }

    fn authority(&self) -> AuthorityRole {
        ReplicatedVariable::authority(self)
    }

    fn has_authority(&self) -> bool {
        ReplicatedVariable::has_authority(self)
    }

    fn is_dirty(&self) -> bool {
        ReplicatedVariable::is_dirty(self)
    }

    fn clear_dirty(&mut self) {
        ReplicatedVariable::clear_dirty(self)
    }

    fn write_value(
        &self,
        registry: &CodecRegistry,
        writer: &mut dyn BitWrite,
    ) -> Result<(), CodecError> {
        registry.encode_value(writer, self.get())
    }

    fn apply_decoded(&mut self, value: Box<dyn Any + Send + Sync>) -> Result<(), CodecError> {
        let value = value.downcast::<T>().map_err(|_| CodecError::TypeMismatch {
            expected: std::any::type_name::<T>(),
        })?;
        self.apply_remote(*value);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
