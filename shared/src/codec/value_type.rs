use std::any::TypeId;
use std::fmt;

use super::NetValue;

/// The declared type of a replicated slot. Peers agree on it through the
/// shared schema, it is never sent on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValueType {
    type_id: TypeId,
    type_name: &'static str,
}

impl ValueType {
    pub fn of<T: NetValue>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}
