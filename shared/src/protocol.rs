use std::{collections::HashMap, time::Duration};

use log::info;

use crate::ObjectKind;

pub mod error;
mod object_schema;

pub use error::ProtocolError;
pub use object_schema::{ObjectSchema, SlotDef, VarKey};

/// The schema and settings every peer must agree on.
///
/// Build it the same way on every peer; it is never sent over the network.
#[derive(Clone)]
pub struct Protocol {
    objects: Vec<ObjectSchema>,
    names: HashMap<&'static str, ObjectKind>,
    /// The duration between each network tick
    pub tick_interval: Duration,
    /// Whether objects may carry `AuthorityRole::Owner` slots written by clients
    pub client_authoritative_variables: bool,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            names: HashMap::new(),
            tick_interval: Duration::from_millis(50),
            client_authoritative_variables: false,
            locked: false,
        }
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds an object schema. The returned kind is the schema's index, so
    /// every peer must add schemas in the same order.
    pub fn add_object(&mut self, schema: ObjectSchema) -> Result<ObjectKind, ProtocolError> {
        self.check_lock()?;
        if self.names.contains_key(schema.name()) {
            return Err(ProtocolError::DuplicateObject {
                name: schema.name(),
            });
        }
        let max = u16::MAX as usize + 1;
        if self.objects.len() >= max {
            return Err(ProtocolError::TooManyObjects { max });
        }

        let kind = ObjectKind::new(self.objects.len() as u16);
        info!("Protocol: adding object schema {} as {}", schema.name(), kind);
        self.names.insert(schema.name(), kind);
        self.objects.push(schema);
        Ok(kind)
    }

    pub fn tick_interval(&mut self, duration: Duration) -> Result<&mut Self, ProtocolError> {
        self.check_lock()?;
        self.tick_interval = duration;
        Ok(self)
    }

    pub fn enable_client_authoritative_variables(&mut self) -> Result<&mut Self, ProtocolError> {
        self.check_lock()?;
        self.client_authoritative_variables = true;
        Ok(self)
    }

    pub fn lock(&mut self) -> Result<(), ProtocolError> {
        self.check_lock()?;
        self.locked = true;
        Ok(())
    }

    /// Locks the Protocol unless it is locked already. Peers call this when
    /// they take ownership of it.
    pub fn ensure_locked(&mut self) {
        if !self.locked {
            info!("Protocol: locked with {} object schemas", self.objects.len());
            self.locked = true;
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns Err if protocol is locked
    pub fn check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    // Lookup

    pub fn schema(&self, kind: &ObjectKind) -> Option<&ObjectSchema> {
        self.objects.get(kind.to_u16() as usize)
    }

    pub fn kind_of(&self, name: &str) -> Option<ObjectKind> {
        self.names.get(name).copied()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}
