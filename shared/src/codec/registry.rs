use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use bytemuck::Pod;
use log::info;
use netvar_serde::{BitReader, BitWrite, Serde};

use super::{
    value_codec::TypedCodec, Codec, CodecError, ErasedCodec, FnCodec, NetValue, RawCodec,
    SerdeCodec, ValueType,
};

struct CodecEntry {
    erased: Arc<dyn ErasedCodec>,
    // holds an `Arc<dyn Codec<T>>` for the entry's `T`
    typed: Box<dyn Any + Send + Sync>,
}

impl CodecEntry {
    fn new<T: NetValue>(codec: Arc<dyn Codec<T>>) -> Self {
        Self {
            erased: Arc::new(TypedCodec::new(codec.clone())),
            typed: Box::new(codec),
        }
    }
}

struct RegistryTables {
    user: HashMap<TypeId, CodecEntry>,
    fallback: HashMap<TypeId, CodecEntry>,
}

impl RegistryTables {
    fn new() -> Self {
        let mut fallback = HashMap::new();
        insert_serde::<bool>(&mut fallback);
        insert_serde::<u8>(&mut fallback);
        insert_serde::<u16>(&mut fallback);
        insert_serde::<u32>(&mut fallback);
        insert_serde::<u64>(&mut fallback);
        insert_serde::<i8>(&mut fallback);
        insert_serde::<i16>(&mut fallback);
        insert_serde::<i32>(&mut fallback);
        insert_serde::<i64>(&mut fallback);
        insert_serde::<f32>(&mut fallback);
        insert_serde::<f64>(&mut fallback);

        Self {
            user: HashMap::new(),
            fallback,
        }
    }

    fn get(&self, type_id: &TypeId) -> Option<&CodecEntry> {
        self.user.get(type_id).or_else(|| self.fallback.get(type_id))
    }
}

fn insert_fallback<T: NetValue>(table: &mut HashMap<TypeId, CodecEntry>, codec: Arc<dyn Codec<T>>) {
    table.insert(TypeId::of::<T>(), CodecEntry::new(codec));
}

fn insert_serde<T: NetValue + Serde>(table: &mut HashMap<TypeId, CodecEntry>) {
    insert_fallback::<T>(table, Arc::new(SerdeCodec::<T>::new()));
}

fn insert_raw<T: NetValue + Pod>(table: &mut HashMap<TypeId, CodecEntry>) {
    insert_fallback::<T>(table, Arc::new(RawCodec::<T>::new()));
}

/// Maps value types to the codec used to put them on the wire.
///
/// A registry starts with no user codecs. Primitive numbers and `bool` always
/// resolve through a built-in codec writing their little-endian bytes, and
/// plain-old-data structs can opt into a raw-bytes codec with
/// [`CodecRegistry::register_blittable`]. Anything else must be registered
/// before an object replicating it is spawned.
///
/// Peers in the same process share one registry through an `Arc`;
/// registration takes `&self` so it stays visible to every holder.
/// Call [`CodecRegistry::clear`] between tests to return to the initial state.
pub struct CodecRegistry {
    tables: RwLock<RegistryTables>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(RegistryTables::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryTables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryTables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    // Registration

    /// Registers a codec built from an encode and a decode closure.
    /// Replaces any earlier registration for `T`.
    pub fn register<T, E, D>(&self, encode: E, decode: D)
    where
        T: NetValue,
        E: Fn(&mut dyn BitWrite, &T) + Send + Sync + 'static,
        D: Fn(&mut BitReader) -> Result<T, netvar_serde::SerdeErr> + Send + Sync + 'static,
    {
        self.register_codec::<T, _>(FnCodec::new(encode, decode));
    }

    /// Registers any `Codec<T>` implementation. Replaces any earlier
    /// registration for `T`.
    pub fn register_codec<T: NetValue, C: Codec<T>>(&self, codec: C) {
        let codec: Arc<dyn Codec<T>> = Arc::new(codec);
        let replaced = self
            .write()
            .user
            .insert(TypeId::of::<T>(), CodecEntry::new(codec))
            .is_some();

        if replaced {
            info!("CodecRegistry: replacing codec for {}", std::any::type_name::<T>());
        } else {
            info!("CodecRegistry: registering codec for {}", std::any::type_name::<T>());
        }
    }

    /// Registers `T` using its own `Serde` implementation
    pub fn register_serde<T: NetValue + Serde>(&self) {
        self.register_codec::<T, _>(SerdeCodec::<T>::new());
    }

    /// Opts a plain-old-data type into the built-in raw-bytes codec. The
    /// bytes are in native order, so peers must share endianness.
    pub fn register_blittable<T: NetValue + Pod>(&self) {
        insert_raw::<T>(&mut self.write().fallback);
        info!("CodecRegistry: {} replicates as raw bytes", std::any::type_name::<T>());
    }

    /// Removes a user registration. Returns whether one existed.
    pub fn unregister<T: NetValue>(&self) -> bool {
        self.write().user.remove(&TypeId::of::<T>()).is_some()
    }

    /// Drops every user codec and blittable opt-in
    pub fn clear(&self) {
        *self.write() = RegistryTables::new();
    }

    // Lookup

    /// The codec registered by the user for `T`, ignoring built-in fallbacks
    pub fn lookup<T: NetValue>(&self) -> Option<Arc<dyn Codec<T>>> {
        self.read()
            .user
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.typed.downcast_ref::<Arc<dyn Codec<T>>>())
            .cloned()
    }

    pub fn user_codec_count(&self) -> usize {
        self.read().user.len()
    }

    /// Whether values of `value_type` can be encoded, by a user codec or a
    /// built-in one
    pub fn is_resolvable(&self, value_type: &ValueType) -> bool {
        self.read().get(&value_type.type_id()).is_some()
    }

    pub(crate) fn resolve(&self, value_type: &ValueType) -> Result<Arc<dyn ErasedCodec>, CodecError> {
        self.read()
            .get(&value_type.type_id())
            .map(|entry| entry.erased.clone())
            .ok_or(CodecError::MissingSerializer {
                type_name: value_type.name(),
            })
    }

    // Encoding

    pub fn encode_value<T: NetValue>(
        &self,
        writer: &mut dyn BitWrite,
        value: &T,
    ) -> Result<(), CodecError> {
        let value_type = ValueType::of::<T>();
        let codec = self.resolve(&value_type)?;
        if codec.encode_any(writer, value) {
            Ok(())
        } else {
            Err(CodecError::TypeMismatch {
                expected: value_type.name(),
            })
        }
    }

    pub fn decode_value<T: NetValue>(&self, reader: &mut BitReader) -> Result<T, CodecError> {
        let value_type = ValueType::of::<T>();
        let codec = self.resolve(&value_type)?;
        let value = codec
            .decode_any(reader)
            .map_err(|error| CodecError::CorruptPayload {
                type_name: value_type.name(),
                detail: error.to_string(),
            })?;
        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| CodecError::TypeMismatch {
                expected: value_type.name(),
            })
    }
}
