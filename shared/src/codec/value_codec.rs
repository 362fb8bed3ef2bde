use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use bytemuck::Pod;
use netvar_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// Bounds every replicated value must satisfy
pub trait NetValue: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> NetValue for T {}

/// A pair of functions able to write a `T` into a bit stream and read it back.
///
/// Implementations must be deterministic and `decode` must invert `encode`.
pub trait Codec<T>: Send + Sync + 'static {
    fn encode(&self, writer: &mut dyn BitWrite, value: &T);

    fn decode(&self, reader: &mut BitReader) -> Result<T, SerdeErr>;
}

type EncodeFn<T> = dyn Fn(&mut dyn BitWrite, &T) + Send + Sync;
type DecodeFn<T> = dyn Fn(&mut BitReader) -> Result<T, SerdeErr> + Send + Sync;

/// Codec built from two closures or function items
pub struct FnCodec<T> {
    encode: Box<EncodeFn<T>>,
    decode: Box<DecodeFn<T>>,
}

impl<T> FnCodec<T> {
    pub fn new<E, D>(encode: E, decode: D) -> Self
    where
        E: Fn(&mut dyn BitWrite, &T) + Send + Sync + 'static,
        D: Fn(&mut BitReader) -> Result<T, SerdeErr> + Send + Sync + 'static,
    {
        Self {
            encode: Box::new(encode),
            decode: Box::new(decode),
        }
    }
}

impl<T: 'static> Codec<T> for FnCodec<T> {
    fn encode(&self, writer: &mut dyn BitWrite, value: &T) {
        (self.encode)(writer, value)
    }

    fn decode(&self, reader: &mut BitReader) -> Result<T, SerdeErr> {
        (self.decode)(reader)
    }
}

/// Codec that defers to the type's own `Serde` impl
pub struct SerdeCodec<T>(PhantomData<fn() -> T>);

impl<T> SerdeCodec<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for SerdeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serde + 'static> Codec<T> for SerdeCodec<T> {
    fn encode(&self, writer: &mut dyn BitWrite, value: &T) {
        value.ser(writer);
    }

    fn decode(&self, reader: &mut BitReader) -> Result<T, SerdeErr> {
        T::de(reader)
    }
}

/// Codec for plain-old-data opted in with `register_blittable`: the value's
/// raw bytes in native byte order, nothing else
pub struct RawCodec<T>(PhantomData<fn() -> T>);

impl<T> RawCodec<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for RawCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pod> Codec<T> for RawCodec<T> {
    fn encode(&self, writer: &mut dyn BitWrite, value: &T) {
        writer.write_bytes(bytemuck::bytes_of(value));
    }

    fn decode(&self, reader: &mut BitReader) -> Result<T, SerdeErr> {
        let bytes = reader.read_bytes(std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(&bytes))
    }
}

/// Object-safe view of a `Codec<T>`, used when only the slot's declared
/// `ValueType` is known
pub(crate) trait ErasedCodec: Send + Sync {
    /// Returns false when `value` is not of the codec's type
    fn encode_any(&self, writer: &mut dyn BitWrite, value: &dyn Any) -> bool;

    fn decode_any(&self, reader: &mut BitReader) -> Result<Box<dyn Any + Send + Sync>, SerdeErr>;
}

pub(crate) struct TypedCodec<T> {
    inner: Arc<dyn Codec<T>>,
}

impl<T> TypedCodec<T> {
    pub(crate) fn new(inner: Arc<dyn Codec<T>>) -> Self {
        Self { inner }
    }
}

impl<T: NetValue> ErasedCodec for TypedCodec<T> {
    fn encode_any(&self, writer: &mut dyn BitWrite, value: &dyn Any) -> bool {
        let Some(value) = value.downcast_ref::<T>() else {
            return false;
        };
        self.inner.encode(writer, value);
        true
    }

    fn decode_any(&self, reader: &mut BitReader) -> Result<Box<dyn Any + Send + Sync>, SerdeErr> {
        Ok(Box::new(self.inner.decode(reader)?))
    }
}
