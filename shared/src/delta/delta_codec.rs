use std::any::Any;

use netvar_serde::{BitReader, BitWriter};

use crate::{
    codec::{CodecError, CodecRegistry, NetValue, ValueType},
    AnyVariable,
};

/// Turns one variable's value into a standalone payload and back
pub struct DeltaCodec;

impl DeltaCodec {
    /// Encodes the variable's current value with the codec registered for
    /// its declared type
    pub fn encode(variable: &dyn AnyVariable, registry: &CodecRegistry) -> Result<Vec<u8>, CodecError> {
        let mut writer = BitWriter::new();
        variable.write_value(registry, &mut writer)?;
        Ok(writer.to_bytes())
    }

    /// Decodes a payload as `value_type`. The payload must be consumed
    /// exactly, apart from padding in its final byte.
    pub fn decode(
        payload: &[u8],
        value_type: &ValueType,
        registry: &CodecRegistry,
    ) -> Result<Box<dyn Any + Send + Sync>, CodecError> {
        let codec = registry.resolve(value_type)?;
        let mut reader = BitReader::new(payload);

        let value = codec
            .decode_any(&mut reader)
            .map_err(|error| CodecError::CorruptPayload {
                type_name: value_type.name(),
                detail: error.to_string(),
            })?;

        let trailing = reader.bits_remaining();
        if trailing >= 8 {
            return Err(CodecError::CorruptPayload {
                type_name: value_type.name(),
                detail: format!("{} unread bytes after value", trailing / 8),
            });
        }

        Ok(value)
    }

    pub fn encode_value<T: NetValue>(value: &T, registry: &CodecRegistry) -> Result<Vec<u8>, CodecError> {
        let mut writer = BitWriter::new();
        registry.encode_value(&mut writer, value)?;
        Ok(writer.to_bytes())
    }

    pub fn decode_value<T: NetValue>(payload: &[u8], registry: &CodecRegistry) -> Result<T, CodecError> {
        let value_type = ValueType::of::<T>();
        let value = Self::decode(payload, &value_type, registry)?;
        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| CodecError::TypeMismatch {
                expected: value_type.name(),
            })
    }
}
