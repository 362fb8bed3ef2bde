mod value_codec;
mod error;
mod registry;
mod value_type;

pub use value_codec::{Codec, FnCodec, NetValue, RawCodec, SerdeCodec};
pub(crate) use value_codec::ErasedCodec;
pub use error::CodecError;
pub use registry::CodecRegistry;
pub use value_type::ValueType;
