mod delta_codec;
mod delta_message;

pub use delta_codec::DeltaCodec;
pub use delta_message::{DeltaMessage, SlotUpdate};
