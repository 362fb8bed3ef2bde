//! # Netvar Shared
//! Replicated variables, codecs, and the delta pipeline shared between the
//! netvar-server & netvar-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use netvar_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr, UnsignedVariableInteger};

mod codec;
mod delta;
mod error;
mod events;
mod messages;
mod protocol;
mod transport;
mod types;
mod variable;
mod world;

pub use codec::{
    Codec, CodecError, CodecRegistry, FnCodec, NetValue, RawCodec, SerdeCodec, ValueType,
};
pub use delta::{DeltaCodec, DeltaMessage, SlotUpdate};
pub use error::ReplicationError;
pub use events::Events;
pub use messages::{Packet, PacketType, SpawnMessage};
pub use protocol::{ObjectSchema, Protocol, ProtocolError, SlotDef, VarKey};
pub use transport::{PacketReceiver, PacketSender, TransportError};
pub use types::{ObjectId, ObjectKind, PeerId, SlotIndex};
pub use variable::{AnyVariable, AuthorityRole, ReplicatedVariable, VariableError};
pub use world::{
    ConfigurationIssue, NetworkObject, OutgoingDelta, SpawnContext, SpawnError, SpawnGate,
    SpawnRecords, UpdateReceiver, UpdateSender,
};
