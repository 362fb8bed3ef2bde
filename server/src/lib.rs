//! # Netvar Server
//! The authoritative peer. Spawns objects, sends the changed variables of
//! each object to every client the object is spawned on, and applies the
//! owner-authoritative variables clients send back.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use netvar_shared::{
        AuthorityRole, BitReader, BitWrite, BitWriter, Codec, CodecRegistry, ObjectSchema,
        PacketReceiver, PacketSender, Protocol, Serde, SerdeErr, TransportError, VarKey,
    };
}

mod error;
mod server;

pub use error::NetvarServerError;
pub use netvar_shared::{Events, ObjectId, ObjectKind, PeerId, ReplicationError};
pub use server::{Server, ServerConfig};
