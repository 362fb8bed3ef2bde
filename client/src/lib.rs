//! # Netvar Client
//! A client that mirrors the objects a netvar server spawns on it, and sends
//! back the variables of the objects it owns.

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

mod client;
mod client_config;
mod error;

pub use client::Client;
pub use client_config::ClientConfig;
pub use error::NetvarClientError;
pub use netvar_shared::{Events, ObjectId, ObjectKind, PeerId, ReplicationError};
