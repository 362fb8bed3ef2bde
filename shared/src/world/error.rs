use thiserror::Error;

use crate::{ObjectId, ObjectKind, PeerId};

/// Why a slot cannot replicate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationIssue {
    /// The slot's type has no user codec and no built-in fallback
    #[error("no serializer registered for type '{type_name}'")]
    MissingSerializer { type_name: &'static str },

    /// An `Owner` slot on an object spawned without an owner
    #[error("slot is owner-authoritative but the object has no owner")]
    OwnerAuthorityWithoutOwner,

    /// An `Owner` slot while the Protocol forbids client authority
    #[error("slot is owner-authoritative but client-authoritative variables are not enabled in the Protocol")]
    ClientAuthorityDisabled,
}

/// Errors that prevent an object from spawning. A failed spawn leaves no
/// trace on any peer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// A replicated slot on the object cannot be replicated as declared
    #[error("Invalid replication configuration for object '{object}', slot '{slot}': {issue}")]
    InvalidReplicationConfiguration {
        object: &'static str,
        slot: &'static str,
        issue: ConfigurationIssue,
    },

    /// The kind is not part of the Protocol
    #[error("Object {kind} is not registered with the Protocol")]
    UnknownKind { kind: ObjectKind },

    /// The requested owner is not connected
    #[error("Cannot assign {owner} as owner: peer is not connected")]
    OwnerNotConnected { owner: PeerId },

    /// A spawn arrived for an object that already exists locally
    #[error("{object_id} is already spawned")]
    AlreadySpawned { object_id: ObjectId },
}
