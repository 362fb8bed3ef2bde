use thiserror::Error;

use netvar_serde::SerdeErr;

use crate::{
    codec::CodecError, messages::PacketType, transport::TransportError, world::SpawnError,
    ObjectId, PeerId, SlotIndex,
};

/// Every failure the replication pipeline can report. Per-slot failures are
/// collected rather than returned, so one bad slot never stalls the others.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// Encoding or decoding one slot failed
    #[error("Slot {slot} of {object_id}: {source}")]
    Slot {
        object_id: ObjectId,
        slot: SlotIndex,
        #[source]
        source: CodecError,
    },

    /// A peer wrote a slot whose authority it does not hold
    #[error("{peer} sent an update for slot {slot} of {object_id} without holding its authority")]
    UnauthorizedUpdate {
        peer: PeerId,
        object_id: ObjectId,
        slot: SlotIndex,
    },

    /// An update named a slot the object's schema does not declare
    #[error("{object_id} has no slot {slot}. Peers must build their Protocol identically")]
    UnknownSlot { object_id: ObjectId, slot: SlotIndex },

    /// A packet could not be parsed at all
    #[error("Malformed packet from {peer}: {source}")]
    MalformedPacket {
        peer: PeerId,
        #[source]
        source: SerdeErr,
    },

    /// A well-formed packet that the receiving side never accepts
    #[error("Unexpected {} packet from {peer}", packet_type.name())]
    UnexpectedPacket { peer: PeerId, packet_type: PacketType },

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
