use thiserror::Error;

use netvar_shared::{ObjectId, PeerId, SpawnError, VariableError};

/// Errors returned directly by `Server` calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetvarServerError {
    /// The object was never spawned or has been despawned
    #[error("{object_id} does not exist on the Server")]
    ObjectNotFound { object_id: ObjectId },

    /// `connect_peer` was called twice for the same peer
    #[error("{peer} is already connected")]
    PeerAlreadyConnected { peer: PeerId },

    /// The peer was never connected or has disconnected
    #[error("{peer} is not connected")]
    PeerNotConnected { peer: PeerId },

    /// `PeerId::SERVER` names the Server itself and cannot connect as a client
    #[error("{peer} is reserved for the Server")]
    ReservedPeer { peer: PeerId },

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error(transparent)]
    Variable(#[from] VariableError),
}
