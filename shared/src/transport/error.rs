use thiserror::Error;

use crate::PeerId;

/// Errors reported by a transport implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport refused to take the packet; the caller may retry later
    #[error("Transport rejected packet for {peer}")]
    SendRejected { peer: PeerId },

    /// No route to the peer exists
    #[error("Transport has no route to {peer}")]
    UnknownPeer { peer: PeerId },

    /// The transport was shut down
    #[error("Transport is closed")]
    Closed,
}
