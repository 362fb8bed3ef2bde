mod error;

pub use error::TransportError;

use crate::PeerId;

/// Outbound half of the transport. Sending must never block: a packet is
/// either accepted for delivery or rejected immediately.
pub trait PacketSender: Send + Sync {
    fn send(&self, peer: &PeerId, payload: &[u8]) -> Result<(), TransportError>;
}

/// Inbound half of the transport, polled once per tick. Packets arrive in
/// whatever order the underlying network delivers them.
pub trait PacketReceiver: Send {
    fn receive(&mut self) -> Result<Option<(PeerId, Vec<u8>)>, TransportError>;
}
