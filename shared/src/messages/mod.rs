mod packet;
mod packet_type;
mod spawn_message;

pub use packet::Packet;
pub use packet_type::PacketType;
pub use spawn_message::SpawnMessage;
