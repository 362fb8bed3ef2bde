use netvar_serde::{BitReader, BitWriter, Serde, SerdeErr};

use crate::{delta::DeltaMessage, ObjectId};

use super::{PacketType, SpawnMessage};

/// Everything a peer sends, one message per packet
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Packet {
    Spawn(SpawnMessage),
    Despawn(ObjectId),
    Delta(DeltaMessage),
}

impl Packet {
    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::Spawn(_) => PacketType::Spawn,
            Packet::Despawn(_) => PacketType::Despawn,
            Packet::Delta(_) => PacketType::Delta,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::new();
        self.packet_type().ser(&mut writer);
        match self {
            Packet::Spawn(message) => message.ser(&mut writer),
            Packet::Despawn(object_id) => object_id.ser(&mut writer),
            Packet::Delta(message) => message.ser(&mut writer),
        }
        writer.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerdeErr> {
        let mut reader = BitReader::new(bytes);
        let packet = match PacketType::de(&mut reader)? {
            PacketType::Spawn => Packet::Spawn(SpawnMessage::de(&mut reader)?),
            PacketType::Despawn => Packet::Despawn(ObjectId::de(&mut reader)?),
            PacketType::Delta => Packet::Delta(DeltaMessage::de(&mut reader)?),
        };
        Ok(packet)
    }
}
