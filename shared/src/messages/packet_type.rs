use netvar_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

/// Kind of message carried by a packet, read first so the receiver knows
/// how to decode the rest
#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub enum PacketType {
    // An object became visible, with its full replicated state
    Spawn,
    // An object was removed
    Despawn,
    // Changed slots of one object
    Delta,
}

impl PacketType {
    pub fn name(&self) -> &'static str {
        match self {
            PacketType::Spawn => "Spawn",
            PacketType::Despawn => "Despawn",
            PacketType::Delta => "Delta",
        }
    }
}

impl Serde for PacketType {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let index: u8 = match self {
            PacketType::Spawn => 0,
            PacketType::Despawn => 1,
            PacketType::Delta => 2,
        };
        writer.write_bit(index & 1 != 0);
        writer.write_bit(index & 2 != 0);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let low = reader.read_bit()? as u8;
        let high = reader.read_bit()? as u8;
        match low | (high << 1) {
            0 => Ok(PacketType::Spawn),
            1 => Ok(PacketType::Despawn),
            2 => Ok(PacketType::Delta),
            _ => Err(SerdeErr::OutOfRange {
                type_name: "PacketType",
            }),
        }
    }
}

impl ConstBitLength for PacketType {
    fn const_bit_length() -> u32 {
        2
    }
}
