use netvar_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{delta::{DeltaMessage, SlotUpdate}, ObjectId, ObjectKind, PeerId};

/// Announces an object to a peer together with the value of every slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnMessage {
    pub object_id: ObjectId,
    pub kind: ObjectKind,
    pub owner: Option<PeerId>,
    pub state: Vec<SlotUpdate>,
}

impl Serde for SpawnMessage {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.object_id.ser(writer);
        self.kind.ser(writer);
        self.owner.ser(writer);
        DeltaMessage::write_updates(&self.state, writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let object_id = ObjectId::de(reader)?;
        let kind = ObjectKind::de(reader)?;
        let owner = Option::<PeerId>::de(reader)?;
        let state = DeltaMessage::read_updates(reader)?;
        Ok(Self {
            object_id,
            kind,
            owner,
            state,
        })
    }
}
