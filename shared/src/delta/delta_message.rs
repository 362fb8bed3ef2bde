use netvar_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::{ObjectId, SlotIndex};

/// One slot's encoded value inside a delta message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotUpdate {
    pub slot: SlotIndex,
    pub payload: Vec<u8>,
}

impl SlotUpdate {
    pub fn new(slot: SlotIndex, payload: Vec<u8>) -> Self {
        Self { slot, payload }
    }
}

/// Every changed slot of one object for one tick.
///
/// Wire layout: object id, then for each update a continue bit, the slot
/// index, the payload length in bytes and the payload, closed by a `false`
/// continue bit. Payloads carry no type tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaMessage {
    object_id: ObjectId,
    updates: Vec<SlotUpdate>,
}

impl DeltaMessage {
    pub fn new(object_id: ObjectId) -> Self {
        Self {
            object_id,
            updates: Vec::new(),
        }
    }

    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    pub fn push(&mut self, slot: SlotIndex, payload: Vec<u8>) {
        self.updates.push(SlotUpdate::new(slot, payload));
    }

    pub fn updates(&self) -> &[SlotUpdate] {
        &self.updates
    }

    pub fn into_updates(self) -> Vec<SlotUpdate> {
        self.updates
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Writes only the update list, for embedding in other messages
    pub(crate) fn write_updates(updates: &[SlotUpdate], writer: &mut dyn BitWrite) {
        for update in updates {
            // continue bit
            true.ser(writer);
            UnsignedVariableInteger::<4>::new(update.slot).ser(writer);
            UnsignedVariableInteger::<5>::new(update.payload.len() as u64).ser(writer);
            writer.write_bytes(&update.payload);
        }
        // finish bit
        false.ser(writer);
    }

    pub(crate) fn read_updates(reader: &mut BitReader) -> Result<Vec<SlotUpdate>, SerdeErr> {
        let mut updates = Vec::new();
        loop {
            let update_continue = bool::de(reader)?;
            if !update_continue {
                break;
            }

            let slot = UnsignedVariableInteger::<4>::de(reader)?.get();
            let slot = SlotIndex::try_from(slot).map_err(|_| SerdeErr::OutOfRange {
                type_name: "SlotIndex",
            })?;
            let length = UnsignedVariableInteger::<5>::de(reader)?.to_usize()?;
            let payload = reader.read_bytes(length)?;

            updates.push(SlotUpdate::new(slot, payload));
        }
        Ok(updates)
    }
}

impl Serde for DeltaMessage {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.object_id.ser(writer);
        Self::write_updates(&self.updates, writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let object_id = ObjectId::de(reader)?;
        let updates = Self::read_updates(reader)?;
        Ok(Self { object_id, updates })
    }
}
