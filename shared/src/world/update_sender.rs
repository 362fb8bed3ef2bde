use log::warn;

use crate::{
    codec::CodecRegistry,
    delta::{DeltaCodec, DeltaMessage, SlotUpdate},
    ReplicationError, SlotIndex,
};

use super::NetworkObject;

/// A batched delta ready to hand to the transport, and the slots it covers
pub struct OutgoingDelta {
    pub message: DeltaMessage,
    pub included: Vec<SlotIndex>,
}

/// Outbound half of the pipeline: collect dirty slots, batch them into one
/// message per object, and clear them once the message was handed off
pub struct UpdateSender;

impl UpdateSender {
    /// Encodes every dirty slot the local peer has authority over into one
    /// message. A slot that fails to encode is reported and stays dirty; the
    /// others are still sent.
    pub fn collect(
        object: &NetworkObject,
        registry: &CodecRegistry,
        errors: &mut Vec<ReplicationError>,
    ) -> Option<OutgoingDelta> {
        let mut message = DeltaMessage::new(object.id());
        let mut included = Vec::new();

        for slot in object.dirty_slots() {
            let Some(variable) = object.slot(slot) else {
                continue;
            };
            match DeltaCodec::encode(variable, registry) {
                Ok(payload) => {
                    message.push(slot, payload);
                    included.push(slot);
                }
                Err(source) => {
                    warn!("UpdateSender: cannot encode slot {} of {}: {}", slot, object.id(), source);
                    errors.push(ReplicationError::Slot {
                        object_id: object.id(),
                        slot,
                        source,
                    });
                }
            }
        }

        if message.is_empty() {
            return None;
        }
        Some(OutgoingDelta { message, included })
    }

    /// Encodes every slot regardless of dirtiness, for spawn messages
    pub fn full_state(
        object: &NetworkObject,
        registry: &CodecRegistry,
        errors: &mut Vec<ReplicationError>,
    ) -> Vec<SlotUpdate> {
        let mut state = Vec::with_capacity(object.slot_count());
        for index in 0..object.slot_count() {
            let slot = index as SlotIndex;
            let Some(variable) = object.slot(slot) else {
                continue;
            };
            match DeltaCodec::encode(variable, registry) {
                Ok(payload) => state.push(SlotUpdate::new(slot, payload)),
                Err(source) => {
                    warn!("UpdateSender: cannot encode spawn state slot {} of {}: {}", slot, object.id(), source);
                    errors.push(ReplicationError::Slot {
                        object_id: object.id(),
                        slot,
                        source,
                    });
                }
            }
        }
        state
    }

    /// Clears dirty flags after the message carrying `included` was accepted
    pub fn commit(object: &mut NetworkObject, included: &[SlotIndex]) {
        for slot in included {
            if let Some(variable) = object.slot_mut(*slot) {
                variable.clear_dirty();
            }
        }
    }
}
