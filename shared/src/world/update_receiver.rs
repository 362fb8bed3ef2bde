use log::warn;

use crate::{
    codec::CodecRegistry,
    delta::{DeltaCodec, SlotUpdate},
    PeerId, ReplicationError, SlotIndex,
};

use super::NetworkObject;

/// Inbound half of the pipeline: decode each slot update and apply it.
///
/// Updates are applied in the order given, so the last update for a slot
/// wins. A bad update is reported and skipped without affecting the rest.
pub struct UpdateReceiver;

impl UpdateReceiver {
    /// Applies a delta sent by `sender`, which must hold authority over
    /// every slot it writes
    pub fn apply(
        object: &mut NetworkObject,
        updates: Vec<SlotUpdate>,
        sender: PeerId,
        registry: &CodecRegistry,
        errors: &mut Vec<ReplicationError>,
    ) -> Vec<SlotIndex> {
        Self::apply_inner(object, updates, Some(sender), registry, errors)
    }

    /// Applies the full state carried by a spawn message
    pub fn apply_initial_state(
        object: &mut NetworkObject,
        updates: Vec<SlotUpdate>,
        registry: &CodecRegistry,
        errors: &mut Vec<ReplicationError>,
    ) -> Vec<SlotIndex> {
        Self::apply_inner(object, updates, None, registry, errors)
    }

    fn apply_inner(
        object: &mut NetworkObject,
        updates: Vec<SlotUpdate>,
        sender: Option<PeerId>,
        registry: &CodecRegistry,
        errors: &mut Vec<ReplicationError>,
    ) -> Vec<SlotIndex> {
        let object_id = object.id();
        let owner = object.owner();
        let mut applied = Vec::with_capacity(updates.len());

        for SlotUpdate { slot, payload } in updates {
            let Some(variable) = object.slot_mut(slot) else {
                warn!("UpdateReceiver: {} has no slot {}", object_id, slot);
                errors.push(ReplicationError::UnknownSlot { object_id, slot });
                continue;
            };

            if let Some(sender) = sender {
                if !variable.authority().is_held_by(sender, owner) {
                    warn!(
                        "UpdateReceiver: {} wrote slot {} of {} without {} authority",
                        sender,
                        slot,
                        object_id,
                        variable.authority().name()
                    );
                    errors.push(ReplicationError::UnauthorizedUpdate {
                        peer: sender,
                        object_id,
                        slot,
                    });
                    continue;
                }
            }

            let result = DeltaCodec::decode(&payload, &variable.value_type(), registry)
                .and_then(|value| variable.apply_decoded(value));
            match result {
                Ok(()) => applied.push(slot),
                Err(source) => {
                    warn!("UpdateReceiver: dropping update for slot {} of {}: {}", slot, object_id, source);
                    errors.push(ReplicationError::Slot {
                        object_id,
                        slot,
                        source,
                    });
                }
            }
        }

        applied
    }
}
