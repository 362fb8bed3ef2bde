use std::collections::BTreeSet;

use crate::{ObjectId, PeerId};

/// Which objects exist on which peers. Inbound deltas are only applied to
/// objects with a record; everything else is dropped.
#[derive(Default)]
pub struct SpawnRecords {
    records: BTreeSet<(ObjectId, PeerId)>,
}

impl SpawnRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the record already existed
    pub fn insert(&mut self, object_id: ObjectId, peer: PeerId) -> bool {
        self.records.insert((object_id, peer))
    }

    pub fn remove(&mut self, object_id: &ObjectId, peer: &PeerId) -> bool {
        self.records.remove(&(*object_id, *peer))
    }

    pub fn contains(&self, object_id: &ObjectId, peer: &PeerId) -> bool {
        self.records.contains(&(*object_id, *peer))
    }

    /// Peers the object is spawned on, in ascending order
    pub fn peers_for(&self, object_id: &ObjectId) -> Vec<PeerId> {
        self.records
            .range((*object_id, PeerId::new(0))..=(*object_id, PeerId::new(u64::MAX)))
            .map(|(_, peer)| *peer)
            .collect()
    }

    /// Removes every record of the object, returning the peers it was on
    pub fn remove_object(&mut self, object_id: &ObjectId) -> Vec<PeerId> {
        let peers = self.peers_for(object_id);
        for peer in &peers {
            self.records.remove(&(*object_id, *peer));
        }
        peers
    }

    /// Removes every record held for the peer, returning the objects
    pub fn remove_peer(&mut self, peer: &PeerId) -> Vec<ObjectId> {
        let objects: Vec<ObjectId> = self
            .records
            .iter()
            .filter(|(_, record_peer)| record_peer == peer)
            .map(|(object_id, _)| *object_id)
            .collect();
        for object_id in &objects {
            self.records.remove(&(*object_id, *peer));
        }
        objects
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
