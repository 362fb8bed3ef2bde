use std::collections::HashMap;

use log::warn;

use netvar_client::Client;
use netvar_shared::{Events, ObjectId, ObjectKind, PeerId};

/// Which object of one kind each peer has spawned, so a test can find "the
/// client's copy" of something the server spawned
pub struct InstanceDirectory {
    kind: ObjectKind,
    instances: HashMap<PeerId, ObjectId>,
}

impl InstanceDirectory {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            instances: HashMap::new(),
        }
    }

    /// Records the spawns and despawns a client just reported
    pub fn observe(&mut self, client: &Client, events: &Events) {
        let peer = client.local_peer_id();

        for object_id in events.spawns() {
            let Some(object) = client.object(object_id) else {
                continue;
            };
            if object.kind() != self.kind {
                continue;
            }
            if self.instances.contains_key(&peer) {
                warn!("{} is spawned but {} already has an instance", object_id, peer);
                continue;
            }
            self.instances.insert(peer, *object_id);
        }

        for object_id in events.despawns() {
            if self.instances.get(&peer) == Some(object_id) {
                self.instances.remove(&peer);
            }
        }
    }

    pub fn instance(&self, peer: &PeerId) -> Option<ObjectId> {
        self.instances.get(peer).copied()
    }

    pub fn reset(&mut self) {
        self.instances.clear();
    }
}
