use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use log::{debug, info, warn};

use netvar_shared::{
    CodecRegistry, Events, NetValue, NetworkObject, ObjectId, ObjectKind, OutgoingDelta, Packet,
    PacketReceiver, PacketSender, PeerId, Protocol, ReplicationError, SpawnContext, SpawnError,
    SpawnGate, SpawnMessage, SpawnRecords, UpdateReceiver, UpdateSender, VarKey,
};

use crate::{NetvarServerError, ServerConfig};

/// A server that spawns replicated objects and keeps their variables in
/// sync with every connected client
pub struct Server {
    config: ServerConfig,
    protocol: Protocol,
    registry: Arc<CodecRegistry>,
    sender: Box<dyn PacketSender>,
    receiver: Box<dyn PacketReceiver>,
    peers: BTreeSet<PeerId>,
    objects: HashMap<ObjectId, NetworkObject>,
    records: SpawnRecords,
    next_object_id: u64,
    pending_despawns: Vec<(ObjectId, PeerId)>,
    pending_errors: Vec<ReplicationError>,
}

impl Server {
    /// Create a new Server. The Protocol is locked from here on.
    pub fn new(
        server_config: ServerConfig,
        mut protocol: Protocol,
        registry: Arc<CodecRegistry>,
        sender: Box<dyn PacketSender>,
        receiver: Box<dyn PacketReceiver>,
    ) -> Self {
        protocol.ensure_locked();

        Self {
            config: server_config,
            protocol,
            registry,
            sender,
            receiver,
            peers: BTreeSet::new(),
            objects: HashMap::new(),
            records: SpawnRecords::new(),
            next_object_id: 1,
            pending_despawns: Vec::new(),
            pending_errors: Vec::new(),
        }
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn registry(&self) -> &Arc<CodecRegistry> {
        &self.registry
    }

    /// The duration between calls to `send_all_updates()` the Protocol asks for
    pub fn tick_interval(&self) -> Duration {
        self.protocol.tick_interval
    }

    // Peers

    /// Registers a client. Every live object is spawned on it during the
    /// next `send_all_updates()`.
    pub fn connect_peer(&mut self, peer: PeerId) -> Result<(), NetvarServerError> {
        if peer.is_server() {
            return Err(NetvarServerError::ReservedPeer { peer });
        }
        if !self.peers.insert(peer) {
            return Err(NetvarServerError::PeerAlreadyConnected { peer });
        }
        info!("Server: {} connected", peer);
        Ok(())
    }

    pub fn disconnect_peer(&mut self, peer: &PeerId) -> Result<(), NetvarServerError> {
        if !self.peers.remove(peer) {
            return Err(NetvarServerError::PeerNotConnected { peer: *peer });
        }
        let visible = self.records.remove_peer(peer);
        self.pending_despawns.retain(|(_, target)| target != peer);
        info!("Server: {} disconnected with {} objects spawned on it", peer, visible.len());

        if self.config.despawn_owned_objects_on_disconnect {
            let mut owned: Vec<ObjectId> = self
                .objects
                .values()
                .filter(|object| object.owner() == Some(*peer))
                .map(|object| object.id())
                .collect();
            owned.sort();
            for object_id in owned {
                self.despawn_object(&object_id)?;
            }
        }
        Ok(())
    }

    pub fn is_connected(&self, peer: &PeerId) -> bool {
        self.peers.contains(peer)
    }

    /// Connected peers, in ascending order
    pub fn peer_ids(&self) -> Vec<PeerId> {
        self.peers.iter().copied().collect()
    }

    pub fn peers_count(&self) -> usize {
        self.peers.len()
    }

    // Objects

    /// Spawns an object of `kind`, optionally owned by a connected peer.
    ///
    /// Every slot of the object must be replicable as declared; otherwise the
    /// spawn fails with `SpawnError::InvalidReplicationConfiguration` and no
    /// state is created anywhere.
    pub fn spawn_object(
        &mut self,
        kind: ObjectKind,
        owner: Option<PeerId>,
    ) -> Result<ObjectId, NetvarServerError> {
        let schema = self
            .protocol
            .schema(&kind)
            .ok_or(SpawnError::UnknownKind { kind })?;

        if let Some(owner) = owner {
            if !self.peers.contains(&owner) {
                return Err(SpawnError::OwnerNotConnected { owner }.into());
            }
        }

        let context = SpawnContext {
            owner,
            client_authority_enabled: self.protocol.client_authoritative_variables,
        };
        SpawnGate::check(schema, &context, &self.registry)?;

        let object_id = ObjectId::new(self.next_object_id);
        self.next_object_id += 1;

        let object = NetworkObject::instantiate(schema, object_id, kind, owner, PeerId::SERVER);
        info!("Server: spawned {} as {}", schema.name(), object_id);
        self.objects.insert(object_id, object);

        Ok(object_id)
    }

    /// Removes the object. Peers it was spawned on are told during the next
    /// `send_all_updates()`, and anything they still send for it is dropped.
    pub fn despawn_object(&mut self, object_id: &ObjectId) -> Result<(), NetvarServerError> {
        if self.objects.remove(object_id).is_none() {
            return Err(NetvarServerError::ObjectNotFound {
                object_id: *object_id,
            });
        }
        for peer in self.records.remove_object(object_id) {
            self.pending_despawns.push((*object_id, peer));
        }
        info!("Server: despawned {}", object_id);
        Ok(())
    }

    pub fn object_exists(&self, object_id: &ObjectId) -> bool {
        self.objects.contains_key(object_id)
    }

    pub fn object(&self, object_id: &ObjectId) -> Option<&NetworkObject> {
        self.objects.get(object_id)
    }

    /// Live objects, in ascending order
    pub fn object_ids(&self) -> Vec<ObjectId> {
        let mut object_ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        object_ids.sort();
        object_ids
    }

    pub fn objects_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether the spawn of the object has been handed to the peer's transport
    pub fn is_spawned_on(&self, object_id: &ObjectId, peer: &PeerId) -> bool {
        self.records.contains(object_id, peer)
    }

    pub fn get<T: NetValue>(
        &self,
        object_id: &ObjectId,
        key: VarKey<T>,
    ) -> Result<&T, NetvarServerError> {
        Ok(self.object_ref(object_id)?.get(key)?)
    }

    /// Writes a server-authoritative variable. It is sent during the next
    /// `send_all_updates()`.
    pub fn set<T: NetValue>(
        &mut self,
        object_id: &ObjectId,
        key: VarKey<T>,
        value: T,
    ) -> Result<(), NetvarServerError> {
        self.object_mut(object_id)?.set(key, value)?;
        Ok(())
    }

    fn object_ref(&self, object_id: &ObjectId) -> Result<&NetworkObject, NetvarServerError> {
        self.objects
            .get(object_id)
            .ok_or(NetvarServerError::ObjectNotFound {
                object_id: *object_id,
            })
    }

    fn object_mut(&mut self, object_id: &ObjectId) -> Result<&mut NetworkObject, NetvarServerError> {
        self.objects
            .get_mut(object_id)
            .ok_or(NetvarServerError::ObjectNotFound {
                object_id: *object_id,
            })
    }

    // Sending

    /// Sends pending despawns, spawns and every changed variable to the
    /// connected peers. If you don't call this method, the Server will never
    /// communicate with its clients.
    ///
    /// Failures are reported by the next call to `receive()`. Nothing that
    /// failed to send is lost: it is sent again on the next call.
    pub fn send_all_updates(&mut self) {
        self.send_despawns();
        let fresh_spawns = self.send_spawns();
        self.send_deltas(&fresh_spawns);
    }

    fn send_despawns(&mut self) {
        let pending = std::mem::take(&mut self.pending_despawns);
        for (object_id, peer) in pending {
            let payload = Packet::Despawn(object_id).to_bytes();
            if let Err(error) = self.sender.send(&peer, &payload) {
                warn!("Server Error: cannot send despawn of {} to {}: {}", object_id, peer, error);
                self.pending_errors.push(error.into());
                self.pending_despawns.push((object_id, peer));
            }
        }
    }

    /// Spawns every live object on every peer that does not have it yet.
    /// Returns the spawns handed off by this call.
    fn send_spawns(&mut self) -> HashSet<(ObjectId, PeerId)> {
        let mut fresh_spawns = HashSet::new();

        // shuffle order of peers in order to avoid priority among them
        let mut peers: Vec<PeerId> = self.peers.iter().copied().collect();
        fastrand::shuffle(&mut peers);

        for object_id in self.object_ids() {
            let Some(object) = self.objects.get(&object_id) else {
                continue;
            };
            let targets: Vec<PeerId> = peers
                .iter()
                .filter(|peer| !self.records.contains(&object_id, peer))
                .copied()
                .collect();
            if targets.is_empty() {
                continue;
            }

            let message = SpawnMessage {
                object_id,
                kind: object.kind(),
                owner: object.owner(),
                state: UpdateSender::full_state(object, &self.registry, &mut self.pending_errors),
            };
            let payload = Packet::Spawn(message).to_bytes();

            for peer in targets {
                match self.sender.send(&peer, &payload) {
                    Ok(()) => {
                        info!("Server: spawned {} on {}", object_id, peer);
                        self.records.insert(object_id, peer);
                        fresh_spawns.insert((object_id, peer));
                    }
                    Err(error) => {
                        warn!(
                            "Server Error: cannot send spawn of {} to {}, retrying next tick: {}",
                            object_id, peer, error
                        );
                        self.pending_errors.push(error.into());
                    }
                }
            }
        }

        fresh_spawns
    }

    /// Sends one delta per object with dirty variables. Dirty flags are only
    /// cleared once every peer the object is spawned on took the delta.
    fn send_deltas(&mut self, fresh_spawns: &HashSet<(ObjectId, PeerId)>) {
        for object_id in self.object_ids() {
            let Some(object) = self.objects.get_mut(&object_id) else {
                continue;
            };
            if !object.has_dirty_slots() {
                continue;
            }
            let Some(OutgoingDelta { message, included }) =
                UpdateSender::collect(object, &self.registry, &mut self.pending_errors)
            else {
                continue;
            };
            let payload = Packet::Delta(message).to_bytes();

            let mut delivered = true;
            for peer in self.records.peers_for(&object_id) {
                // the spawn already carried the current values
                if fresh_spawns.contains(&(object_id, peer)) {
                    continue;
                }
                if let Err(error) = self.sender.send(&peer, &payload) {
                    warn!(
                        "Server Error: cannot send update of {} to {}, retrying next tick: {}",
                        object_id, peer, error
                    );
                    self.pending_errors.push(error.into());
                    delivered = false;
                }
            }

            if delivered {
                UpdateSender::commit(object, &included);
            }
        }
    }

    // Receiving

    /// Drains the transport, applying owner-authoritative updates sent by
    /// clients. Also reports failures from the last `send_all_updates()`.
    pub fn receive(&mut self) -> Events {
        let mut events = Events::new();
        events.extend_errors(std::mem::take(&mut self.pending_errors));

        for _ in 0..self.config.max_receive_per_tick {
            match self.receiver.receive() {
                Ok(Some((peer, payload))) => self.read_packet(peer, &payload, &mut events),
                Ok(None) => {
                    // No more packets, break loop
                    break;
                }
                Err(error) => {
                    warn!("Server Error: cannot receive from transport: {}", error);
                    events.push_error(error.into());
                    break;
                }
            }
        }

        events
    }

    fn read_packet(&mut self, peer: PeerId, payload: &[u8], events: &mut Events) {
        if !self.peers.contains(&peer) {
            debug!("Server: dropping packet from unknown {}", peer);
            return;
        }

        let packet = match Packet::from_bytes(payload) {
            Ok(packet) => packet,
            Err(source) => {
                warn!("Server Error: cannot read malformed packet from {}: {}", peer, source);
                events.push_error(ReplicationError::MalformedPacket { peer, source });
                return;
            }
        };

        match packet {
            Packet::Delta(message) => {
                let object_id = message.object_id();
                if !self.records.contains(&object_id, &peer) {
                    debug!("Server: dropping update for {}, not spawned on {}", object_id, peer);
                    return;
                }
                let Some(object) = self.objects.get_mut(&object_id) else {
                    debug!("Server: dropping update for despawned {}", object_id);
                    return;
                };

                let mut errors = Vec::new();
                let applied = UpdateReceiver::apply(
                    object,
                    message.into_updates(),
                    peer,
                    &self.registry,
                    &mut errors,
                );
                for slot in applied {
                    events.push_update(object_id, slot);
                }
                events.extend_errors(errors);
            }
            other => {
                let packet_type = other.packet_type();
                warn!(
                    "Server Error: {} sent a {} packet, which only clients receive",
                    peer,
                    packet_type.name()
                );
                events.push_error(ReplicationError::UnexpectedPacket { peer, packet_type });
            }
        }
    }
}
