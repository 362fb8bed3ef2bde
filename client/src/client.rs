use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use log::{debug, info, warn};

use netvar_shared::{
    CodecRegistry, Events, NetValue, NetworkObject, ObjectId, OutgoingDelta, Packet,
    PacketReceiver, PacketSender, PeerId, Protocol, ReplicationError, SpawnContext, SpawnError,
    SpawnGate, SpawnMessage, SpawnRecords, UpdateReceiver, UpdateSender, VarKey,
};

use crate::{ClientConfig, NetvarClientError};

/// A client that mirrors the objects spawned on it by the Server. It may
/// write only the owner-authoritative variables of objects it owns.
pub struct Client {
    config: ClientConfig,
    protocol: Protocol,
    registry: Arc<CodecRegistry>,
    local_peer: PeerId,
    sender: Box<dyn PacketSender>,
    receiver: Box<dyn PacketReceiver>,
    objects: HashMap<ObjectId, NetworkObject>,
    records: SpawnRecords,
    // Object ids are never reused, so a despawned id stays dead even if its
    // spawn arrives afterwards
    despawned: HashSet<ObjectId>,
    pending_errors: Vec<ReplicationError>,
}

impl Client {
    /// Create a new Client, identified to the Server as `local_peer`. The
    /// Protocol is locked from here on.
    pub fn new(
        client_config: ClientConfig,
        mut protocol: Protocol,
        registry: Arc<CodecRegistry>,
        local_peer: PeerId,
        sender: Box<dyn PacketSender>,
        receiver: Box<dyn PacketReceiver>,
    ) -> Self {
        protocol.ensure_locked();

        Self {
            config: client_config,
            protocol,
            registry,
            local_peer,
            sender,
            receiver,
            objects: HashMap::new(),
            records: SpawnRecords::new(),
            despawned: HashSet::new(),
            pending_errors: Vec::new(),
        }
    }

    pub fn local_peer_id(&self) -> PeerId {
        self.local_peer
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    // Objects

    pub fn has_object(&self, object_id: &ObjectId) -> bool {
        self.records.contains(object_id, &PeerId::SERVER)
    }

    pub fn object(&self, object_id: &ObjectId) -> Option<&NetworkObject> {
        self.objects.get(object_id)
    }

    /// Objects spawned on this Client, in ascending order
    pub fn object_ids(&self) -> Vec<ObjectId> {
        let mut object_ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        object_ids.sort();
        object_ids
    }

    pub fn objects_count(&self) -> usize {
        self.objects.len()
    }

    pub fn get<T: NetValue>(
        &self,
        object_id: &ObjectId,
        key: VarKey<T>,
    ) -> Result<&T, NetvarClientError> {
        let object = self
            .objects
            .get(object_id)
            .ok_or(NetvarClientError::ObjectNotFound {
                object_id: *object_id,
            })?;
        Ok(object.get(key)?)
    }

    /// Writes an owner-authoritative variable of an object this Client owns.
    /// Anything else fails with `VariableError::AuthorityViolation`.
    pub fn set<T: NetValue>(
        &mut self,
        object_id: &ObjectId,
        key: VarKey<T>,
        value: T,
    ) -> Result<(), NetvarClientError> {
        let object = self
            .objects
            .get_mut(object_id)
            .ok_or(NetvarClientError::ObjectNotFound {
                object_id: *object_id,
            })?;
        object.set(key, value)?;
        Ok(())
    }

    // Sending

    /// Sends one delta to the Server for each owned object with changed
    /// variables. Dirty flags stay set if the transport refuses the packet,
    /// and the failure is reported by the next `receive()`.
    pub fn send_all_updates(&mut self) {
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
            match self.sender.send(&PeerId::SERVER, &payload) {
                Ok(()) => UpdateSender::commit(object, &included),
                Err(error) => {
                    warn!(
                        "Client Error: cannot send update of {}, retrying next tick: {}",
                        object_id, error
                    );
                    self.pending_errors.push(error.into());
                }
            }
        }
    }

    // Receiving

    /// Drains the transport, applying spawns, despawns and updates sent by
    /// the Server. Also reports failures from the last `send_all_updates()`.
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
                    warn!("Client Error: cannot receive from transport: {}", error);
                    events.push_error(error.into());
                    break;
                }
            }
        }

        events
    }

    fn read_packet(&mut self, peer: PeerId, payload: &[u8], events: &mut Events) {
        let packet = match Packet::from_bytes(payload) {
            Ok(packet) => packet,
            Err(source) => {
                warn!("Client Error: cannot read malformed packet from {}: {}", peer, source);
                events.push_error(ReplicationError::MalformedPacket { peer, source });
                return;
            }
        };

        if !peer.is_server() {
            let packet_type = packet.packet_type();
            warn!(
                "Client Error: received {} packet from {}, only the Server may send to clients",
                packet_type.name(),
                peer
            );
            events.push_error(ReplicationError::UnexpectedPacket { peer, packet_type });
            return;
        }

        match packet {
            Packet::Spawn(message) => self.read_spawn(message, events),
            Packet::Despawn(object_id) => self.read_despawn(object_id, events),
            Packet::Delta(message) => {
                let object_id = message.object_id();
                if !self.records.contains(&object_id, &PeerId::SERVER) {
                    debug!("Client: dropping update for unspawned {}", object_id);
                    return;
                }
                let Some(object) = self.objects.get_mut(&object_id) else {
                    return;
                };

                let mut errors = Vec::new();
                let applied = UpdateReceiver::apply(
                    object,
                    message.into_updates(),
                    PeerId::SERVER,
                    &self.registry,
                    &mut errors,
                );
                for slot in applied {
                    events.push_update(object_id, slot);
                }
                events.extend_errors(errors);
            }
        }
    }

    /// Runs the spawn gate locally before accepting the object. A rejected
    /// spawn leaves no record, so later updates for it are dropped. Spawns
    /// of already despawned objects are ignored.
    fn read_spawn(&mut self, message: SpawnMessage, events: &mut Events) {
        let SpawnMessage {
            object_id,
            kind,
            owner,
            state,
        } = message;

        if self.despawned.contains(&object_id) {
            debug!("Client: dropping late spawn for despawned {}", object_id);
            return;
        }

        if self.records.contains(&object_id, &PeerId::SERVER) {
            warn!("Client Error: received second spawn for {}", object_id);
            events.push_error(SpawnError::AlreadySpawned { object_id }.into());
            return;
        }

        let Some(schema) = self.protocol.schema(&kind) else {
            warn!("Client Error: received spawn of {} with unknown {}", object_id, kind);
            events.push_error(SpawnError::UnknownKind { kind }.into());
            return;
        };

        let context = SpawnContext {
            owner,
            client_authority_enabled: self.protocol.client_authoritative_variables,
        };
        if let Err(error) = SpawnGate::check(schema, &context, &self.registry) {
            events.push_error(error.into());
            return;
        }

        let mut object = NetworkObject::instantiate(schema, object_id, kind, owner, self.local_peer);
        let mut errors = Vec::new();
        UpdateReceiver::apply_initial_state(&mut object, state, &self.registry, &mut errors);
        events.extend_errors(errors);

        info!("Client: spawned {} as {}", schema.name(), object_id);
        self.objects.insert(object_id, object);
        self.records.insert(object_id, PeerId::SERVER);
        events.push_spawn(object_id);
    }

    fn read_despawn(&mut self, object_id: ObjectId, events: &mut Events) {
        self.despawned.insert(object_id);
        if !self.records.remove(&object_id, &PeerId::SERVER) {
            debug!("Client: despawn arrived before spawn of {}", object_id);
            return;
        }
        self.objects.remove(&object_id);
        info!("Client: despawned {}", object_id);
        events.push_despawn(object_id);
    }
}
