/// E2E tests for spawns a client refuses to accept
use netvar_shared::{
    DeltaMessage, ObjectId, ObjectKind, Packet, PeerId, ReplicationError, SlotUpdate, SpawnError,
    SpawnMessage,
};
use netvar_test::{init_logging, protocol, standard_registry, MyTypeOne, TestNetwork};

fn client_peer() -> PeerId {
    PeerId::new(1)
}

#[test]
fn second_spawn_for_live_object_is_rejected() {
    init_logging();
    let test_protocol = protocol();
    let mut network = TestNetwork::new(test_protocol.protocol.clone(), standard_registry(), 1);
    let object_id = network.server.spawn_object(test_protocol.working, None).unwrap();
    network
        .server
        .set(&object_id, test_protocol.working_value, MyTypeOne { value: 20 })
        .unwrap();
    network.tick();

    let duplicate = SpawnMessage {
        object_id,
        kind: test_protocol.working,
        owner: None,
        state: vec![SlotUpdate::new(
            test_protocol.working_value.slot(),
            99_i32.to_le_bytes().to_vec(),
        )],
    };
    network
        .hub
        .inject(PeerId::SERVER, client_peer(), Packet::Spawn(duplicate).to_bytes());
    let events = network.client_mut(&client_peer()).receive();

    assert!(events.spawns().is_empty());
    assert_eq!(
        events.errors(),
        &[ReplicationError::Spawn(SpawnError::AlreadySpawned { object_id })]
    );
    let client = network.client(&client_peer());
    assert_eq!(client.object_ids(), vec![object_id]);
    assert_eq!(client.get(&object_id, test_protocol.working_value).unwrap().value, 20);
}

#[test]
fn spawn_of_unknown_kind_is_rejected() {
    init_logging();
    let test_protocol = protocol();
    let mut network = TestNetwork::new(test_protocol.protocol.clone(), standard_registry(), 1);
    let kind = ObjectKind::new(99);
    let object_id = ObjectId::new(42);

    let message = SpawnMessage {
        object_id,
        kind,
        owner: None,
        state: Vec::new(),
    };
    network
        .hub
        .inject(PeerId::SERVER, client_peer(), Packet::Spawn(message).to_bytes());
    let events = network.client_mut(&client_peer()).receive();

    assert!(events.spawns().is_empty());
    assert_eq!(
        events.errors(),
        &[ReplicationError::Spawn(SpawnError::UnknownKind { kind })]
    );
    let client = network.client(&client_peer());
    assert!(!client.has_object(&object_id));
    assert_eq!(client.objects_count(), 0);

    // updates for the rejected object are dropped
    let mut delta = DeltaMessage::new(object_id);
    delta.push(0, 1_i32.to_le_bytes().to_vec());
    network
        .hub
        .inject(PeerId::SERVER, client_peer(), Packet::Delta(delta).to_bytes());
    assert!(network.client_mut(&client_peer()).receive().is_empty());
}
