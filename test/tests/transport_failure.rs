/// E2E tests for transports that refuse packets
use netvar_shared::{PeerId, ReplicationError, TransportError};
use netvar_test::{init_logging, protocol, standard_registry, MyTypeOne, TestNetwork};

fn client_peer() -> PeerId {
    PeerId::new(1)
}

#[test]
fn rejected_delta_keeps_dirty_flags_and_retries() {
    init_logging();
    let test_protocol = protocol();
    let mut network = TestNetwork::new(test_protocol.protocol.clone(), standard_registry(), 1);
    let object_id = network.server.spawn_object(test_protocol.working, None).unwrap();
    network.tick();

    let key = test_protocol.working_value;
    network.server.set(&object_id, key, MyTypeOne { value: 20 }).unwrap();
    network.hub.reject_sends_from(PeerId::SERVER, true);
    let events = network.tick();

    assert!(matches!(
        events.server.errors(),
        [ReplicationError::Transport(TransportError::SendRejected { .. })]
    ));
    assert!(network.server.object(&object_id).unwrap().has_dirty_slots());
    assert_eq!(network.client(&client_peer()).get(&object_id, key).unwrap().value, 0);

    network.hub.reject_sends_from(PeerId::SERVER, false);
    let events = network.tick();

    assert!(!events.has_errors());
    assert!(!network.server.object(&object_id).unwrap().has_dirty_slots());
    assert_eq!(network.client(&client_peer()).get(&object_id, key).unwrap().value, 20);
}

#[test]
fn one_rejecting_peer_keeps_the_delta_pending_for_all() {
    init_logging();
    let test_protocol = protocol();
    let mut network = TestNetwork::new(test_protocol.protocol.clone(), standard_registry(), 2);
    let object_id = network.server.spawn_object(test_protocol.working, None).unwrap();
    network.tick();

    // peer 2 leaves the hub: sends to it now fail
    network.hub.close_inbox(PeerId::new(2));
    network
        .server
        .set(&object_id, test_protocol.working_value, MyTypeOne { value: 7 })
        .unwrap();
    let events = network.tick();

    assert!(events.server.errors().iter().any(|error| matches!(
        error,
        ReplicationError::Transport(TransportError::UnknownPeer { .. })
    )));
    assert!(network.server.object(&object_id).unwrap().has_dirty_slots());
    // peer 1 got the value anyway
    assert_eq!(
        network
            .client(&client_peer())
            .get(&object_id, test_protocol.working_value)
            .unwrap()
            .value,
        7
    );

    network.server.disconnect_peer(&PeerId::new(2)).unwrap();
    let events = network.tick();
    assert!(!events.has_errors());
    assert!(!network.server.object(&object_id).unwrap().has_dirty_slots());
}

#[test]
fn rejected_spawn_is_retried_next_tick() {
    init_logging();
    let test_protocol = protocol();
    let mut network = TestNetwork::new(test_protocol.protocol.clone(), standard_registry(), 1);

    network.hub.reject_sends_from(PeerId::SERVER, true);
    let object_id = network.server.spawn_object(test_protocol.working, None).unwrap();
    let events = network.tick();

    assert!(events.server.has_errors());
    assert!(!network.server.is_spawned_on(&object_id, &client_peer()));
    assert!(!network.client(&client_peer()).has_object(&object_id));

    network.hub.reject_sends_from(PeerId::SERVER, false);
    let events = network.tick();

    assert_eq!(events.client(&client_peer()).unwrap().spawns(), &[object_id]);
    assert!(network.server.is_spawned_on(&object_id, &client_peer()));
    assert!(network.client(&client_peer()).has_object(&object_id));
}

#[test]
fn rejected_client_update_is_retried() {
    init_logging();
    let test_protocol = protocol();
    let mut network = TestNetwork::new(test_protocol.protocol.clone(), standard_registry(), 1);
    let object_id = network
        .server
        .spawn_object(test_protocol.avatar, Some(client_peer()))
        .unwrap();
    network.tick();

    network.hub.reject_sends_from(client_peer(), true);
    network
        .client_mut(&client_peer())
        .set(&object_id, test_protocol.avatar_input, 9)
        .unwrap();
    network.tick();
    assert_eq!(*network.server.get(&object_id, test_protocol.avatar_input).unwrap(), 0);

    network.hub.reject_sends_from(client_peer(), false);
    let events = network.tick();

    // the failure from the previous tick is reported on this one
    let client_events = events.client(&client_peer()).unwrap();
    assert!(matches!(
        client_events.errors(),
        [ReplicationError::Transport(TransportError::SendRejected { .. })]
    ));
    assert_eq!(*network.server.get(&object_id, test_protocol.avatar_input).unwrap(), 9);
}

#[test]
fn closed_transport_is_reported() {
    init_logging();
    let test_protocol = protocol();
    let mut network = TestNetwork::new(test_protocol.protocol.clone(), standard_registry(), 1);

    network.hub.close();
    let mut events = network.server.receive();

    assert_eq!(
        events.take_errors(),
        vec![ReplicationError::Transport(TransportError::Closed)]
    );
    assert!(events.is_empty());
}
