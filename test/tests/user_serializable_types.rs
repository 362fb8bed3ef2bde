/// E2E tests for replicating user-defined value types through the codec
/// registry
use std::sync::Arc;

use netvar_server::NetvarServerError;
use netvar_shared::{
    CodecRegistry, ConfigurationIssue, PeerId, ReplicationError, SpawnError,
};
use netvar_test::{
    init_logging, protocol, register_my_type_one, InstanceDirectory, MyTypeOne, MyTypeThree,
    MyTypeTwo, MyTypeTwoCodec, TestNetwork,
};

const SERVER: PeerId = PeerId::SERVER;

fn client_peer() -> PeerId {
    PeerId::new(1)
}

#[test]
fn closure_codec_replicates_value() {
    init_logging();
    let test_protocol = protocol();
    let registry = CodecRegistry::new();
    register_my_type_one(&registry);
    registry.register_serde::<String>();

    let mut network = TestNetwork::new(test_protocol.protocol.clone(), Arc::new(registry), 1);
    let mut directory = InstanceDirectory::new(test_protocol.working);

    let server_object = network.server.spawn_object(test_protocol.working, None).unwrap();

    // wait for the client instance to be spawned
    let events = network.tick();
    directory.observe(network.client(&client_peer()), events.client(&client_peer()).unwrap());
    let client_object = directory.instance(&client_peer()).unwrap();
    assert_eq!(client_object, server_object);

    network
        .server
        .set(&server_object, test_protocol.working_value, MyTypeOne { value: 20 })
        .unwrap();
    let events = network.tick();

    assert!(!events.has_errors());
    assert!(events
        .client(&client_peer())
        .unwrap()
        .has_update(&client_object, test_protocol.working_value.slot()));
    let client_value = network
        .client(&client_peer())
        .get(&client_object, test_protocol.working_value)
        .unwrap();
    let server_value = network
        .server
        .get(&server_object, test_protocol.working_value)
        .unwrap();
    assert_eq!(client_value, server_value);
    assert_eq!(client_value.value, 20);
}

#[test]
fn codec_type_replicates_value() {
    init_logging();
    let test_protocol = protocol();
    let registry = CodecRegistry::new();
    registry.register_codec::<MyTypeTwo, _>(MyTypeTwoCodec);

    let mut network = TestNetwork::new(test_protocol.protocol.clone(), Arc::new(registry), 1);
    let mut directory = InstanceDirectory::new(test_protocol.codec_type);

    let server_object = network.server.spawn_object(test_protocol.codec_type, None).unwrap();
    let events = network.tick();
    directory.observe(network.client(&client_peer()), events.client(&client_peer()).unwrap());
    let client_object = directory.instance(&client_peer()).unwrap();

    network
        .server
        .set(&server_object, test_protocol.codec_type_value, MyTypeTwo { value: 20 })
        .unwrap();
    network.tick();

    let client_value = network
        .client(&client_peer())
        .get(&client_object, test_protocol.codec_type_value)
        .unwrap();
    assert_eq!(client_value.value, 20);
}

#[test]
fn unregistered_type_never_spawns() {
    init_logging();
    let test_protocol = protocol();
    let mut network =
        TestNetwork::new(test_protocol.protocol.clone(), netvar_test::standard_registry(), 1);
    let mut directory = InstanceDirectory::new(test_protocol.non_working);

    let result = network.server.spawn_object(test_protocol.non_working, None);

    match result {
        Err(NetvarServerError::Spawn(SpawnError::InvalidReplicationConfiguration {
            object,
            slot,
            issue: ConfigurationIssue::MissingSerializer { type_name },
        })) => {
            assert_eq!(object, "NonWorkingUserNetworkVariable");
            assert_eq!(slot, "value");
            assert_eq!(type_name, std::any::type_name::<MyTypeThree>());
        }
        _ => panic!("Expected InvalidReplicationConfiguration error"),
    }
    assert_eq!(network.server.objects_count(), 0);

    for events in network.tick_n(3) {
        assert!(!events.has_errors());
        directory.observe(network.client(&client_peer()), events.client(&client_peer()).unwrap());
    }
    assert!(directory.instance(&client_peer()).is_none());
    assert_eq!(network.client(&client_peer()).objects_count(), 0);
    assert_eq!(network.hub.pending(client_peer()), 0);
    assert_eq!(network.hub.pending(SERVER), 0);
}

#[test]
fn registering_after_a_failed_spawn_allows_the_next_one() {
    init_logging();
    let test_protocol = protocol();
    let registry = netvar_test::standard_registry();
    let mut network = TestNetwork::new(test_protocol.protocol.clone(), registry.clone(), 1);

    assert!(network.server.spawn_object(test_protocol.non_working, None).is_err());

    registry.register::<MyTypeThree, _, _>(
        |writer, value| netvar_shared::Serde::ser(&value.value, writer),
        |reader| {
            Ok(MyTypeThree {
                value: <i32 as netvar_shared::Serde>::de(reader)?,
            })
        },
    );
    let server_object = network.server.spawn_object(test_protocol.non_working, None).unwrap();
    network
        .server
        .set(&server_object, test_protocol.non_working_value, MyTypeThree { value: -4 })
        .unwrap();
    network.tick();

    let value = network
        .client(&client_peer())
        .get(&server_object, test_protocol.non_working_value)
        .unwrap();
    assert_eq!(value.value, -4);
}

#[test]
fn client_with_missing_codec_rejects_spawn() {
    init_logging();
    let test_protocol = protocol();

    // the server can encode MyTypeOne, the client's registry cannot decode it
    let server_registry = netvar_test::standard_registry();
    let mut network = TestNetwork::new(test_protocol.protocol.clone(), server_registry, 0);
    let client_registry = Arc::new(CodecRegistry::new());
    let (sender, receiver) = network.hub.endpoint(client_peer());
    network.clients.push(netvar_client::Client::new(
        netvar_client::ClientConfig::default(),
        test_protocol.protocol.clone(),
        client_registry,
        client_peer(),
        sender,
        receiver,
    ));
    network.server.connect_peer(client_peer()).unwrap();

    let server_object = network.server.spawn_object(test_protocol.working, None).unwrap();
    let events = network.tick();

    let client_events = events.client(&client_peer()).unwrap();
    assert!(client_events.spawns().is_empty());
    assert!(matches!(
        client_events.errors(),
        [ReplicationError::Spawn(SpawnError::InvalidReplicationConfiguration { .. })]
    ));
    assert!(!network.client(&client_peer()).has_object(&server_object));

    // later updates are dropped without further errors
    network
        .server
        .set(&server_object, test_protocol.working_value, MyTypeOne { value: 1 })
        .unwrap();
    let events = network.tick();
    assert!(!events.has_errors());
}
