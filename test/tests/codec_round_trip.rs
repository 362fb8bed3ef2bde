/// Property tests: every registered codec round-trips, and one send/receive
/// cycle makes the mirror equal the authoritative value
use proptest::prelude::*;

use netvar_shared::{CodecRegistry, DeltaCodec, PeerId};
use netvar_test::{
    protocol, register_my_type_one, standard_registry, MyTypeOne, MyTypeTwo, MyTypeTwoCodec,
    TestNetwork,
};

proptest! {
    #[test]
    fn closure_codec_round_trips(value in any::<i32>()) {
        let registry = CodecRegistry::new();
        register_my_type_one(&registry);

        let payload = DeltaCodec::encode_value(&MyTypeOne { value }, &registry).unwrap();
        let decoded = DeltaCodec::decode_value::<MyTypeOne>(&payload, &registry).unwrap();

        prop_assert_eq!(decoded, MyTypeOne { value });
    }

    #[test]
    fn codec_type_round_trips(value in any::<i32>()) {
        let registry = CodecRegistry::new();
        registry.register_codec::<MyTypeTwo, _>(MyTypeTwoCodec);

        let payload = DeltaCodec::encode_value(&MyTypeTwo { value }, &registry).unwrap();

        prop_assert_eq!(DeltaCodec::decode_value::<MyTypeTwo>(&payload, &registry).unwrap(), MyTypeTwo { value });
    }

    #[test]
    fn builtin_codecs_round_trip(a in any::<u64>(), b in any::<i16>(), c in any::<f64>(), d in any::<bool>()) {
        let registry = CodecRegistry::new();

        prop_assert_eq!(DeltaCodec::decode_value::<u64>(&DeltaCodec::encode_value(&a, &registry).unwrap(), &registry).unwrap(), a);
        prop_assert_eq!(DeltaCodec::decode_value::<i16>(&DeltaCodec::encode_value(&b, &registry).unwrap(), &registry).unwrap(), b);
        let decoded = DeltaCodec::decode_value::<f64>(&DeltaCodec::encode_value(&c, &registry).unwrap(), &registry).unwrap();
        prop_assert_eq!(decoded.to_bits(), c.to_bits());
        prop_assert_eq!(DeltaCodec::decode_value::<bool>(&DeltaCodec::encode_value(&d, &registry).unwrap(), &registry).unwrap(), d);
    }

    #[test]
    fn string_serde_round_trips(text in ".{0,64}") {
        let registry = CodecRegistry::new();
        registry.register_serde::<String>();

        let payload = DeltaCodec::encode_value(&text, &registry).unwrap();

        prop_assert_eq!(DeltaCodec::decode_value::<String>(&payload, &registry).unwrap(), text);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn mirror_matches_after_one_cycle(values in proptest::collection::vec(any::<i32>(), 1..8)) {
        let test_protocol = protocol();
        let mut network = TestNetwork::new(test_protocol.protocol.clone(), standard_registry(), 2);
        let object_id = network.server.spawn_object(test_protocol.working, None).unwrap();
        network.tick();

        for value in values {
            network
                .server
                .set(&object_id, test_protocol.working_value, MyTypeOne { value })
                .unwrap();
            let events = network.tick();
            prop_assert!(!events.has_errors());

            for peer in [PeerId::new(1), PeerId::new(2)] {
                let mirrored = network
                    .client(&peer)
                    .get(&object_id, test_protocol.working_value)
                    .unwrap();
                prop_assert_eq!(mirrored.value, value);
            }
        }
    }
}
