//! Object kinds and value types shared by the E2E tests

use std::sync::Arc;

use netvar_shared::{
    AuthorityRole, BitReader, BitWrite, Codec, CodecRegistry, ObjectKind, ObjectSchema, Protocol,
    Serde, SerdeErr, VarKey,
};

/// Replicated through a codec registered as two closures
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MyTypeOne {
    pub value: i32,
}

/// Replicated through a codec type defined apart from the value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MyTypeTwo {
    pub value: i32,
}

/// Never registered, so objects holding it cannot spawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MyTypeThree {
    pub value: i32,
}

pub struct MyTypeTwoCodec;

impl Codec<MyTypeTwo> for MyTypeTwoCodec {
    fn encode(&self, writer: &mut dyn BitWrite, value: &MyTypeTwo) {
        value.value.ser(writer);
    }

    fn decode(&self, reader: &mut BitReader) -> Result<MyTypeTwo, SerdeErr> {
        Ok(MyTypeTwo {
            value: i32::de(reader)?,
        })
    }
}

pub fn register_my_type_one(registry: &CodecRegistry) {
    registry.register::<MyTypeOne, _, _>(
        |writer, value| value.value.ser(writer),
        |reader| {
            Ok(MyTypeOne {
                value: i32::de(reader)?,
            })
        },
    );
}

/// The Protocol plus the handles tests use to reach each slot
pub struct TestProtocol {
    pub protocol: Protocol,

    pub working: ObjectKind,
    pub working_value: VarKey<MyTypeOne>,

    pub codec_type: ObjectKind,
    pub codec_type_value: VarKey<MyTypeTwo>,

    pub non_working: ObjectKind,
    pub non_working_value: VarKey<MyTypeThree>,

    pub avatar: ObjectKind,
    pub avatar_health: VarKey<i32>,
    pub avatar_input: VarKey<u8>,
    pub avatar_name: VarKey<String>,
}

pub fn protocol() -> TestProtocol {
    let mut protocol = Protocol::builder();
    protocol.enable_client_authoritative_variables().unwrap();

    let mut working = ObjectSchema::new("WorkingUserNetworkVariable");
    let working_value = working
        .add_slot::<MyTypeOne>("value", AuthorityRole::Server)
        .unwrap();

    let mut codec_type = ObjectSchema::new("CodecTypeNetworkVariable");
    let codec_type_value = codec_type
        .add_slot::<MyTypeTwo>("value", AuthorityRole::Server)
        .unwrap();

    let mut non_working = ObjectSchema::new("NonWorkingUserNetworkVariable");
    let non_working_value = non_working
        .add_slot::<MyTypeThree>("value", AuthorityRole::Server)
        .unwrap();

    let mut avatar = ObjectSchema::new("Avatar");
    let avatar_health = avatar
        .add_slot_with::<i32>("health", AuthorityRole::Server, 100)
        .unwrap();
    let avatar_input = avatar.add_slot::<u8>("input", AuthorityRole::Owner).unwrap();
    let avatar_name = avatar
        .add_slot::<String>("name", AuthorityRole::Server)
        .unwrap();

    TestProtocol {
        working: protocol.add_object(working).unwrap(),
        working_value,
        codec_type: protocol.add_object(codec_type).unwrap(),
        codec_type_value,
        non_working: protocol.add_object(non_working).unwrap(),
        non_working_value,
        avatar: protocol.add_object(avatar).unwrap(),
        avatar_health,
        avatar_input,
        avatar_name,
        protocol,
    }
}

/// A registry holding every codec the test protocol needs, except the one
/// for `MyTypeThree`
pub fn standard_registry() -> Arc<CodecRegistry> {
    let registry = CodecRegistry::new();
    register_my_type_one(&registry);
    registry.register_codec::<MyTypeTwo, _>(MyTypeTwoCodec);
    registry.register_serde::<String>();
    Arc::new(registry)
}
