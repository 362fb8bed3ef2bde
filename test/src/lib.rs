pub mod test_protocol;

pub use helpers::{init_logging, InstanceDirectory, TestNetwork, TickEvents};
pub use local_transport::{LinkConditioner, LocalTransportHub};
pub use test_protocol::{
    protocol, register_my_type_one, standard_registry, MyTypeOne, MyTypeThree, MyTypeTwo,
    MyTypeTwoCodec, TestProtocol,
};
