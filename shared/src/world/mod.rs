mod error;
mod network_object;
mod spawn_gate;
mod spawn_records;
mod update_receiver;
mod update_sender;

pub use error::{ConfigurationIssue, SpawnError};
pub use network_object::NetworkObject;
pub use spawn_gate::{SpawnContext, SpawnGate};
pub use spawn_records::SpawnRecords;
pub use update_receiver::UpdateReceiver;
pub use update_sender::{OutgoingDelta, UpdateSender};
