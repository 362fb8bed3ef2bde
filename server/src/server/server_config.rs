use std::default::Default;

/// Contains Config properties which will be used by the Server
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether objects owned by a peer are despawned everywhere when that
    /// peer disconnects
    pub despawn_owned_objects_on_disconnect: bool,
    /// Upper bound on packets drained from the transport in one call to
    /// `receive()`. Anything beyond it waits for the next call.
    pub max_receive_per_tick: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            despawn_owned_objects_on_disconnect: true,
            max_receive_per_tick: 1024,
        }
    }
}
