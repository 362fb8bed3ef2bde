use std::default::Default;

/// Contains Config properties which will be used by a Client
#[derive(Clone)]
pub struct ClientConfig {
    /// Upper bound on packets drained from the transport in one call to
    /// `receive()`. Anything beyond it waits for the next call.
    pub max_receive_per_tick: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_receive_per_tick: 1024,
        }
    }
}
