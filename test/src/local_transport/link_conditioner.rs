use std::collections::VecDeque;

use netvar_shared::PeerId;

/// Drops and reorders packets on their way into an inbox.
///
/// Seeded, so a failing run can be replayed.
pub struct LinkConditioner {
    loss: f32,
    reorder: f32,
    rng: fastrand::Rng,
}

impl LinkConditioner {
    pub fn new(loss: f32, reorder: f32, seed: u64) -> Self {
        Self {
            loss,
            reorder,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Reorders every other packet, drops nothing
    pub fn reordering(seed: u64) -> Self {
        Self::new(0.0, 0.5, seed)
    }

    pub fn lossy(loss: f32, seed: u64) -> Self {
        Self::new(loss, 0.0, seed)
    }

    pub(crate) fn deliver(&mut self, inbox: &mut VecDeque<(PeerId, Vec<u8>)>, packet: (PeerId, Vec<u8>)) {
        if self.rng.f32() < self.loss {
            return;
        }
        if !inbox.is_empty() && self.rng.f32() < self.reorder {
            let index = self.rng.usize(0..inbox.len());
            inbox.insert(index, packet);
        } else {
            inbox.push_back(packet);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::LinkConditioner;
    use netvar_shared::PeerId;

    #[test]
    fn full_loss_drops_everything() {
        let mut conditioner = LinkConditioner::lossy(1.0, 7);
        let mut inbox = VecDeque::new();

        for index in 0..10 {
            conditioner.deliver(&mut inbox, (PeerId::SERVER, vec![index]));
        }

        assert!(inbox.is_empty());
    }

    #[test]
    fn reordering_keeps_every_packet() {
        let mut conditioner = LinkConditioner::reordering(7);
        let mut inbox = VecDeque::new();

        for index in 0..20 {
            conditioner.deliver(&mut inbox, (PeerId::SERVER, vec![index]));
        }

        let mut received: Vec<u8> = inbox.into_iter().map(|(_, payload)| payload[0]).collect();
        received.sort();
        assert_eq!(received, (0..20).collect::<Vec<u8>>());
    }
}
