use crate::PeerId;

/// Which peer may write a replicated variable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthorityRole {
    /// Only the server writes; every client mirrors
    Server,
    /// Only the client owning the object writes; the server mirrors
    Owner,
}

impl AuthorityRole {
    pub fn name(&self) -> &'static str {
        match self {
            AuthorityRole::Server => "Server",
            AuthorityRole::Owner => "Owner",
        }
    }

    /// The peer holding this authority for an object with the given owner
    pub fn authority_peer(&self, owner: Option<PeerId>) -> Option<PeerId> {
        match self {
            AuthorityRole::Server => Some(PeerId::SERVER),
            AuthorityRole::Owner => owner,
        }
    }

    pub fn is_held_by(&self, peer: PeerId, owner: Option<PeerId>) -> bool {
        self.authority_peer(owner) == Some(peer)
    }
}
