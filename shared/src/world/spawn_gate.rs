use log::warn;

use crate::{
    codec::CodecRegistry, protocol::ObjectSchema, AuthorityRole, PeerId,
};

use super::{ConfigurationIssue, SpawnError};

/// What the gate needs to know about the spawn being attempted
#[derive(Clone, Copy, Debug)]
pub struct SpawnContext {
    pub owner: Option<PeerId>,
    pub client_authority_enabled: bool,
}

/// Refuses to spawn objects whose replicated slots could not work, so a
/// misconfiguration fails at spawn rather than at the first value change
pub struct SpawnGate;

impl SpawnGate {
    pub fn check(
        schema: &ObjectSchema,
        context: &SpawnContext,
        registry: &CodecRegistry,
    ) -> Result<(), SpawnError> {
        for slot in schema.slots() {
            let issue = if !registry.is_resolvable(&slot.value_type()) {
                Some(ConfigurationIssue::MissingSerializer {
                    type_name: slot.value_type().name(),
                })
            } else {
                Self::check_authority(slot.authority(), context)
            };

            if let Some(issue) = issue {
                warn!(
                    "SpawnGate: refusing to spawn {}, slot '{}': {}",
                    schema.name(),
                    slot.name(),
                    issue
                );
                return Err(SpawnError::InvalidReplicationConfiguration {
                    object: schema.name(),
                    slot: slot.name(),
                    issue,
                });
            }
        }
        Ok(())
    }

    fn check_authority(
        authority: AuthorityRole,
        context: &SpawnContext,
    ) -> Option<ConfigurationIssue> {
        match authority {
            AuthorityRole::Server => None,
            AuthorityRole::Owner => {
                if !context.client_authority_enabled {
                    Some(ConfigurationIssue::ClientAuthorityDisabled)
                } else if context.owner.is_none() {
                    Some(ConfigurationIssue::OwnerAuthorityWithoutOwner)
                } else {
                    None
                }
            }
        }
    }
}
