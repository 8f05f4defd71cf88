//! Identity provider seam: resolves a logical party to its current signing key.

use crate::foundation::{IouError, PartyId, PublicKeyBytes, Result};
use std::collections::HashMap;

pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, party: &PartyId) -> Result<PublicKeyBytes>;
}

/// Fixed registry of party keys, populated at construction time.
pub struct StaticIdentityProvider {
    keys: HashMap<PartyId, PublicKeyBytes>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self { keys: HashMap::new() }
    }

    pub fn register(&mut self, party: impl Into<PartyId>, key: PublicKeyBytes) {
        self.keys.insert(party.into(), key);
    }
}

impl Default for StaticIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn resolve(&self, party: &PartyId) -> Result<PublicKeyBytes> {
        self.keys.get(party).cloned().ok_or_else(|| IouError::UnknownParty(party.to_string()))
    }
}
