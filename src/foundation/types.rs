use crate::foundation::IouError;
use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

pub type Hash32 = [u8; 32];

/// Logical party identifier. Identity comparison is on this id, never on the key
/// alone: two distinct parties may in principle share key material and must still
/// be treated as distinct entities.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for PartyId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl From<String> for PartyId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PartyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Compressed secp256k1 public key in canonical 33-byte encoding.
///
/// `Ord` so it can key a `BTreeMap` and serialize deterministically.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PublicKeyBytes(Vec<u8>);

impl PublicKeyBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn from_public_key(key: &PublicKey) -> Self {
        Self(key.serialize().to_vec())
    }

    pub fn to_public_key(&self) -> Result<PublicKey, IouError> {
        PublicKey::from_slice(&self.0).map_err(IouError::from)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PublicKeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

macro_rules! define_hash_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
        #[serde(transparent)]
        pub struct $name(Hash32);

        impl $name {
            pub const fn new(value: Hash32) -> Self {
                Self(value)
            }

            pub fn as_hash(&self) -> &Hash32 {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl From<Hash32> for $name {
            fn from(value: Hash32) -> Self {
                Self(value)
            }
        }
    };
}

define_hash_id!(
    /// Identifies a proposal by the blake3 hash of its signable content.
    ProposalId
);

define_hash_id!(
    /// Opaque reference to a previously committed ledger state.
    StateRef
);
