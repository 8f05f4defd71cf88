//! Signing service seam: ECDSA over the blake3 digest of canonical proposal
//! bytes. Key custody stays behind this trait; protocol code only ever sees
//! digests and signature bytes.

use crate::foundation::{Hash32, IouError, PartyId, PublicKeyBytes, Result};
use secp256k1::ecdsa::Signature;
use secp256k1::{All, Message, Secp256k1, SecretKey};
use std::collections::HashMap;

pub trait SigningService: Send + Sync {
    /// Sign a payload digest with the named party's key.
    fn sign(&self, payload_hash: &Hash32, signer: &PartyId) -> Result<Vec<u8>>;

    /// Verify a signature over a payload digest against a public key.
    /// Malformed keys or signatures verify as false, never as errors.
    fn verify(&self, payload_hash: &Hash32, signature: &[u8], key: &PublicKeyBytes) -> bool;
}

/// In-process signer holding secp256k1 secret keys for registered parties.
pub struct Secp256k1SigningService {
    secp: Secp256k1<All>,
    secrets: HashMap<PartyId, SecretKey>,
}

impl Secp256k1SigningService {
    pub fn new() -> Self {
        Self { secp: Secp256k1::new(), secrets: HashMap::new() }
    }

    pub fn register(&mut self, party: impl Into<PartyId>, secret: SecretKey) {
        self.secrets.insert(party.into(), secret);
    }

    pub fn public_key_for(&self, party: &PartyId) -> Result<PublicKeyBytes> {
        let secret = self.secrets.get(party).ok_or_else(|| IouError::UnknownParty(party.to_string()))?;
        Ok(PublicKeyBytes::from_public_key(&secret.public_key(&self.secp)))
    }
}

impl Default for Secp256k1SigningService {
    fn default() -> Self {
        Self::new()
    }
}

impl SigningService for Secp256k1SigningService {
    fn sign(&self, payload_hash: &Hash32, signer: &PartyId) -> Result<Vec<u8>> {
        let secret = self.secrets.get(signer).ok_or_else(|| IouError::UnknownParty(signer.to_string()))?;
        let message = Message::from_digest(*payload_hash);
        let signature = self.secp.sign_ecdsa(&message, secret);
        Ok(signature.serialize_compact().to_vec())
    }

    fn verify(&self, payload_hash: &Hash32, signature: &[u8], key: &PublicKeyBytes) -> bool {
        let Ok(public_key) = key.to_public_key() else {
            return false;
        };
        let Ok(signature) = Signature::from_compact(signature) else {
            return false;
        };
        let message = Message::from_digest(*payload_hash);
        self.secp.verify_ecdsa(&message, &signature, &public_key).is_ok()
    }
}
