//! RSASSA-PKCS1-v1_5 with SHA-256 over message bytes.
//!
//! `verify` only answers yes or no. A wrong key, a tampered message and a
//! corrupted signature all come back as `Ok(false)`; the one thing reported
//! as an error is a signature whose length cannot match the key at all.

use tracing::debug;

use crate::codec;
use crate::datetime_utils::SignedAt;
use crate::errors::*;
use crate::key_types::{SigningKey, VerifyingKey};

/// Raw signature bytes. Travels as unarmored Base64.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl ::std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "Signature({} bytes)", self.bytes.len())
    }
}

impl Signature {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn from_base64(text: &str) -> Result<Self> {
        Ok(Self::from_bytes(codec::decode_base64(text)?))
    }

    pub fn to_base64(&self) -> String {
        codec::encode_base64(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub fn sign(key: &SigningKey, msg: &[u8]) -> Result<Signature> {
    let sig = key.sign_pkcs1_sha256(msg)?;
    debug!(msg_len = msg.len(), sig_len = sig.len(), "signed message");
    Ok(Signature::from_bytes(sig))
}

pub fn verify(key: &VerifyingKey, sig: &Signature, msg: &[u8]) -> Result<bool> {
    if sig.as_bytes().len() != key.modulus_len() {
        bail!(ErrorKind::Verification(format!(
            "expected a {} byte signature, got {}",
            key.modulus_len(),
            sig.as_bytes().len()
        )));
    }

    let valid = key.verify_pkcs1_sha256(msg, sig.as_bytes());
    debug!(fingerprint = %key.fingerprint(), valid, "checked signature");
    Ok(valid)
}

/// Everything the issuer hands over besides the public key, as one
/// copy/paste-able JSON document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    pub message: String,   // utf8 data
    pub signature: String, // base64 encoded signature
    pub signed_at: SignedAt,
}

impl SignedMessage {
    pub fn new(message: &str, signature: &Signature) -> Self {
        Self {
            message: message.to_owned(),
            signature: signature.to_base64(),
            signed_at: SignedAt::now(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).chain_err(|| ErrorKind::Decode("malformed signed message".into()))
    }
}
