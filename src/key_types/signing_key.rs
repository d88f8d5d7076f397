use std::fmt;
use std::ops::Deref;

use ring::signature::{self, RsaKeyPair};

use crate::codec;
use crate::errors::*;
use crate::key_types::{PRIVATE_KEY_TAG, RANDOM};

/// The private half of a [`KeyPair`](super::KeyPair). It can sign and be
/// exported, nothing else.
pub struct SigningKey {
    rendered_kp: RsaKeyPair,
    pkcs8: Vec<u8>,
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("modulus_len", &self.modulus_len())
            .finish()
    }
}

impl SigningKey {
    pub(crate) fn from_pkcs8(pkcs8: &[u8]) -> Result<Self> {
        let key_pair = RsaKeyPair::from_pkcs8(pkcs8)
            .map_err(|e| ErrorKind::Import(format!("private key rejected: {}", e)))?;

        Ok(Self {
            rendered_kp: key_pair,
            pkcs8: pkcs8.to_vec(),
        })
    }

    /// Signature length in bytes.
    pub fn modulus_len(&self) -> usize {
        self.rendered_kp.public_modulus_len()
    }

    /// PKCS#1 v1.5 over SHA-256 of `msg`.
    pub(crate) fn sign_pkcs1_sha256(&self, msg: &[u8]) -> Result<Vec<u8>> {
        let mut sig = vec![0u8; self.modulus_len()];
        self.rendered_kp
            .sign(&signature::RSA_PKCS1_SHA256, RANDOM.deref(), msg, &mut sig)
            .map_err(|_| ErrorKind::Signing("provider refused the key".into()))?;
        Ok(sig)
    }

    /// PKCS#8 DER, byte-for-byte what the key was loaded from.
    pub fn pkcs8_der(&self) -> &[u8] {
        &self.pkcs8
    }

    pub fn export(&self) -> String {
        codec::armor_bytes(&self.pkcs8, PRIVATE_KEY_TAG)
    }
}
