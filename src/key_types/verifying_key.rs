use std::fmt;

use ring::digest;
use ring::signature::{self, UnparsedPublicKey};
use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use tracing::debug;

use crate::codec;
use crate::errors::*;
use crate::key_types::PUBLIC_KEY_TAG;

// Range accepted by RSA_PKCS1_2048_8192_SHA256
const MIN_MODULUS_BITS: usize = 2048;
const MAX_MODULUS_BITS: usize = 8192;

/// A verify-only public key, rebuilt from text.
///
/// Holds the SubjectPublicKeyInfo for export and the bare PKCS#1
/// `RSAPublicKey` that ring verifies against.
#[derive(Clone, PartialEq, Eq)]
pub struct VerifyingKey {
    spki_der: Vec<u8>,
    pkcs1_der: Vec<u8>,
    modulus_len: usize,
}

impl fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VerifyingKey")
            .field("fingerprint", &self.fingerprint())
            .field("modulus_len", &self.modulus_len)
            .finish()
    }
}

impl VerifyingKey {
    pub(crate) fn from_rsa(key: &RsaPublicKey) -> Result<Self> {
        let bits = key.n().bits();
        if bits < MIN_MODULUS_BITS || bits > MAX_MODULUS_BITS {
            bail!(ErrorKind::Import(format!("unsupported modulus size: {} bits", bits)));
        }

        let spki = key
            .to_public_key_der()
            .map_err(|e| ErrorKind::Import(format!("failed to encode public key: {}", e)))?;
        let pkcs1 = key
            .to_pkcs1_der()
            .map_err(|e| ErrorKind::Import(format!("failed to encode public key: {}", e)))?;

        Ok(Self {
            spki_der: spki.as_bytes().to_vec(),
            pkcs1_der: pkcs1.as_bytes().to_vec(),
            modulus_len: key.size(),
        })
    }

    /// Parse SubjectPublicKeyInfo DER.
    pub fn from_spki_der(der: &[u8]) -> Result<Self> {
        let key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| ErrorKind::Import(format!("not an RSA public key: {}", e)))?;
        Self::from_rsa(&key)
    }

    /// Unarmor, decode and parse a `PUBLIC KEY` block. Base64 failures
    /// surface as `Decode`, bad key bytes as `Import`.
    pub fn import(armored: &str) -> Result<Self> {
        if armored.trim().is_empty() {
            bail!(ErrorKind::MissingState("public key text"));
        }

        let der = codec::unarmor_bytes(armored)?;
        let key = Self::from_spki_der(&der)?;
        debug!(fingerprint = %key.fingerprint(), "imported public key");

        Ok(key)
    }

    pub fn export(&self) -> String {
        codec::armor_bytes(&self.spki_der, PUBLIC_KEY_TAG)
    }

    pub fn spki_der(&self) -> &[u8] {
        &self.spki_der
    }

    /// Expected signature length in bytes.
    pub fn modulus_len(&self) -> usize {
        self.modulus_len
    }

    /// Lowercase hex SHA-256 of the SubjectPublicKeyInfo.
    pub fn fingerprint(&self) -> String {
        digest::digest(&digest::SHA256, &self.spki_der)
            .as_ref()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    pub(crate) fn verify_pkcs1_sha256(&self, msg: &[u8], sig: &[u8]) -> bool {
        UnparsedPublicKey::new(&signature::RSA_PKCS1_2048_8192_SHA256, &self.pkcs1_der)
            .verify(msg, sig)
            .is_ok()
    }
}
