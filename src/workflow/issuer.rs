use tracing::{debug, info};

use crate::errors::*;
use crate::key_types::KeyPair;
use crate::signature::{self, SignedMessage};

/// The two armored key texts, as an issuer would paste them.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportedKeys {
    pub public_armored: String,
    pub private_armored: String,
}

impl ExportedKeys {
    fn from_pair(pair: &KeyPair) -> Self {
        Self {
            public_armored: pair.export_public(),
            private_armored: pair.export_private(),
        }
    }
}

/// The signing party. Owns the only handle to its private key.
#[derive(Debug, Default)]
pub struct Issuer {
    key_pair: Option<KeyPair>,
    exported: Option<ExportedKeys>,
    message: String,
    signed_snapshot: Option<String>,
    signed: Option<SignedMessage>,
}

impl Issuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous pair. A signature made with the old pair is
    /// kept as-is.
    pub fn generate_keys(&mut self) -> Result<&ExportedKeys> {
        let pair = KeyPair::generate()?;
        info!(fingerprint = %pair.verifying_key().fingerprint(), "issuer generated keys");
        Ok(self.install(pair))
    }

    /// Load a previously exported `PRIVATE KEY` block instead of generating.
    pub fn restore_keys(&mut self, private_armored: &str) -> Result<&ExportedKeys> {
        let pair = KeyPair::import_private(private_armored)?;
        info!(fingerprint = %pair.verifying_key().fingerprint(), "issuer restored keys");
        Ok(self.install(pair))
    }

    fn install(&mut self, pair: KeyPair) -> &ExportedKeys {
        let exported = ExportedKeys::from_pair(&pair);
        self.key_pair = Some(pair);
        self.exported.insert(exported)
    }

    pub fn set_message(&mut self, message: &str) {
        self.message = message.to_owned();
    }

    /// Sign the current message, remembering exactly what was signed.
    pub fn sign(&mut self) -> Result<&SignedMessage> {
        let pair = self
            .key_pair
            .as_ref()
            .ok_or(ErrorKind::MissingState("issuer key pair"))?;
        if self.message.is_empty() {
            bail!(ErrorKind::MissingState("message to sign"));
        }

        let sig = signature::sign(pair.signing_key(), self.message.as_bytes())?;
        debug!(msg_len = self.message.len(), "issuer signed message");

        self.signed_snapshot = Some(self.message.clone());
        Ok(&*self.signed.insert(SignedMessage::new(&self.message, &sig)))
    }

    pub fn key_pair(&self) -> Option<&KeyPair> {
        self.key_pair.as_ref()
    }

    pub fn exported(&self) -> Option<&ExportedKeys> {
        self.exported.as_ref()
    }

    pub fn public_key_text(&self) -> Option<&str> {
        self.exported.as_ref().map(|e| e.public_armored.as_str())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message text as it was at the last successful `sign`.
    pub fn signed_snapshot(&self) -> Option<&str> {
        self.signed_snapshot.as_deref()
    }

    pub fn signed(&self) -> Option<&SignedMessage> {
        self.signed.as_ref()
    }
}
