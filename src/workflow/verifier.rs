use tracing::{info, warn};

use crate::errors::*;
use crate::key_types::VerifyingKey;
use crate::signature::SignedMessage;
use crate::workflow::{tamper, verify_detached, VerificationOutcome};

/// The checking party. Everything it knows arrived as text.
#[derive(Debug, Default)]
pub struct Verifier {
    public_key_text: String,
    imported: Option<VerifyingKey>,
    message: String,
    signature_text: String,
    outcome: Option<VerificationOutcome>,
}

impl Verifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paste a public key. Nothing is parsed until `import_key`.
    pub fn receive_public_key(&mut self, armored: &str) {
        self.public_key_text = armored.to_owned();
    }

    /// Parse the held public-key text. On failure the previously imported
    /// key, if any, is kept.
    pub fn import_key(&mut self) -> Result<&VerifyingKey> {
        let key = VerifyingKey::import(&self.public_key_text)?;
        info!(fingerprint = %key.fingerprint(), "verifier imported key");
        Ok(&*self.imported.insert(key))
    }

    pub fn receive(&mut self, message: &str, signature_base64: &str) {
        self.message = message.to_owned();
        self.signature_text = signature_base64.to_owned();
    }

    pub fn receive_signed(&mut self, signed: &SignedMessage) {
        self.receive(&signed.message, &signed.signature);
    }

    pub fn set_message(&mut self, message: &str) {
        self.message = message.to_owned();
    }

    pub fn set_signature(&mut self, signature_base64: &str) {
        self.signature_text = signature_base64.to_owned();
    }

    /// Interception in transit: appends `suffix` to the held message and
    /// leaves the signature alone. Every call appends again.
    pub fn tamper_message(&mut self, suffix: &str) -> &str {
        self.message = tamper(&self.message, suffix);
        warn!("message altered in transit");
        &self.message
    }

    /// Check the held signature against the held message. `signed_snapshot`
    /// is the text the issuer actually signed, when known, and only affects
    /// how a mismatch is classified.
    pub fn verify(&mut self, signed_snapshot: Option<&str>) -> Result<&VerificationOutcome> {
        let key = self
            .imported
            .as_ref()
            .ok_or(ErrorKind::MissingState("imported public key"))?;
        if self.signature_text.trim().is_empty() {
            bail!(ErrorKind::MissingState("signature"));
        }

        let outcome = verify_detached(key, &self.message, &self.signature_text, signed_snapshot);
        if outcome.is_authentic() {
            info!(%outcome, "verification finished");
        } else {
            warn!(%outcome, "verification finished");
        }

        Ok(&*self.outcome.insert(outcome))
    }

    pub fn public_key_text(&self) -> &str {
        &self.public_key_text
    }

    pub fn imported_key(&self) -> Option<&VerifyingKey> {
        self.imported.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn signature_text(&self) -> &str {
        &self.signature_text
    }

    pub fn outcome(&self) -> Option<&VerificationOutcome> {
        self.outcome.as_ref()
    }
}
