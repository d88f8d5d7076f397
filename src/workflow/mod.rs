//! The two-party signing scenario.
//!
//! An [`Issuer`] and a [`Verifier`] never share objects. [`Workflow`] owns
//! one of each and moves only text between them (armored public key,
//! message, Base64 signature), so the verifier's key is always rebuilt from
//! what it was handed.

use tracing::{info, warn};

use crate::errors::*;
use crate::key_types::VerifyingKey;
use crate::signature::{self, Signature};

mod issuer;
mod outcome;
mod verifier;

pub use self::issuer::{ExportedKeys, Issuer};
pub use self::outcome::VerificationOutcome;
pub use self::verifier::Verifier;

/// Appended to an intercepted message.
pub const TAMPER_SUFFIX: &str = " [MODIFIED BY ATTACK]";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    NoKeys,
    KeysGenerated,
    Signed,
    KeyImported,
    Verified,
}

pub fn tamper(message: &str, suffix: &str) -> String {
    format!("{}{}", message, suffix)
}

/// Verify without a session: decode `signature_base64`, check it against
/// the UTF-8 bytes of `message`, and classify the result.
pub fn verify_detached(
    key: &VerifyingKey,
    message: &str,
    signature_base64: &str,
    signed_snapshot: Option<&str>,
) -> VerificationOutcome {
    let check = Signature::from_base64(signature_base64)
        .and_then(|sig| signature::verify(key, &sig, message.as_bytes()));

    VerificationOutcome::classify(check, message, signed_snapshot)
}

#[derive(Debug)]
pub struct Workflow {
    issuer: Issuer,
    verifier: Verifier,
    stage: Stage,
    tamper_suffix: String,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self::with_tamper_suffix(TAMPER_SUFFIX)
    }

    pub fn with_tamper_suffix(suffix: &str) -> Self {
        Self {
            issuer: Issuer::new(),
            verifier: Verifier::new(),
            stage: Stage::NoKeys,
            tamper_suffix: suffix.to_owned(),
        }
    }

    /// Always allowed; regenerating discards the previous pair.
    pub fn generate_keys(&mut self) -> Result<ExportedKeys> {
        let exported = self.issuer.generate_keys()?.clone();
        self.advance(Stage::KeysGenerated);
        Ok(exported)
    }

    /// Sign `message` and hand message plus signature to the verifier.
    /// Returns the Base64 signature. On failure the issuer keeps its
    /// previous message.
    pub fn sign(&mut self, message: &str) -> Result<String> {
        let previous = self.issuer.message().to_owned();
        self.issuer.set_message(message);

        let signed = match self.issuer.sign().map(|s| s.clone()) {
            Ok(signed) => signed,
            Err(e) => {
                self.issuer.set_message(&previous);
                return Err(e);
            }
        };

        self.verifier.receive_signed(&signed);
        self.advance(Stage::Signed);

        Ok(signed.signature)
    }

    /// Simulated interception of the message on its way to the verifier.
    pub fn tamper_message(&mut self) -> &str {
        warn!(suffix = %self.tamper_suffix, "simulating man-in-the-middle");
        self.verifier.tamper_message(&self.tamper_suffix)
    }

    /// Copy the issuer's armored public key into the verifier's key box.
    pub fn transfer_public_key(&mut self) -> Result<()> {
        let text = self
            .issuer
            .public_key_text()
            .ok_or(ErrorKind::MissingState("issuer public key"))?;
        self.verifier.receive_public_key(text);
        Ok(())
    }

    pub fn import_verifier_key(&mut self, armored: &str) -> Result<()> {
        self.verifier.receive_public_key(armored);
        self.verifier.import_key()?;
        self.advance(Stage::KeyImported);
        Ok(())
    }

    /// Import whatever public-key text the verifier currently holds.
    pub fn import_held_key(&mut self) -> Result<()> {
        self.verifier.import_key()?;
        self.advance(Stage::KeyImported);
        Ok(())
    }

    /// Replace the signature text the verifier holds, as if pasted by hand.
    pub fn set_verifier_signature(&mut self, signature_base64: &str) {
        self.verifier.set_signature(signature_base64);
    }

    pub fn set_verifier_message(&mut self, message: &str) {
        self.verifier.set_message(message);
    }

    /// Re-entrant; every call recomputes and replaces the outcome.
    pub fn verify(&mut self) -> Result<VerificationOutcome> {
        let snapshot = self.issuer.signed_snapshot().map(str::to_owned);
        let outcome = self.verifier.verify(snapshot.as_deref())?.clone();
        self.advance(Stage::Verified);
        Ok(outcome)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn issuer(&self) -> &Issuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    fn advance(&mut self, stage: Stage) {
        info!(from = ?self.stage, to = ?stage, "workflow stage");
        self.stage = stage;
    }
}
