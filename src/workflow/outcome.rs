use std::fmt;

use crate::errors::Result;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The signature matches the message under the imported key.
    Authentic,
    /// Mismatch with the message unchanged since signing: wrong key or
    /// corrupted signature.
    Invalid,
    /// Mismatch and the message differs from what was signed.
    TamperDetected,
    /// The check could not run (bad Base64, malformed signature).
    Error(String),
}

impl VerificationOutcome {
    /// Turn a raw cryptographic answer into an outcome. Without a snapshot
    /// of the signed text there is nothing to compare against, so a
    /// mismatch is only ever `Invalid`.
    pub fn classify(check: Result<bool>, current: &str, signed_snapshot: Option<&str>) -> Self {
        match check {
            Ok(true) => VerificationOutcome::Authentic,
            Ok(false) => match signed_snapshot {
                Some(snapshot) if snapshot != current => VerificationOutcome::TamperDetected,
                _ => VerificationOutcome::Invalid,
            },
            Err(e) => VerificationOutcome::Error(e.to_string()),
        }
    }

    pub fn is_authentic(&self) -> bool {
        *self == VerificationOutcome::Authentic
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            VerificationOutcome::Authentic => f.write_str("authentic"),
            VerificationOutcome::Invalid => f.write_str("invalid"),
            VerificationOutcome::TamperDetected => f.write_str("tamper detected"),
            VerificationOutcome::Error(ref reason) => write!(f, "error: {}", reason),
        }
    }
}
