//! RSA signature lifecycle between two parties that only exchange text.
//!
//! An issuer generates an RSA-2048 key pair, exports both halves as armored
//! PEM-style text and signs a UTF-8 message (PKCS#1 v1.5, SHA-256). A
//! verifier imports the public key from that text, checks the Base64
//! signature against the message it received, and gets back one of
//! `Authentic`, `Invalid`, `TamperDetected` or `Error`.

#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate serde_derive;

pub mod codec;
pub mod config;
pub mod datetime_utils;
pub mod errors;
pub mod key_types;
pub mod signature;
pub mod workflow;

pub use errors::{Error, ErrorKind, Result};
pub use key_types::{import_public_key, KeyPair, SigningKey, VerifyingKey};
pub use signature::{sign, verify, Signature, SignedMessage};
pub use workflow::{
    tamper, verify_detached, ExportedKeys, Issuer, Stage, VerificationOutcome, Verifier,
    Workflow, TAMPER_SUFFIX,
};
