error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Json(serde_json::Error);
    }

    errors {
        KeyGen(reason: String) {
            description("key generation failed")
            display("key generation failed: {}", reason)
        }

        Decode(reason: String) {
            description("malformed base64 text")
            display("failed to decode base64: {}", reason)
        }

        Import(reason: String) {
            description("malformed key")
            display("failed to import key: {}", reason)
        }

        Signing(reason: String) {
            description("signing failed")
            display("signing failed: {}", reason)
        }

        Verification(reason: String) {
            description("malformed signature")
            display("signature could not be checked: {}", reason)
        }

        MissingState(what: &'static str) {
            description("operation invoked out of order")
            display("missing {}", what)
        }

        Config(reason: String) {
            description("bad configuration")
            display("bad configuration: {}", reason)
        }
    }
}

impl Error {
    /// True when the failure came from Base64 decoding.
    pub fn is_decode(&self) -> bool {
        matches!(*self.kind(), ErrorKind::Decode(_))
    }

    /// True when the key bytes themselves were rejected.
    pub fn is_import(&self) -> bool {
        matches!(*self.kind(), ErrorKind::Import(_))
    }
}
