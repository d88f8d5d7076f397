use std::fs::File;
use std::path::Path;

use crate::errors::*;
use crate::workflow::TAMPER_SUFFIX;

/// Knobs for the demo scenarios. Crypto parameters are fixed and do not
/// appear here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub message: String,
    pub tamper_suffix: String,
    pub log_filter: String,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            message: "hello".into(),
            tamper_suffix: TAMPER_SUFFIX.into(),
            log_filter: "info".into(),
        }
    }
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .chain_err(|| ErrorKind::Config(format!("cannot open {}", path.display())))?;
        let cfg: Self = serde_json::from_reader(file)
            .chain_err(|| ErrorKind::Config(format!("cannot parse {}", path.display())))?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.message.is_empty() {
            bail!(ErrorKind::Config("message must not be empty".into()));
        }
        if self.tamper_suffix.is_empty() {
            bail!(ErrorKind::Config("tamper_suffix must change the message".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let cfg = ScenarioConfig::default();
        assert_eq!(cfg.message, "hello");
        assert_eq!(cfg.tamper_suffix, " [MODIFIED BY ATTACK]");
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ScenarioConfig::from_json(r#"{ "message": "pay bob 5" }"#).unwrap();
        assert_eq!(cfg.message, "pay bob 5");
        assert_eq!(cfg.tamper_suffix, TAMPER_SUFFIX);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(ScenarioConfig::from_json(r#"{ "key_bits": 1024 }"#).is_err());
    }

    #[test]
    fn rejects_empty_message() {
        let err = ScenarioConfig::from_json(r#"{ "message": "" }"#).unwrap_err();
        match *err.kind() {
            ErrorKind::Config(_) => {}
            ref other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("countersign-{}.json", std::process::id()));
        {
            let mut f = File::create(&path).unwrap();
            write!(f, r#"{{ "tamper_suffix": " (edited)", "log_filter": "debug" }}"#).unwrap();
        }

        let cfg = ScenarioConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(cfg.message, "hello");
        assert_eq!(cfg.tamper_suffix, " (edited)");
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn load_missing_file() {
        let err = ScenarioConfig::load(Path::new("/nonexistent/countersign.json")).unwrap_err();
        match *err.kind() {
            ErrorKind::Config(_) => {}
            ref other => panic!("unexpected error: {}", other),
        }
    }
}
