use crate::classify::RuleSet;
use crate::error::Result;
use std::path::PathBuf;
use xdg::BaseDirectories;

pub const RULES_ENV: &str = "SEVERITY_RULES";

pub struct Config {
    pub rules_path: Option<PathBuf>,
}

impl Config {
    /// Resolve the rules file: explicit path, then `SEVERITY_RULES`, then
    /// `$XDG_CONFIG_HOME/severity/rules.toml` if it exists.
    pub fn new(rules_override: Option<PathBuf>) -> Result<Self> {
        let rules_path = resolve_rules_path(rules_override, std::env::var(RULES_ENV).ok(), || {
            BaseDirectories::with_prefix("severity")
                .ok()
                .and_then(|xdg| xdg.find_config_file("rules.toml"))
        });

        Ok(Self { rules_path })
    }

    /// Rules from the resolved file, or the built-in thresholds when there is none.
    pub fn load_rules(&self) -> Result<RuleSet> {
        match &self.rules_path {
            Some(path) => {
                log::debug!("Loading rules from {}", path.display());
                RuleSet::from_file(path)
            }
            None => {
                log::debug!("No rules file found, using built-in rules");
                Ok(RuleSet::default())
            }
        }
    }
}

/// First of: the explicit path, a non-empty env value, the XDG lookup.
/// `xdg_lookup` only runs when neither of the others is set.
fn resolve_rules_path(
    rules_override: Option<PathBuf>,
    env_value: Option<String>,
    xdg_lookup: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = rules_override {
        log::debug!("Rules path from --rules: {}", path.display());
        return Some(path);
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        log::debug!("Rules path from {}: {}", RULES_ENV, value);
        return Some(PathBuf::from(value));
    }
    xdg_lookup()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeverityError;

    #[test]
    fn test_config_with_override() {
        let custom_path = PathBuf::from("/tmp/rules.toml");
        let config = Config::new(Some(custom_path.clone())).unwrap();
        assert_eq!(config.rules_path, Some(custom_path));
    }

    fn no_xdg() -> Option<PathBuf> {
        panic!("XDG lookup should not run")
    }

    #[test]
    fn test_resolve_flag_beats_env() {
        let path = resolve_rules_path(
            Some(PathBuf::from("/flag/rules.toml")),
            Some("/env/rules.toml".to_string()),
            no_xdg,
        );
        assert_eq!(path, Some(PathBuf::from("/flag/rules.toml")));
    }

    #[test]
    fn test_resolve_env_beats_xdg() {
        let path = resolve_rules_path(None, Some("/env/rules.toml".to_string()), no_xdg);
        assert_eq!(path, Some(PathBuf::from("/env/rules.toml")));
    }

    #[test]
    fn test_resolve_falls_back_to_xdg() {
        let path = resolve_rules_path(None, None, || Some(PathBuf::from("/xdg/severity/rules.toml")));
        assert_eq!(path, Some(PathBuf::from("/xdg/severity/rules.toml")));

        let path = resolve_rules_path(None, Some(String::new()), || {
            Some(PathBuf::from("/xdg/severity/rules.toml"))
        });
        assert_eq!(path, Some(PathBuf::from("/xdg/severity/rules.toml")));
    }

    #[test]
    fn test_resolve_nothing_found() {
        assert_eq!(resolve_rules_path(None, None, || None), None);
    }

    #[test]
    fn test_load_rules_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("rules.toml");
        std::fs::write(&path, "[rules]\nsevere_above_symptoms = 6\n").unwrap();

        let config = Config::new(Some(path)).unwrap();
        let rules = config.load_rules().unwrap();
        assert_eq!(rules.severe_above_symptoms, 6);
        assert_eq!(rules.mild_max_symptoms, 2);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(temp_dir.path().join("absent.toml"))).unwrap();
        assert!(matches!(config.load_rules(), Err(SeverityError::Io(_))));
    }

    #[test]
    fn test_no_file_uses_defaults() {
        let config = Config { rules_path: None };
        assert_eq!(config.load_rules().unwrap(), RuleSet::default());
    }
}
