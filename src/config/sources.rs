//! Layers the loader consults, highest precedence first.

use crate::error::ConfigError;
use ini::{Ini, ParseOption};
use std::collections::HashMap;
use std::path::Path;

/// Section holding relay and sender settings.
pub const EMAIL_SECTION: &str = "EMAIL";
/// Section holding branding and page settings.
pub const PAYSLIP_SECTION: &str = "PAYSLIP";

/// Keys that the process environment may override.
pub const ENV_OVERRIDES: [&str; 4] = ["SMTP_SERVER", "SMTP_PORT", "FROM_EMAIL", "EMAIL_PASSWORD"];

/// A key/value layer addressed by section and key.
pub trait SettingsSource {
    fn get(&self, section: &str, key: &str) -> Option<String>;
}

/// Environment overrides for the `[EMAIL]` keys.
///
/// Empty variables count as unset so they never mask the file value.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshots the override keys from the process environment.
    pub fn from_process() -> Self {
        Self::from_pairs(
            ENV_OVERRIDES
                .iter()
                .filter_map(|key| std::env::var(key).ok().map(|value| (*key, value))),
        )
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, v)| ENV_OVERRIDES.contains(&k.as_str()) && !v.trim().is_empty())
            .collect();
        Self { vars }
    }
}

impl SettingsSource for EnvSource {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        if !section.eq_ignore_ascii_case(EMAIL_SECTION) {
            return None;
        }
        self.vars.get(key).cloned()
    }
}

/// The INI-shaped settings file.
pub struct IniSource {
    ini: Ini,
}

impl IniSource {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file_opt(path, parse_option()).map_err(|e| {
            ConfigError::Unreadable {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { ini })
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str_opt(content, parse_option()).map_err(|e| {
            ConfigError::Unreadable {
                path: "<inline>".to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { ini })
    }
}

impl SettingsSource for IniSource {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.ini
            .get_from(Some(section), key)
            .map(|value| unquote(value.trim()).to_string())
    }
}

/// Backslashes are literal so credentials reach the relay unchanged.
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_source_only_answers_email_section() {
        let env = EnvSource::from_pairs([("SMTP_SERVER", "relay.example.com")]);
        assert_eq!(
            env.get(EMAIL_SECTION, "SMTP_SERVER").as_deref(),
            Some("relay.example.com")
        );
        assert_eq!(env.get(PAYSLIP_SECTION, "SMTP_SERVER"), None);
    }

    #[test]
    fn test_env_source_ignores_empty_and_unknown_vars() {
        let env = EnvSource::from_pairs([("FROM_EMAIL", "  "), ("HOME", "/root")]);
        assert_eq!(env.get(EMAIL_SECTION, "FROM_EMAIL"), None);
        assert_eq!(env.get(EMAIL_SECTION, "HOME"), None);
    }

    #[test]
    fn test_ini_source_strips_quotes() {
        let source = IniSource::parse(
            "[EMAIL]\nFROM_EMAIL = \"payroll@example.com\"\n\n[PAYSLIP]\nCOMPANY_NAME = 'Acme'\n",
        )
        .unwrap();
        assert_eq!(
            source.get(EMAIL_SECTION, "FROM_EMAIL").as_deref(),
            Some("payroll@example.com")
        );
        assert_eq!(source.get(PAYSLIP_SECTION, "COMPANY_NAME").as_deref(), Some("Acme"));
        assert_eq!(source.get(PAYSLIP_SECTION, "PDF_MARGIN_LEFT"), None);
    }

    #[test]
    fn test_ini_source_keeps_backslashes_and_comment_marks() {
        let source = IniSource::parse(
            "[EMAIL]\nEMAIL_PASSWORD = abc#def;ghi\\jkl\nFROM_EMAIL = \"p\\ss#1\"\n",
        )
        .unwrap();
        assert_eq!(
            source.get(EMAIL_SECTION, "EMAIL_PASSWORD").as_deref(),
            Some("abc#def;ghi\\jkl")
        );
        assert_eq!(
            source.get(EMAIL_SECTION, "FROM_EMAIL").as_deref(),
            Some("p\\ss#1")
        );
    }

    #[test]
    fn test_load_from_file_keeps_backslashes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[EMAIL]\nEMAIL_PASSWORD = p\\ss\n").unwrap();

        let source = IniSource::load(&path).unwrap();
        assert_eq!(
            source.get(EMAIL_SECTION, "EMAIL_PASSWORD").as_deref(),
            Some("p\\ss")
        );
    }

    #[test]
    fn test_unquote_leaves_unbalanced_values() {
        assert_eq!(unquote("\"abc"), "\"abc");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("plain"), "plain");
    }
}
