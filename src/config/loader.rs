//! Layered settings resolution.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::error;

use super::sources::{EMAIL_SECTION, EnvSource, IniSource, PAYSLIP_SECTION, SettingsSource};
use super::types::{Branding, Credential, MailSettings, Margins, Settings, TextColor};
use crate::error::ConfigError;

/// Where the CLI looks for settings unless `--config` says otherwise.
pub const DEFAULT_CONFIG_PATH: &str = "config.ini";

/// Shown to the operator when the settings file is absent.
pub const EXAMPLE_CONFIG: &str = r#"
[EMAIL]
SMTP_SERVER = smtp.gmail.com
SMTP_PORT = 587
FROM_EMAIL = "payroll@example.com"
EMAIL_PASSWORD = "app-password"

[PAYSLIP]
COMPANY_NAME = "Example Company"
DEFAULT_STYLE_HEADING = red
DEFAULT_STYLE_BODY = black
PDF_MARGIN_LEFT = 0.75
PDF_MARGIN_RIGHT = 0.75
PDF_MARGIN_TOP = 1.0
PDF_MARGIN_BOTTOM = 0.5
"#;

const FALLBACK_SMTP_SERVER: &str = "smtp.gmail.com";
const FALLBACK_SMTP_PORT: &str = "587";

/// Resolves [`Settings`] from an ordered list of sources.
///
/// For every key the first source that holds it wins; keys no source holds
/// fall back to a documented constant. The sender address and credential
/// have no fallback, so a run without them is rejected up front.
///
/// ```no_run
/// use payslip_mailer::config::ConfigLoader;
///
/// let settings = ConfigLoader::from_file("config.ini")?;
/// println!("relay: {}", settings.mail.relay_host);
/// # Ok::<(), payslip_mailer::error::ConfigError>(())
/// ```
pub struct ConfigLoader {
    sources: Vec<Box<dyn SettingsSource>>,
}

impl ConfigLoader {
    pub fn new(sources: Vec<Box<dyn SettingsSource>>) -> Self {
        Self { sources }
    }

    /// Loads the settings file at `path`, with process environment overrides.
    ///
    /// A missing file is an error whose help text carries [`EXAMPLE_CONFIG`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
        Self::from_file_with_env(path, EnvSource::from_process())
    }

    pub fn from_file_with_env<P: AsRef<Path>>(
        path: P,
        env: EnvSource,
    ) -> Result<Settings, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            error!(path = %path.display(), "configuration file not found");
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
                example: EXAMPLE_CONFIG,
            });
        }

        let file = IniSource::load(path)?;
        Self::new(vec![Box::new(env), Box::new(file)]).resolve()
    }

    /// Resolves and validates every field.
    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let relay_host = self.lookup(EMAIL_SECTION, "SMTP_SERVER", Some(FALLBACK_SMTP_SERVER));
        let relay_port = self.lookup(EMAIL_SECTION, "SMTP_PORT", Some(FALLBACK_SMTP_PORT));
        let sender = self.lookup(EMAIL_SECTION, "FROM_EMAIL", None);
        let credential = self.lookup(EMAIL_SECTION, "EMAIL_PASSWORD", None);

        let missing: Vec<String> = [
            ("SMTP_SERVER", &relay_host),
            ("SMTP_PORT", &relay_port),
            ("FROM_EMAIL", &sender),
            ("EMAIL_PASSWORD", &credential),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key.to_string())
        .collect();

        if !missing.is_empty() {
            error!(keys = %missing.join(", "), "missing required configuration");
            return Err(ConfigError::Missing { keys: missing });
        }

        let relay_port = relay_port.parse::<u16>().map_err(|_| ConfigError::Invalid {
            key: "SMTP_PORT".to_string(),
            value: relay_port.clone(),
            reason: "expected an integer port".to_string(),
        })?;

        let mail = MailSettings {
            relay_host,
            relay_port,
            sender,
            credential: Credential::new(credential),
        };

        let defaults = Branding::default();
        let branding = Branding {
            organization: self.lookup(
                PAYSLIP_SECTION,
                "COMPANY_NAME",
                Some(defaults.organization.as_str()),
            ),
            heading_color: self.color("DEFAULT_STYLE_HEADING", defaults.heading_color)?,
            body_color: self.color("DEFAULT_STYLE_BODY", defaults.body_color)?,
            margins: Margins {
                left: self.margin("PDF_MARGIN_LEFT", defaults.margins.left)?,
                right: self.margin("PDF_MARGIN_RIGHT", defaults.margins.right)?,
                top: self.margin("PDF_MARGIN_TOP", defaults.margins.top)?,
                bottom: self.margin("PDF_MARGIN_BOTTOM", defaults.margins.bottom)?,
            },
        };

        Ok(Settings { mail, branding })
    }

    /// First source holding `key`, else `fallback`, else empty.
    fn lookup(&self, section: &str, key: &str, fallback: Option<&str>) -> String {
        self.sources
            .iter()
            .find_map(|source| source.get(section, key))
            .or_else(|| fallback.map(str::to_string))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    fn color(&self, key: &str, fallback: TextColor) -> Result<TextColor, ConfigError> {
        match self.sources.iter().find_map(|s| s.get(PAYSLIP_SECTION, key)) {
            None => Ok(fallback),
            Some(value) => TextColor::from_str(&value).map_err(|_| ConfigError::Invalid {
                key: key.to_string(),
                value,
                reason: "unknown colour name".to_string(),
            }),
        }
    }

    fn margin(&self, key: &str, fallback: Decimal) -> Result<Decimal, ConfigError> {
        let Some(value) = self.sources.iter().find_map(|s| s.get(PAYSLIP_SECTION, key)) else {
            return Ok(fallback);
        };
        match Decimal::from_str(value.trim()) {
            Ok(inches) if !inches.is_sign_negative() => Ok(inches),
            Ok(_) => Err(ConfigError::Invalid {
                key: key.to_string(),
                value,
                reason: "margins cannot be negative".to_string(),
            }),
            Err(_) => Err(ConfigError::Invalid {
                key: key.to_string(),
                value,
                reason: "expected a decimal number of inches".to_string(),
            }),
        }
    }
}
