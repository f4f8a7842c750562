//! Settings loading.
//!
//! Settings come from an INI file (`[EMAIL]` and `[PAYSLIP]` sections) with
//! environment overrides for the relay keys. See [`ConfigLoader`] for the
//! precedence rules.

mod loader;
mod sources;
mod types;

pub use loader::{ConfigLoader, DEFAULT_CONFIG_PATH, EXAMPLE_CONFIG};
pub use sources::{EMAIL_SECTION, ENV_OVERRIDES, EnvSource, IniSource, PAYSLIP_SECTION, SettingsSource};
pub use types::{Branding, Credential, MailSettings, Margins, Settings, TextColor};
