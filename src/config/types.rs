//! Resolved settings, read-only for the rest of the run.

use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use std::fmt;
use std::str::FromStr;

/// Everything the pipeline needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub mail: MailSettings,
    pub branding: Branding,
}

/// Relay and sender identity.
#[derive(Debug, Clone, PartialEq)]
pub struct MailSettings {
    pub relay_host: String,
    pub relay_port: u16,
    pub sender: String,
    pub credential: Credential,
}

/// The sender's relay password. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Organization name and document styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    pub organization: String,
    pub heading_color: TextColor,
    pub body_color: TextColor,
    pub margins: Margins,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            organization: "Your Company Name".to_string(),
            heading_color: TextColor::Red,
            body_color: TextColor::Black,
            margins: Margins::default(),
        }
    }
}

/// Page insets in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: Decimal,
    pub right: Decimal,
    pub top: Decimal,
    pub bottom: Decimal,
}

impl Margins {
    /// Converts one inset to millimetres for page geometry.
    pub fn to_mm(inches: Decimal) -> f32 {
        (inches * dec!(25.4)).to_f32().unwrap_or_default()
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: dec!(0.75),
            right: dec!(0.75),
            top: dec!(1.0),
            bottom: dec!(0.5),
        }
    }
}

/// Named text colours accepted in the `[PAYSLIP]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    Red,
    Blue,
    Green,
    Navy,
    Grey,
    White,
    WhiteSmoke,
}

impl TextColor {
    /// RGB components in the 0.0..=1.0 range.
    pub fn rgb(self) -> (f32, f32, f32) {
        match self {
            TextColor::Black => (0.0, 0.0, 0.0),
            TextColor::Red => (1.0, 0.0, 0.0),
            TextColor::Blue => (0.0, 0.0, 1.0),
            TextColor::Green => (0.0, 0.5, 0.0),
            TextColor::Navy => (0.0, 0.0, 0.5),
            TextColor::Grey => (0.5, 0.5, 0.5),
            TextColor::White => (1.0, 1.0, 1.0),
            TextColor::WhiteSmoke => (0.96, 0.96, 0.96),
        }
    }
}

impl FromStr for TextColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "black" => Ok(TextColor::Black),
            "red" => Ok(TextColor::Red),
            "blue" => Ok(TextColor::Blue),
            "green" => Ok(TextColor::Green),
            "navy" => Ok(TextColor::Navy),
            "grey" | "gray" => Ok(TextColor::Grey),
            "white" => Ok(TextColor::White),
            "whitesmoke" => Ok(TextColor::WhiteSmoke),
            _ => Err(ConfigError::Invalid {
                key: "colour".to_string(),
                value: s.to_string(),
                reason: "unknown colour name".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let mail = MailSettings {
            relay_host: "smtp.example.com".to_string(),
            relay_port: 587,
            sender: "payroll@example.com".to_string(),
            credential: Credential::new("hunter2"),
        };
        let printed = format!("{mail:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("Credential(***)"));
    }

    #[test]
    fn test_default_margins() {
        let margins = Margins::default();
        assert_eq!(margins.left, dec!(0.75));
        assert_eq!(margins.top, dec!(1.0));
        assert_eq!(margins.bottom, dec!(0.5));
        assert!((Margins::to_mm(margins.top) - 25.4).abs() < 0.001);
    }

    #[test]
    fn test_colour_names_are_case_insensitive() {
        assert_eq!("Red".parse::<TextColor>().unwrap(), TextColor::Red);
        assert_eq!(" gray ".parse::<TextColor>().unwrap(), TextColor::Grey);
        assert!("chartreuse".parse::<TextColor>().is_err());
    }
}
