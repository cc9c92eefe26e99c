//! Report configuration.

use crate::error::ReportError;
use chrono::format::{Item, StrftimeItems};
use nuzum_templates::DEFAULT_DATE_FORMAT;
use nuzum_types::PageSize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// strftime pattern for printed dates.
    pub date_format: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self { date_format: DEFAULT_DATE_FORMAT.to_string() }
    }
}

/// Settings for a [`crate::ReportContext`]. Every field has a default, so
/// `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory scanned for TrueType fonts.
    pub fonts_dir: PathBuf,
    /// Logical font name tried before the built-in preference list.
    pub preferred_font: Option<String>,
    /// Always render with the sanitizing Latin adapter.
    pub emergency_mode: bool,
    pub page_size: PageSize,
    pub locale: LocaleConfig,
    /// Root that logo and signature paths are resolved against.
    pub assets_root: PathBuf,
    /// Relative to `assets_root`.
    pub logo_path: Option<String>,
    /// Consult OS fonts when `fonts_dir` has no Arabic face.
    pub system_fonts: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fonts_dir: PathBuf::from("assets/fonts"),
            preferred_font: None,
            emergency_mode: false,
            page_size: PageSize::A4,
            locale: LocaleConfig::default(),
            assets_root: PathBuf::from("assets"),
            logo_path: Some("images/logo.png".to_string()),
            system_fonts: false,
        }
    }
}

impl ReportConfig {
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let config: ReportConfig = serde_json::from_str(json)?;
        let date_format = &config.locale.date_format;
        if date_format.trim().is_empty() {
            return Err(ReportError::Config("locale.date_format must not be empty".to_string()));
        }
        if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ReportError::Config(format!("locale.date_format '{}' is not a valid strftime pattern", date_format)));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ReportConfig::from_json("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.logo_path.as_deref(), Some("images/logo.png"));
        assert_eq!(config.fonts_dir, PathBuf::from("assets/fonts"));
    }

    #[test]
    fn partial_override() {
        let config = ReportConfig::from_json(
            r#"{"emergency_mode": true, "page_size": "letter", "locale": {"date_format": "%d/%m/%Y"}, "logo_path": null}"#,
        )
        .unwrap();
        assert!(config.emergency_mode);
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.locale.date_format, "%d/%m/%Y");
        assert!(config.logo_path.is_none());
        assert_eq!(config.assets_root, PathBuf::from("assets"));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(ReportConfig::from_json("{"), Err(ReportError::Config(_))));
        assert!(matches!(
            ReportConfig::from_json(r#"{"locale": {"date_format": " "}}"#),
            Err(ReportError::Config(_))
        ));
    }

    #[test]
    fn unknown_strftime_specifier_is_rejected() {
        let err = ReportConfig::from_json(r#"{"locale": {"date_format": "%Q"}}"#).unwrap_err();
        assert!(matches!(&err, ReportError::Config(msg) if msg.contains("%Q")));
        assert!(ReportConfig::from_json(r#"{"locale": {"date_format": "%d %B %Y"}}"#).is_ok());
    }
}
