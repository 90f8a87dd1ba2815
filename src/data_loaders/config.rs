use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use super::yaml::load_yaml;
use crate::style::Style;

#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub debug: bool,
    pub log_level: String,
    pub logging: LoggingSettings,
    pub defaults: DefaultSettings,
}

#[derive(Debug, Clone, Default)]
pub struct LoggingSettings {
    /// Append log lines to a file as well as stderr.
    pub file: bool,
    /// Overrides `~/.deskpaper/deskpaper.log`.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct DefaultSettings {
    /// Used when `--screen` is not given.
    pub screen: Option<String>,
    /// Applied when an image is set without `--style`.
    pub style: Style,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "warn".to_string(),
            logging: LoggingSettings::default(),
            defaults: DefaultSettings::default(),
        }
    }
}

impl DeskConfig {
    pub fn load(path: &Path) -> Option<Self> {
        let value = load_yaml(path)?;
        Self::from_yaml(&value)
    }

    pub fn from_yaml(root: &Value) -> Option<Self> {
        let map = root.as_mapping()?;
        let mut config = Self::default();

        config.debug = bool_any(map, &["debug", "debug_mode"]).unwrap_or(config.debug);
        if let Some(level) = str_at(map, "log_level") {
            config.log_level = level.trim().to_lowercase();
        }

        if let Some(logging) = mapping_at(map, "logging") {
            config.logging.file = bool_any(logging, &["file", "to_file", "enabled"])
                .unwrap_or(config.logging.file);
            config.logging.path = str_at(logging, "path")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from);
            if let Some(level) = str_at(logging, "level") {
                config.log_level = level.trim().to_lowercase();
            }
        }

        if let Some(defaults) = mapping_at(map, "defaults") {
            config.defaults.screen = str_any(defaults, &["screen", "monitor"])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            config.defaults.style = str_at(defaults, "style")
                .map(Style::parse)
                .unwrap_or_default();
        }

        Some(config)
    }

    /// Log file to open, if file logging is on.
    pub fn log_file(&self) -> Option<PathBuf> {
        if !self.logging.file {
            return None;
        }
        Some(self.logging.path.clone().unwrap_or_else(crate::paths::log_path))
    }
}

fn bool_at(map: &Mapping, key: &str) -> Option<bool> {
    map.get(Value::String(key.to_string()))?.as_bool()
}

fn bool_any(map: &Mapping, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|k| bool_at(map, k))
}

fn str_at<'a>(map: &'a Mapping, key: &str) -> Option<&'a str> {
    map.get(Value::String(key.to_string()))?.as_str()
}

fn str_any<'a>(map: &'a Mapping, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| str_at(map, k))
}

fn mapping_at<'a>(map: &'a Mapping, key: &str) -> Option<&'a Mapping> {
    map.get(Value::String(key.to_string()))?.as_mapping()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> DeskConfig {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        DeskConfig::from_yaml(&value).unwrap()
    }

    #[test]
    fn empty_mapping_gives_defaults() {
        let config = parse("{}");
        assert!(!config.debug);
        assert_eq!(config.log_level, "warn");
        assert!(config.log_file().is_none());
        assert!(config.defaults.screen.is_none());
        assert_eq!(config.defaults.style, Style::Current);
    }

    #[test]
    fn reads_every_section() {
        let config = parse(
            r#"
debug: true
log_level: INFO
logging:
  file: true
  path: /var/log/deskpaper.log
defaults:
  screen: "  \\\\.\\DISPLAY2 "
  style: Fit
"#,
        );
        assert!(config.debug);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file(), Some(PathBuf::from("/var/log/deskpaper.log")));
        assert_eq!(config.defaults.screen.as_deref(), Some(r"\\.\DISPLAY2"));
        assert_eq!(config.defaults.style, Style::Fit);
    }

    #[test]
    fn aliases_are_accepted() {
        let config = parse("debug_mode: true\ndefaults:\n  monitor: \"1\"\n");
        assert!(config.debug);
        assert_eq!(config.defaults.screen.as_deref(), Some("1"));
    }

    #[test]
    fn blank_screen_counts_as_unset() {
        let config = parse("defaults:\n  screen: \"\"\n");
        assert!(config.defaults.screen.is_none());
    }

    #[test]
    fn unknown_style_is_kept_for_later_validation() {
        let config = parse("defaults:\n  style: zoom\n");
        assert!(!config.defaults.style.is_valid());
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let value: Value = serde_yaml::from_str("- a\n- b\n").unwrap();
        assert!(DeskConfig::from_yaml(&value).is_none());
    }
}
