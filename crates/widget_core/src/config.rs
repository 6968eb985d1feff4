//! Widget configuration

use crate::{AcceptFilter, FieldValue, WidgetError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};
use widget_log::LogConfig;

/// Complete widget configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Initial selection
    #[serde(serialize_with = "serialize_present_slots")]
    pub value: Option<FieldValue>,
    pub decode_policy: DecodePolicy,
    pub props: WidgetProps,
    pub preview: PreviewConfig,
    pub logging: LogConfig,
}

/// Options supplied by the owning form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetProps {
    pub id: String,
    pub multiple: bool,
    pub readonly: bool,
    pub disabled: bool,
    pub autofocus: bool,
    pub options: WidgetOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Mime/extension filter hint for the native picker
    pub accept: Option<String>,
}

impl WidgetProps {
    pub fn picker_enabled(&self) -> bool {
        !(self.readonly || self.disabled)
    }

    pub fn accept_filter(&self) -> AcceptFilter {
        self.options
            .accept
            .as_deref()
            .map(AcceptFilter::parse)
            .unwrap_or_default()
    }
}

/// Overlay presentation, handed through to the overlay collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub modal_width: u32,
    pub animation: String,
    pub show_mask: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            modal_width: 1000,
            animation: "slideUp".to_string(),
            show_mask: false,
        }
    }
}

/// What to do with malformed blobs in the initial value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodePolicy {
    /// Fail construction
    #[serde(rename = "strict")]
    Strict,
    /// Skip the entry with a warning
    #[serde(rename = "lenient")]
    Lenient,
}

impl Default for DecodePolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            DecodePolicy::Strict
        } else {
            DecodePolicy::Lenient
        }
    }
}

/// TOML has no null: missing slots are left out of a saved list
fn serialize_present_slots<S: Serializer>(
    value: &Option<FieldValue>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(FieldValue::Multiple(slots)) => {
            let present: Vec<&String> = slots.iter().flatten().collect();
            serializer.serialize_some(&present)
        }
        other => other.serialize(serializer),
    }
}

impl WidgetConfig {
    /// Load configuration from `path`, or from the per-user file
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            config
        } else if path.is_some() {
            anyhow::bail!("Configuration file not found: {}", config_path.display());
        } else {
            tracing::info!("Using default configuration");
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the per-user file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "FileWidget", "FileWidget")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        if self.preview.modal_width == 0 {
            return Err(WidgetError::Config("preview.modal_width must be positive".into()));
        }
        if let Some(FieldValue::Multiple(slots)) = &self.value {
            let present = slots.iter().flatten().count();
            if !self.props.multiple && present > 1 {
                return Err(WidgetError::Config(format!(
                    "{present} initial values given but props.multiple is false"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert!(!config.props.multiple);
        assert!(!config.props.autofocus);
        assert!(config.props.picker_enabled());
        assert_eq!(config.preview.modal_width, 1000);
        assert_eq!(config.preview.animation, "slideUp");
        assert!(config.value.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config: WidgetConfig = toml::from_str(
            r#"
            decode_policy = "lenient"
            value = ["data:image/png;name=a.png;base64,AA=="]

            [props]
            id = "root_attachment"
            multiple = true
            readonly = true

            [props.options]
            accept = "image/*"
            "#,
        )
        .unwrap();

        assert_eq!(config.props.id, "root_attachment");
        assert!(config.props.multiple);
        assert!(!config.props.picker_enabled());
        assert!(config.props.accept_filter().accepts("x.png", "image/png"));
        assert_eq!(config.decode_policy, DecodePolicy::Lenient);
        assert!(matches!(config.value, Some(FieldValue::Multiple(ref v)) if v.len() == 1));
        assert_eq!(config.preview, PreviewConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = WidgetConfig::default();
        config.props.multiple = true;
        config.value = Some(FieldValue::Single("data:text/plain;name=a.txt;base64,".into()));
        config.decode_policy = DecodePolicy::Strict;
        config.save_to(&path).unwrap();

        let loaded = WidgetConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.props, config.props);
        assert_eq!(loaded.value, config.value);
        assert_eq!(loaded.decode_policy, DecodePolicy::Strict);
    }

    #[test]
    fn test_save_sparse_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = WidgetConfig::default();
        config.props.multiple = true;
        config.value = Some(FieldValue::Multiple(vec![
            None,
            Some("data:image/png;name=a.png;base64,".into()),
            None,
            Some("data:image/png;name=b.png;base64,".into()),
        ]));
        config.save_to(&path).unwrap();

        let loaded = WidgetConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(
            loaded.value,
            Some(FieldValue::Multiple(vec![
                Some("data:image/png;name=a.png;base64,".into()),
                Some("data:image/png;name=b.png;base64,".into()),
            ]))
        );
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        assert!(WidgetConfig::load(Some(missing.as_path())).is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = WidgetConfig::default();
        config.value = Some(vec!["data:a".to_string(), "data:b".to_string()].into());
        assert!(matches!(config.validate(), Err(WidgetError::Config(_))));

        config.props.multiple = true;
        assert!(config.validate().is_ok());

        config.preview.modal_width = 0;
        assert!(config.validate().is_err());
    }
}
