//! Configuration provider using Figment for formwork

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use formwork_layout::FormConfig;
use tracing::{debug, trace};

use crate::{
    discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery},
    error::ConfigError,
    ConfigResult,
};

/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "FORMWORK_";

/// Loads [`FormConfig`] from every configuration source.
///
/// Sources, later overriding earlier:
/// 1. `FormConfig::default()`
/// 2. `~/.formwork/form.*`
/// 3. `./.formwork/form.*`
/// 4. an explicit file given by the host
/// 5. `FORMWORK_*` environment variables (`__` separates nested keys)
///
/// Nothing is cached; every load reads the files again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
    explicit: Option<PathBuf>,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file that overrides every discovered one.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    pub fn with_discovery(mut self, discovery: FileDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn load_form_config(&self) -> ConfigResult<FormConfig> {
        let config: FormConfig = self.build_figment()?.extract()?;
        debug!(
            label_position = ?config.label_position,
            span_strategy = ?config.span_strategy,
            "Loaded form configuration"
        );
        Ok(config)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(FormConfig::default()));

        for file in self.discovery.discover_all() {
            trace!("Loading config file: {} ({:?})", file.path.display(), file.format);
            figment = figment.merge(Self::file_provider(&file));
        }

        if let Some(path) = &self.explicit {
            figment = figment.merge(Self::explicit_file(path)?);
        }

        Ok(figment.merge(Self::env_vars()))
    }

    fn explicit_file(path: &Path) -> ConfigResult<Figment> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let format = ConfigFormat::from_path(path)?;
        let file = ConfigFile::new(path.to_path_buf(), format, ConfigScope::Explicit);
        trace!("Loading explicit config file: {}", path.display());
        Ok(Self::file_provider(&file))
    }

    fn file_provider(file: &ConfigFile) -> Figment {
        let path = &file.path;
        match file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }

    fn env_vars() -> Figment {
        Figment::from(
            Env::prefixed(ENV_PREFIX)
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_layout::{LabelPosition, SpanStrategy};
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn isolated(dir: &TempDir) -> ConfigProvider {
        ConfigProvider::new().with_discovery(FileDiscovery::with_directories(
            Some(dir.path().join("project")),
            Some(dir.path().join("global")),
        ))
    }

    #[test]
    #[serial]
    fn test_defaults_without_sources() {
        let temp_dir = TempDir::new().unwrap();
        let config = isolated(&temp_dir).load_form_config().unwrap();
        assert_eq!(config.label_position, LabelPosition::Top);
        assert!(config.input_class_name.is_empty());
        assert_eq!(config.span_strategy, SpanStrategy::Grid { columns: 12 });
    }

    #[test]
    #[serial]
    fn test_explicit_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = isolated(&temp_dir)
            .with_file(temp_dir.path().join("nope.toml"))
            .load_form_config()
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    #[serial]
    fn test_explicit_file_unsupported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("form.ini");
        fs::write(&path, "label_position=left").unwrap();
        let err = isolated(&temp_dir)
            .with_file(path)
            .load_form_config()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    #[serial]
    fn test_bad_value_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("form.toml");
        fs::write(&path, "label_position = \"diagonal\"").unwrap();
        let err = isolated(&temp_dir)
            .with_file(path)
            .load_form_config()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    #[serial]
    fn test_env_overrides_nested_keys() {
        let temp_dir = TempDir::new().unwrap();
        std::env::set_var("FORMWORK_SPAN_STRATEGY__KIND", "percent");
        std::env::set_var("FORMWORK_INPUT_CLASS_NAME", "from-env");

        let config = isolated(&temp_dir).load_form_config();

        std::env::remove_var("FORMWORK_SPAN_STRATEGY__KIND");
        std::env::remove_var("FORMWORK_INPUT_CLASS_NAME");

        let config = config.unwrap();
        assert_eq!(config.span_strategy, SpanStrategy::Percent);
        assert_eq!(config.input_class_name, "from-env");
    }
}
