//! Configuration file discovery
//!
//! Finds `form.{toml,yaml,yml,json}` in the global (`~/.formwork/`) and project
//! (`./.formwork/`) configuration directories, lowest precedence first.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::error::ConfigError;

/// Name of the configuration directory in the home and project directories.
pub const CONFIG_DIR_NAME: &str = ".formwork";

/// File names searched in each directory, in merge order.
const FILE_NAMES: &[&str] = &["form.toml", "form.yaml", "form.yml", "form.json"];

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
    pub scope: ConfigScope,
    /// Higher values take precedence
    pub priority: u8,
}

impl ConfigFile {
    pub fn new(path: PathBuf, format: ConfigFormat, scope: ConfigScope) -> Self {
        let priority = scope.priority();
        Self {
            path,
            format,
            scope,
            priority,
        }
    }
}

/// File format detected from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a path, failing on a missing or unknown extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| ConfigError::UnsupportedFormat {
            format: if ext.is_empty() {
                path.display().to_string()
            } else {
                ext.to_string()
            },
        })
    }
}

/// Where a configuration file was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `~/.formwork/`
    Global,
    /// `./.formwork/`
    Project,
    /// A file named by the host, e.g. `--config`
    Explicit,
}

impl ConfigScope {
    pub fn priority(self) -> u8 {
        match self {
            Self::Global => 10,
            Self::Project => 20,
            Self::Explicit => 30,
        }
    }
}

/// File discovery service for finding configuration files
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    project_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Directories are resolved at discovery time, so a changed working
    /// directory is honoured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use fixed directories instead of the home and working directories.
    pub fn with_directories(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            global_dir,
        }
    }

    /// Discover all configuration files, lowest priority first.
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let project_dir = self.project_dir.clone().or_else(Self::resolve_project_dir);
        let global_dir = self.global_dir.clone().or_else(Self::resolve_global_dir);

        let mut files = Vec::new();
        if let Some(dir) = &global_dir {
            files.extend(self.search_directory(dir, ConfigScope::Global));
        }
        if let Some(dir) = &project_dir {
            files.extend(self.search_directory(dir, ConfigScope::Project));
        }
        files.sort_by_key(|f| f.priority);

        debug!("Discovered {} configuration files", files.len());
        for file in &files {
            trace!("Found config: {} ({:?})", file.path.display(), file.format);
        }
        files
    }

    fn search_directory(&self, dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
        if !dir.exists() {
            debug!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }
        if !dir.is_dir() {
            warn!("Path exists but is not a directory: {}", dir.display());
            return Vec::new();
        }

        FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .filter(|candidate| candidate.is_file())
            .filter_map(|candidate| self.classify_file(&candidate, scope))
            .collect()
    }

    fn classify_file(&self, path: &Path, scope: ConfigScope) -> Option<ConfigFile> {
        let filename = path.file_name()?.to_str()?;
        if !FILE_NAMES.contains(&filename) {
            return None;
        }
        let format = ConfigFormat::from_extension(path.extension()?.to_str()?)?;
        Some(ConfigFile::new(path.to_path_buf(), format, scope))
    }

    fn resolve_project_dir() -> Option<PathBuf> {
        let dir = std::env::current_dir().ok()?.join(CONFIG_DIR_NAME);
        dir.is_dir().then_some(dir)
    }

    fn resolve_global_dir() -> Option<PathBuf> {
        let dir = dirs::home_dir()?.join(CONFIG_DIR_NAME);
        dir.is_dir().then_some(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("YML"),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_extension("Json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("txt"), None);
        assert_eq!(ConfigFormat::from_extension(""), None);
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/form.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
        let err = ConfigFormat::from_path(Path::new("a/form.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { format } if format == "ini"));
        assert!(ConfigFormat::from_path(Path::new("a/form")).is_err());
    }

    #[test]
    fn test_config_scope_priority() {
        assert!(ConfigScope::Project.priority() > ConfigScope::Global.priority());
        assert!(ConfigScope::Explicit.priority() > ConfigScope::Project.priority());
    }

    #[test]
    fn test_search_directory_ignores_other_names() {
        let temp_dir = TempDir::new().unwrap();
        let discovery = FileDiscovery::new();

        fs::write(temp_dir.path().join("form.toml"), "label_position = \"left\"").unwrap();
        fs::write(temp_dir.path().join("form.yaml"), "label_position: top").unwrap();
        fs::write(temp_dir.path().join("config.toml"), "x = 1").unwrap();

        let files = discovery.search_directory(temp_dir.path(), ConfigScope::Project);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].format, ConfigFormat::Toml);
        assert_eq!(files[1].format, ConfigFormat::Yaml);
        assert!(files.iter().all(|f| f.scope == ConfigScope::Project));
    }

    #[test]
    fn test_search_directory_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let discovery = FileDiscovery::new();
        let files =
            discovery.search_directory(&temp_dir.path().join("missing"), ConfigScope::Project);
        assert!(files.is_empty());
    }

    #[test]
    fn test_file_priority_ordering() {
        let temp_dir = TempDir::new().unwrap();
        let global_dir = temp_dir.path().join("global");
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&global_dir).unwrap();
        fs::create_dir_all(&project_dir).unwrap();
        fs::write(project_dir.join("form.json"), "{}").unwrap();
        fs::write(global_dir.join("form.toml"), "").unwrap();

        let discovery = FileDiscovery::with_directories(Some(project_dir), Some(global_dir));
        let files = discovery.discover_all();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].scope, ConfigScope::Global);
        assert_eq!(files[1].scope, ConfigScope::Project);
    }
}
