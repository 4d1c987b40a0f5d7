//! Formwork configuration management using Figment
//!
//! Loads the process-wide [`FormConfig`] from layered sources and reads layout
//! description files from disk.
//!
//! # Features
//!
//! - **Multiple file formats**: TOML, YAML, JSON with automatic format detection
//! - **File discovery**: `form.*` in the standard `.formwork/` directories
//! - **Environment integration**: `FORMWORK_` variables override file values
//! - **No caching**: configuration is read fresh on each load
//!
//! # Quick Start
//!
//! ```no_run
//! use formwork_config::{load_form_config, load_layout};
//!
//! let config = load_form_config()?;
//! let layout = load_layout("signup.yaml")?;
//! # Ok::<(), formwork_config::ConfigError>(())
//! ```
//!
//! # Configuration Files
//!
//! - Global: `~/.formwork/form.{toml,yaml,yml,json}`
//! - Project: `./.formwork/form.{toml,yaml,yml,json}`
//!
//! ```toml
//! label_position = "left"
//! input_class_name = "rounded border"
//!
//! [span_strategy]
//! kind = "grid"
//! columns = 12
//! ```

pub mod discovery;
pub mod error;
pub mod layout;
pub mod provider;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::ConfigError;
pub use layout::{load_layout, load_values};
pub use provider::ConfigProvider;

use formwork_layout::FormConfig;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load the form configuration from defaults, discovered files and the environment.
pub fn load_form_config() -> ConfigResult<FormConfig> {
    ConfigProvider::new().load_form_config()
}
