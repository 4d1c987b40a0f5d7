//! Layout description files.

use std::fs;
use std::path::Path;

use formwork_layout::FormLayout;
use tracing::debug;

use crate::discovery::ConfigFormat;
use crate::error::ConfigError;
use crate::ConfigResult;

/// Load a layout description, picking the parser from the file extension.
///
/// `.yaml`/`.yml` and `.json` are accepted; key order in the file is kept.
pub fn load_layout(path: impl AsRef<Path>) -> ConfigResult<FormLayout> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let source = fs::read_to_string(path).map_err(|e| ConfigError::file_read(path, e))?;

    let layout = match format {
        ConfigFormat::Yaml => FormLayout::from_yaml_str(&source),
        ConfigFormat::Json => FormLayout::from_json_str(&source),
        ConfigFormat::Toml => {
            return Err(ConfigError::UnsupportedFormat {
                format: "toml".to_string(),
            })
        }
    }
    .map_err(|e| ConfigError::layout(path, e))?;

    debug!(path = %path.display(), fields = layout.len(), "Loaded layout");
    Ok(layout)
}

/// Load a JSON object file into a values snapshot, e.g. for seeding a controller.
pub fn load_values(path: impl AsRef<Path>) -> ConfigResult<formwork_layout::Values> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| ConfigError::file_read(path, e))?;
    serde_json::from_str(&source)
        .map_err(|e| ConfigError::layout(path, formwork_layout::FormError::from(e)))
}
