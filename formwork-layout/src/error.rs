//! Error types for the form engine

use thiserror::Error;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors that can occur while loading or handling a layout description.
///
/// Rendering itself never fails with a `FormError`: renderer failures are
/// contained per field and surface as a failure indicator in the view.
#[derive(Debug, Error)]
pub enum FormError {
    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error returned by a field renderer.
///
/// The layout pass catches it at the field boundary, logs it and renders a
/// failure indicator in that field's slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RenderError {
    message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for RenderError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for RenderError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_display() {
        let json_err = serde_json::from_str::<u32>("{").unwrap_err();
        let err: FormError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_render_error_from_str() {
        let err: RenderError = "boom".into();
        assert_eq!(err.message(), "boom");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_yaml_error_converts() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("not a number").unwrap_err();
        let err: FormError = yaml_err.into();
        assert!(err.to_string().starts_with("YAML error"));
    }
}
