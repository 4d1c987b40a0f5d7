//! RenderContext: the registry and configuration a render pass reads.
//!
//! Both are optional: an empty registry sends every field to the built-in
//! renderers, and the default configuration stacks labels on top with no
//! shared input class and no submit renderer.

use crate::config::FormConfig;
use crate::registry::FieldRegistry;

/// Ambient capabilities for a tree of forms, passed explicitly to each pass.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    registry: FieldRegistry,
    config: FormConfig,
}

/// Builder for `RenderContext`. Created by `RenderContext::builder()`.
#[derive(Debug, Default)]
pub struct RenderContextBuilder {
    registry: Option<FieldRegistry>,
    config: Option<FormConfig>,
}

impl RenderContextBuilder {
    /// Provide the host's renderer registry.
    pub fn registry(mut self, registry: FieldRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Provide presentation defaults.
    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> RenderContext {
        RenderContext {
            registry: self.registry.unwrap_or_default(),
            config: self.config.unwrap_or_default(),
        }
    }
}

impl RenderContext {
    /// ```rust,ignore
    /// let ctx = RenderContext::builder()
    ///     .registry(FieldRegistry::new().with("fruit", fruit_picker))
    ///     .config(FormConfig::new().with_label_position(LabelPosition::Left))
    ///     .build();
    /// ```
    pub fn builder() -> RenderContextBuilder {
        RenderContextBuilder::default()
    }

    pub fn new(registry: FieldRegistry, config: FormConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelPosition;

    #[test]
    fn test_absent_capabilities_use_defaults() {
        let ctx = RenderContext::builder().build();
        assert!(ctx.registry().is_empty());
        assert_eq!(ctx.config().label_position, LabelPosition::Top);
        assert!(ctx.config().submit_renderer.is_none());
    }

    #[test]
    fn test_builder_keeps_supplied_values() {
        let ctx = RenderContext::builder()
            .config(FormConfig::new().with_label_position(LabelPosition::Left))
            .build();
        assert_eq!(ctx.config().label_position, LabelPosition::Left);
    }
}
