//! Field registry: host-supplied renderers keyed by type tag.
//!
//! Lookups are pure reads. A missing entry is the normal case and means the
//! engine falls back to its built-in renderers.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::binding::Binding;
use crate::error::RenderError;
use crate::types::FieldSpec;
use crate::view::Node;

/// Outcome of one renderer call.
pub type RenderResult = std::result::Result<Node, RenderError>;

/// A renderer for one type tag.
///
/// `error` is the controller's current message for the field, if any.
/// Returning `Err` (or panicking) only degrades this field's slot.
pub trait FieldRenderer {
    fn render(&self, binding: &Binding, spec: &FieldSpec, error: Option<&str>) -> RenderResult;
}

impl<F> FieldRenderer for F
where
    F: Fn(&Binding, &FieldSpec, Option<&str>) -> RenderResult,
{
    fn render(&self, binding: &Binding, spec: &FieldSpec, error: Option<&str>) -> RenderResult {
        self(binding, spec, error)
    }
}

/// Lookup table from type tag to renderer. Cheap to clone.
#[derive(Clone, Default)]
pub struct FieldRegistry {
    renderers: HashMap<String, Rc<dyn FieldRenderer>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer for a tag, replacing any previous one.
    pub fn with(mut self, type_tag: impl Into<String>, renderer: impl FieldRenderer + 'static) -> Self {
        self.register(type_tag, renderer);
        self
    }

    pub fn register(&mut self, type_tag: impl Into<String>, renderer: impl FieldRenderer + 'static) {
        self.renderers.insert(type_tag.into(), Rc::new(renderer));
    }

    pub fn lookup(&self, type_tag: &str) -> Option<&dyn FieldRenderer> {
        self.renderers.get(type_tag).map(|r| r.as_ref())
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.renderers.contains_key(type_tag)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
