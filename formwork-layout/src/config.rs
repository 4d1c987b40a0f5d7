//! Form configuration: process-wide presentation defaults.
//!
//! Supplied whole when a render context is built and read-only afterwards.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::view::Node;
use crate::width::SpanStrategy;

/// Where labels sit relative to their control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    #[default]
    Top,
    Left,
}

/// Builds the submit affordance; receives the `loading` flag.
#[derive(Clone)]
pub struct SubmitRenderer(Rc<dyn Fn(bool) -> Node>);

impl SubmitRenderer {
    pub fn new(f: impl Fn(bool) -> Node + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, loading: bool) -> Node {
        (self.0)(loading)
    }
}

impl fmt::Debug for SubmitRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubmitRenderer")
    }
}

/// Presentation defaults shared by every form rendered in a context.
///
/// Keys are snake_case, matching `FORMWORK_*` environment variables; the
/// camelCase spelling used by layout files is accepted as an alias.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    #[serde(alias = "labelPosition")]
    pub label_position: LabelPosition,
    /// Appended to every built-in input's base class list
    #[serde(alias = "inputClassName")]
    pub input_class_name: String,
    #[serde(alias = "spanStrategy")]
    pub span_strategy: SpanStrategy,
    /// Used when a form does not supply its own submit renderer
    #[serde(skip)]
    pub submit_renderer: Option<SubmitRenderer>,
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_position(mut self, position: LabelPosition) -> Self {
        self.label_position = position;
        self
    }

    pub fn with_input_class_name(mut self, class: impl Into<String>) -> Self {
        self.input_class_name = class.into();
        self
    }

    pub fn with_span_strategy(mut self, strategy: SpanStrategy) -> Self {
        self.span_strategy = strategy;
        self
    }

    pub fn with_submit_renderer(mut self, render: impl Fn(bool) -> Node + 'static) -> Self {
        self.submit_renderer = Some(SubmitRenderer::new(render));
        self
    }
}
