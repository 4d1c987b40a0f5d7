//! Built-in renderers for the primitive field types.

use tracing::trace;

use crate::binding::Binding;
use crate::config::FormConfig;
use crate::registry::RenderResult;
use crate::types::{CustomRenderProps, FieldSpec};
use crate::value::{display_value, is_truthy};
use crate::view::{Element, Node};

/// Base class of every built-in control.
pub const INPUT_CLASS: &str = "form-input";
/// Added to a control whose field has an error.
pub const INVALID_CLASS: &str = "form-input--invalid";
/// Row count for a textarea without `minRows`.
pub const DEFAULT_MIN_ROWS: u32 = 3;

/// The closed set of types the engine can draw itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Text,
    Number,
    Textarea,
    Checkbox,
    Custom,
}

impl BuiltinKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "textarea" => Some(Self::Textarea),
            "checkbox" => Some(Self::Checkbox),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Custom => "custom",
        }
    }

    pub(crate) fn render(
        self,
        binding: &Binding,
        spec: &FieldSpec,
        error: Option<&str>,
        config: &FormConfig,
    ) -> RenderResult {
        trace!(key = binding.key(), kind = self.tag(), "built-in renderer");
        let node = match self {
            Self::Text => input(binding, spec, error, config, "text"),
            Self::Number => input(binding, spec, error, config, "number"),
            Self::Textarea => textarea(binding, spec, error, config),
            Self::Checkbox => checkbox(binding, spec),
            Self::Custom => custom(binding, spec),
        };
        Ok(node)
    }
}

/// Inert placeholder for fields nothing can draw.
pub fn stub() -> Node {
    Element::new("span").class("form-stub").into()
}

/// Shown in a field's slot when its renderer failed.
pub fn failure_indicator(message: &str) -> Node {
    Element::new("div")
        .class("form-field-failed")
        .attr("role", "alert")
        .attr("data-error", message)
        .text("Renderer failed")
        .into()
}

fn input_class(config: &FormConfig, error: Option<&str>) -> String {
    let mut classes = vec![INPUT_CLASS];
    let shared = config.input_class_name.trim();
    if !shared.is_empty() {
        classes.push(shared);
    }
    if error.is_some() {
        classes.push(INVALID_CLASS);
    }
    classes.join(" ")
}

fn control(
    tag: &str,
    binding: &Binding,
    spec: &FieldSpec,
    error: Option<&str>,
    config: &FormConfig,
) -> Element {
    Element::new(tag)
        .attr("name", binding.key())
        .attr("id", binding.key())
        .class(&input_class(config, error))
        .attr_opt("placeholder", spec.placeholder.as_deref())
        .flag("readonly", spec.read_only)
        .on_change(binding.on_change())
}

fn input(
    binding: &Binding,
    spec: &FieldSpec,
    error: Option<&str>,
    config: &FormConfig,
    kind: &str,
) -> Node {
    // The controller owns number semantics; the raw text goes back unchanged.
    control("input", binding, spec, error, config)
        .attr("type", kind)
        .attr("value", display_value(binding.value()))
        .into()
}

fn textarea(binding: &Binding, spec: &FieldSpec, error: Option<&str>, config: &FormConfig) -> Node {
    let rows = spec.min_rows.unwrap_or(DEFAULT_MIN_ROWS).max(1);
    control("textarea", binding, spec, error, config)
        .attr("rows", rows.to_string())
        .text(display_value(binding.value()))
        .into()
}

fn checkbox(binding: &Binding, spec: &FieldSpec) -> Node {
    let input = Element::new("input")
        .attr("type", "checkbox")
        .attr("name", binding.key())
        .attr("id", binding.key())
        .flag("checked", is_truthy(binding.value()))
        .flag("readonly", spec.read_only)
        .on_change(binding.on_toggle());
    let mut wrapper = Element::new("div").class("form-checkbox").child(input);
    if let Some(text) = spec.placeholder.as_deref() {
        wrapper = wrapper.child(Element::new("span").text(text));
    }
    wrapper.into()
}

fn custom(binding: &Binding, spec: &FieldSpec) -> Node {
    let Some(render) = &spec.render else {
        return stub();
    };
    let props = CustomRenderProps {
        value: binding.value().clone(),
        set_value: binding.on_change(),
        label: spec.label.clone(),
        placeholder: spec.placeholder.clone(),
        error: String::new(),
    };
    let inner = render.call(props).unwrap_or_default();
    Element::new("div").class("form-custom").child(inner).into()
}
