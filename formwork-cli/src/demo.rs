//! Demo renderer registry used by the CLI.
//!
//! Registers a `select` renderer for option lists, so layouts can use
//! `type: select` without a host application.

use formwork_layout::{
    Binding, Element, FieldRegistry, FieldSpec, RenderError, RenderResult, SelectMode,
};
use serde_json::Value;

/// Registry with every demo renderer.
pub fn demo_registry() -> FieldRegistry {
    FieldRegistry::new().with("select", select)
}

/// Option-list renderer.
///
/// The first option is an empty choice labelled with the placeholder. A
/// `multiple` or `tags` mode adds the `multiple` flag.
pub fn select(binding: &Binding, spec: &FieldSpec, error: Option<&str>) -> RenderResult {
    if spec.options.is_empty() {
        return Err(RenderError::new(format!(
            "select field '{}' has no options",
            binding.key()
        )));
    }

    let current = binding.value();
    let multiple = matches!(spec.mode, Some(SelectMode::Multiple | SelectMode::Tags));

    let placeholder = Element::new("option")
        .attr("value", "")
        .text(spec.placeholder.as_deref().unwrap_or("Select..."));
    let options = spec.options.iter().map(|option| {
        let value = option_value(&option.value);
        Element::new("option")
            .flag("selected", is_selected(current, &option.value))
            .attr("value", value)
            .text(option.label.clone())
            .into()
    });

    let mut select = Element::new("select")
        .attr("name", binding.key())
        .attr("id", binding.key())
        .class("form-select")
        .flag("multiple", multiple)
        .flag("disabled", spec.read_only)
        .on_change(binding.on_change())
        .child(placeholder)
        .children(options);
    if error.is_some() {
        select = select.class("form-select--invalid");
    }
    Ok(select.into())
}

fn option_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_selected(current: &Value, option: &Value) -> bool {
    match current {
        Value::Array(items) => items.contains(option),
        other => other == option,
    }
}
