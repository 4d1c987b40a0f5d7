//! Layout description types.
//!
//! A [`FormLayout`] maps field keys to [`FieldSpec`]s in description order.
//! The declarative part of a spec serializes to/from YAML and JSON so layouts
//! can live in files; the visibility predicate and the inline custom renderer
//! are programmatic only.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::binding::ChangeHandler;
use crate::error::Result;
use crate::value::{display_value, is_truthy, Values};
use crate::view::Node;

/// A single option of a choice-style field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldOption {
    pub label: String,
    pub value: Value,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Selection mode hint for choice-style fields.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SelectMode {
    #[default]
    Default,
    Multiple,
    Tags,
}

/// Declarative visibility rule: hide a field based on another field's value.
///
/// With `equals` set the field hides when the value matches; with `notEquals`
/// set it hides when the value differs; with neither it hides when the value
/// is truthy. A missing value reads as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRule {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<Value>,
}

impl VisibilityRule {
    pub fn when_truthy(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            equals: None,
            not_equals: None,
        }
    }

    pub fn when_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            equals: Some(value.into()),
            not_equals: None,
        }
    }

    pub fn hides(&self, values: &Values) -> bool {
        let current = values.get(&self.field).unwrap_or(&Value::Null);
        match (&self.equals, &self.not_equals) {
            (None, None) => is_truthy(current),
            (equals, not_equals) => {
                equals.as_ref().is_none_or(|v| v == current)
                    && not_equals.as_ref().is_none_or(|v| v != current)
            }
        }
    }
}

/// Visibility predicate over the full value snapshot.
#[derive(Clone)]
pub struct HiddenPredicate(Rc<dyn Fn(&Values) -> bool>);

impl HiddenPredicate {
    pub fn new(f: impl Fn(&Values) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn test(&self, values: &Values) -> bool {
        (self.0)(values)
    }
}

impl fmt::Debug for HiddenPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HiddenPredicate")
    }
}

/// What an inline custom renderer receives.
#[derive(Debug, Clone)]
pub struct CustomRenderProps {
    pub value: Value,
    pub set_value: ChangeHandler,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub error: String,
}

/// Inline view function for `type: custom` fields. Returning `None` renders nothing.
#[derive(Clone)]
pub struct CustomRender(Rc<dyn Fn(CustomRenderProps) -> Option<Node>>);

impl CustomRender {
    pub fn new(f: impl Fn(CustomRenderProps) -> Option<Node> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, props: CustomRenderProps) -> Option<Node> {
        (self.0)(props)
    }
}

impl fmt::Debug for CustomRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRender")
    }
}

/// One entry of the layout description.
///
/// `type` is an open tag: built-in tags are `text`, `number`, `textarea`,
/// `checkbox` and `custom`, anything else is resolved through the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Fraction of the row on a 1..=24 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_when: Option<VisibilityRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Inline style: a CSS declaration string or a property map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SelectMode>,
    #[serde(skip)]
    pub hidden: Option<HiddenPredicate>,
    #[serde(skip)]
    pub render: Option<CustomRender>,
}

impl FieldSpec {
    pub fn new(type_: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn width(mut self, width: i64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn initial_value(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn option(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.push(FieldOption::new(label, value));
        self
    }

    pub fn hidden(mut self, predicate: impl Fn(&Values) -> bool + 'static) -> Self {
        self.hidden = Some(HiddenPredicate::new(predicate));
        self
    }

    pub fn hidden_when(mut self, rule: VisibilityRule) -> Self {
        self.hidden_when = Some(rule);
        self
    }

    pub fn render(
        mut self,
        render: impl Fn(CustomRenderProps) -> Option<Node> + 'static,
    ) -> Self {
        self.render = Some(CustomRender::new(render));
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, style: impl Into<Value>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn min_rows(mut self, rows: u32) -> Self {
        self.min_rows = Some(rows);
        self
    }

    pub fn mode(mut self, mode: SelectMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Label text, falling back to the field key.
    pub fn effective_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.label.as_deref().filter(|l| !l.is_empty()).unwrap_or(key)
    }

    /// The `style` hint as inline CSS.
    ///
    /// Strings pass through unchanged. A property map becomes one
    /// `name: value` declaration per entry in key order, with camelCase names
    /// turned into kebab-case. Null entries are dropped.
    pub fn inline_style(&self) -> Option<String> {
        match self.style.as_ref()? {
            Value::String(css) if !css.trim().is_empty() => Some(css.clone()),
            Value::Object(properties) => {
                let declarations: Vec<String> = properties
                    .iter()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(name, value)| format!("{}: {}", css_property(name), display_value(value)))
                    .collect();
                (!declarations.is_empty()).then(|| declarations.join("; "))
            }
            _ => None,
        }
    }

    /// Evaluate visibility against the current snapshot. Never cached.
    pub fn is_hidden(&self, values: &Values) -> bool {
        self.hidden_when.as_ref().is_some_and(|rule| rule.hides(values))
            || self.hidden.as_ref().is_some_and(|p| p.test(values))
    }
}

/// `backgroundColor` -> `background-color`; names already in CSS form are kept.
fn css_property(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// The layout description: field key to spec, in description order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormLayout {
    fields: IndexMap<String, FieldSpec>,
}

impl FormLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Re-adding a key replaces its spec in place.
    pub fn field(mut self, key: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(key, spec);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, spec: FieldSpec) {
        self.fields.insert(key.into(), spec);
    }

    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Seed snapshot for a controller: every field's `initialValue`, in order.
    pub fn initial_values(&self) -> Values {
        self.fields
            .iter()
            .filter_map(|(key, spec)| {
                spec.initial_value
                    .as_ref()
                    .map(|value| (key.clone(), value.clone()))
            })
            .collect()
    }

    /// Parse a YAML mapping. Any `type` string is accepted, including an
    /// empty one; tags nothing can draw render as a stub.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

impl FromIterator<(String, FieldSpec)> for FormLayout {
    fn from_iter<I: IntoIterator<Item = (String, FieldSpec)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
