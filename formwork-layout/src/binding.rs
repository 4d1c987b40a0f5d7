//! Field binder: adapts one controller field into a controlled value/change pair.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tracing::trace;

use crate::controller::SharedController;
use crate::value::is_truthy;

/// A change reported by a rendered control.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// A raw value handed over directly (custom renderers, programmatic sets)
    Value(Value),
    /// Text typed into an input; carries the input's current text
    Input { value: String },
    /// A checkbox toggle
    Toggle { checked: bool },
}

impl ChangeEvent {
    /// The value a plain input writes back: the event's payload, unwrapped.
    pub fn into_value(self) -> Value {
        match self {
            ChangeEvent::Value(v) => v,
            ChangeEvent::Input { value } => Value::String(value),
            ChangeEvent::Toggle { checked } => Value::Bool(checked),
        }
    }

    /// The boolean a checkbox writes back, whatever shape the event has.
    ///
    /// Event-shaped JSON (`{"target": {"checked": true}}` or `{"checked": true}`)
    /// yields its flag; any other value falls back to truthiness.
    pub fn into_bool(self) -> bool {
        match self {
            ChangeEvent::Toggle { checked } => checked,
            ChangeEvent::Input { value } => !value.is_empty(),
            ChangeEvent::Value(v) => {
                let flag = v
                    .pointer("/target/checked")
                    .or_else(|| v.get("checked"))
                    .and_then(Value::as_bool);
                flag.unwrap_or_else(|| is_truthy(&v))
            }
        }
    }
}

/// Change listener attached to a controlled element.
#[derive(Clone)]
pub struct ChangeHandler(Rc<dyn Fn(ChangeEvent)>);

impl ChangeHandler {
    pub fn new(f: impl Fn(ChangeEvent) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: ChangeEvent) {
        (self.0)(event)
    }

    /// Convenience for setting a raw value.
    pub fn set(&self, value: Value) {
        self.call(ChangeEvent::Value(value))
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeHandler")
    }
}

/// The live value, change handlers, and error for one field in one pass.
///
/// Bindings are rebuilt on every pass and never stored by the engine.
#[derive(Clone)]
pub struct Binding {
    key: String,
    value: Value,
    error: Option<String>,
    controller: SharedController,
}

impl Binding {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The controller's value for this key at bind time, `null` when absent.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Handler writing the event payload back to the controller unchanged.
    pub fn on_change(&self) -> ChangeHandler {
        let controller = Rc::clone(&self.controller);
        let key = self.key.clone();
        ChangeHandler::new(move |event| {
            let value = event.into_value();
            trace!(key = %key, ?value, "field changed");
            controller.set_value(&key, value);
        })
    }

    /// Handler for boolean inputs: always writes a `bool`, never the event.
    pub fn on_toggle(&self) -> ChangeHandler {
        let controller = Rc::clone(&self.controller);
        let key = self.key.clone();
        ChangeHandler::new(move |event| {
            let checked = event.into_bool();
            trace!(key = %key, checked, "field toggled");
            controller.set_value(&key, Value::Bool(checked));
        })
    }

    /// Write a value straight to the controller.
    pub fn set_value(&self, value: Value) {
        self.controller.set_value(&self.key, value);
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("error", &self.error)
            .finish()
    }
}

/// Bind `key` of `controller`. A key the controller does not know reads as `null`.
pub fn bind(controller: &SharedController, key: &str) -> Binding {
    Binding {
        key: key.to_string(),
        value: controller.value(key).unwrap_or(Value::Null),
        error: controller.error(key),
        controller: Rc::clone(controller),
    }
}
