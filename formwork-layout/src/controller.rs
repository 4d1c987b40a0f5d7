//! Form-state controller capability and a reference implementation.
//!
//! The engine never stores values or errors itself. It reads them through
//! [`FormController`] at the start of a pass and requests writes through the
//! bindings it hands to renderers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use crate::types::FormLayout;
use crate::value::{FieldErrors, Values};

/// Controller shared between the render pass and the listeners it creates.
pub type SharedController = Rc<dyn FormController>;

/// Value storage, error state, and validation execution for one form.
///
/// Methods take `&self`; implementations use interior mutability so that
/// change listeners can write back while the host still holds the controller.
pub trait FormController {
    /// Current value for `key`, `None` when the key was never set.
    fn value(&self, key: &str) -> Option<Value>;

    /// Store a value for `key`.
    fn set_value(&self, key: &str, value: Value);

    /// Snapshot of all current values, used by visibility rules.
    fn values(&self) -> Values;

    /// Current validation message for `key`.
    fn error(&self, key: &str) -> Option<String>;

    /// Validate the whole snapshot and call `on_valid` only if it passes.
    fn validate_and_submit(&self, on_valid: &mut dyn FnMut(&Values));
}

/// Schema validation capability consumed by [`FormState`].
pub trait Validator {
    /// Per-key error messages for the snapshot; empty means valid.
    fn validate(&self, values: &Values) -> FieldErrors;
}

impl<F> Validator for F
where
    F: Fn(&Values) -> FieldErrors,
{
    fn validate(&self, values: &Values) -> FieldErrors {
        self(values)
    }
}

/// When [`FormState`] runs its validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Re-validate on every change, updating the changed key's error
    #[default]
    OnChange,
    /// Validate only when a submit is attempted
    OnSubmit,
}

/// In-memory controller seeded from a layout's initial values.
///
/// Validation covers the full snapshot, hidden fields included.
#[derive(Default)]
pub struct FormState {
    initial: Values,
    values: RefCell<Values>,
    errors: RefCell<FieldErrors>,
    validator: Option<Box<dyn Validator>>,
    mode: ValidationMode,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed values from each field's `initialValue`.
    pub fn from_layout(layout: &FormLayout) -> Self {
        let initial = layout.initial_values();
        Self {
            values: RefCell::new(initial.clone()),
            initial,
            ..Self::default()
        }
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Wrap into the shared handle the render pass expects.
    pub fn shared(self) -> SharedController {
        Rc::new(self)
    }

    pub fn set_error(&self, key: &str, message: impl Into<String>) {
        self.errors
            .borrow_mut()
            .insert(key.to_string(), message.into());
    }

    pub fn clear_errors(&self) {
        self.errors.borrow_mut().clear();
    }

    pub fn errors(&self) -> FieldErrors {
        self.errors.borrow().clone()
    }

    /// Restore the seed values and drop every error.
    pub fn reset(&self) {
        *self.values.borrow_mut() = self.initial.clone();
        self.clear_errors();
    }

    /// Run the validator, if any, and replace the error set.
    ///
    /// Returns true when the snapshot is valid.
    pub fn validate(&self) -> bool {
        let Some(validator) = &self.validator else {
            return self.errors.borrow().is_empty();
        };
        let snapshot = self.values();
        let errors = validator.validate(&snapshot);
        let valid = errors.is_empty();
        *self.errors.borrow_mut() = errors;
        valid
    }

    fn revalidate_key(&self, key: &str) {
        let Some(validator) = &self.validator else {
            return;
        };
        let snapshot = self.values();
        let errors = validator.validate(&snapshot);
        let mut current = self.errors.borrow_mut();
        match errors.get(key) {
            Some(message) => {
                current.insert(key.to_string(), message.clone());
            }
            None => {
                current.shift_remove(key);
            }
        }
    }
}

impl FormController for FormState {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    fn set_value(&self, key: &str, value: Value) {
        self.values.borrow_mut().insert(key.to_string(), value);
        if self.mode == ValidationMode::OnChange {
            self.revalidate_key(key);
        }
    }

    fn values(&self) -> Values {
        self.values.borrow().clone()
    }

    fn error(&self, key: &str) -> Option<String> {
        self.errors.borrow().get(key).cloned()
    }

    fn validate_and_submit(&self, on_valid: &mut dyn FnMut(&Values)) {
        if self.validate() {
            let snapshot = self.values();
            on_valid(&snapshot);
        } else {
            debug!(
                errors = self.errors.borrow().len(),
                "submit suppressed by validation"
            );
        }
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("values", &self.values.borrow())
            .field("errors", &self.errors.borrow())
            .field("mode", &self.mode)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}
