//! Submit handling: the native submit listener and the submit affordance.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::config::{FormConfig, SubmitRenderer};
use crate::controller::SharedController;
use crate::value::Values;
use crate::view::{Element, Node};

/// A native submit event delivered to the form root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the host's default submit behaviour (navigation, reload).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Caller-supplied callback receiving the validated values.
#[derive(Clone)]
pub struct SubmitCallback(Rc<dyn Fn(&Values)>);

impl SubmitCallback {
    pub fn new(f: impl Fn(&Values) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, values: &Values) {
        (self.0)(values)
    }
}

impl fmt::Debug for SubmitCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubmitCallback")
    }
}

/// Listener attached to the form root.
#[derive(Clone)]
pub struct SubmitHandler(Rc<dyn Fn(&mut SubmitEvent)>);

impl SubmitHandler {
    pub fn new(f: impl Fn(&mut SubmitEvent) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &mut SubmitEvent) {
        (self.0)(event)
    }
}

impl fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubmitHandler")
    }
}

/// Build the form's submit listener.
///
/// Default submit behaviour is always suppressed. With a callback the
/// controller validates and invokes it only on success; without one the
/// submit is a no-op.
pub fn resolve_submit_action(
    controller: &SharedController,
    on_submit: Option<SubmitCallback>,
) -> SubmitHandler {
    let controller = Rc::clone(controller);
    SubmitHandler::new(move |event| {
        event.prevent_default();
        let Some(callback) = &on_submit else {
            debug!("submit ignored: no callback");
            return;
        };
        controller.validate_and_submit(&mut |values| callback.call(values));
    })
}

/// Where the submit affordance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitSource {
    /// Renderer passed to the form itself
    Explicit,
    /// Renderer from the form configuration
    Config,
    /// The engine's default button
    Default,
}

impl SubmitSource {
    pub fn describe(&self) -> &'static str {
        match self {
            SubmitSource::Explicit => "explicit",
            SubmitSource::Config => "config",
            SubmitSource::Default => "default",
        }
    }
}

/// Default submit button: disabled and relabelled while loading.
pub fn default_submit_button(loading: bool) -> Node {
    Element::new("button")
        .attr("type", "submit")
        .class("form-submit")
        .flag("disabled", loading)
        .attr("aria-busy", if loading { "true" } else { "false" })
        .text(if loading { "Loading..." } else { "Submit" })
        .into()
}

/// Pick the submit affordance: the form's own renderer, then the
/// configured one, then the default button.
pub fn resolve_submit_button(
    explicit: Option<&SubmitRenderer>,
    config: &FormConfig,
    loading: bool,
) -> (SubmitSource, Node) {
    if let Some(render) = explicit {
        return (SubmitSource::Explicit, render.call(loading));
    }
    if let Some(render) = &config.submit_renderer {
        return (SubmitSource::Config, render.call(loading));
    }
    (SubmitSource::Default, default_submit_button(loading))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::FormState;
    use crate::value::FieldErrors;
    use serde_json::json;
    use std::cell::RefCell;

    fn captured() -> (Rc<RefCell<Vec<Values>>>, SubmitCallback) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let callback = SubmitCallback::new(move |values| sink.borrow_mut().push(values.clone()));
        (seen, callback)
    }

    #[test]
    fn test_no_callback_still_prevents_default() {
        let controller = FormState::new().shared();
        let handler = resolve_submit_action(&controller, None);
        let mut event = SubmitEvent::new();
        handler.call(&mut event);
        assert!(event.is_default_prevented());
    }

    #[test]
    fn test_valid_submit_invokes_callback_with_values() {
        let controller = FormState::new().shared();
        controller.set_value("name", json!("Ada"));

        let (seen, callback) = captured();
        let handler = resolve_submit_action(&controller, Some(callback));
        let mut event = SubmitEvent::new();
        handler.call(&mut event);

        assert!(event.is_default_prevented());
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].get("name"), Some(&json!("Ada")));
    }

    #[test]
    fn test_invalid_submit_suppresses_callback() {
        let controller = FormState::new()
            .with_validator(|values: &Values| {
                let mut errors = FieldErrors::new();
                if values.get("name").is_none() {
                    errors.insert("name".into(), "Required".into());
                }
                errors
            })
            .shared();

        let (seen, callback) = captured();
        let handler = resolve_submit_action(&controller, Some(callback));
        let mut event = SubmitEvent::new();
        handler.call(&mut event);

        assert!(event.is_default_prevented());
        assert!(seen.borrow().is_empty());
        assert_eq!(controller.error("name").as_deref(), Some("Required"));
    }

    #[test]
    fn test_default_button_reflects_loading() {
        let idle = default_submit_button(false);
        let el = idle.as_element().unwrap();
        assert_eq!(el.get_attr("type"), Some("submit"));
        assert!(!el.has_attr("disabled"));
        assert_eq!(idle.text_content(), "Submit");

        let busy = default_submit_button(true);
        assert!(busy.as_element().unwrap().has_attr("disabled"));
        assert_eq!(busy.text_content(), "Loading...");
    }

    #[test]
    fn test_submit_button_priority() {
        let explicit = SubmitRenderer::new(|_| Node::text("mine"));
        let config = FormConfig::new().with_submit_renderer(|_| Node::text("configured"));

        let (source, node) = resolve_submit_button(Some(&explicit), &config, false);
        assert_eq!(source, SubmitSource::Explicit);
        assert_eq!(node, Node::text("mine"));

        let (source, node) = resolve_submit_button(None, &config, false);
        assert_eq!(source, SubmitSource::Config);
        assert_eq!(node, Node::text("configured"));

        let (source, node) = resolve_submit_button(None, &FormConfig::default(), true);
        assert_eq!(source, SubmitSource::Default);
        assert_eq!(node, default_submit_button(true));
    }

    #[test]
    fn test_renderer_receives_loading_flag() {
        let config = FormConfig::new()
            .with_submit_renderer(|loading| Node::text(if loading { "wait" } else { "go" }));
        assert_eq!(resolve_submit_button(None, &config, true).1, Node::text("wait"));
        assert_eq!(resolve_submit_button(None, &config, false).1, Node::text("go"));
    }
}
