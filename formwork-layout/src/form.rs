//! The form component: a layout pass plus submit wiring.

use tracing::debug;

use crate::config::SubmitRenderer;
use crate::context::RenderContext;
use crate::controller::SharedController;
use crate::render::{render_layout, RenderedField};
use crate::submit::{
    resolve_submit_action, resolve_submit_button, SubmitCallback, SubmitEvent, SubmitHandler,
    SubmitSource,
};
use crate::types::FormLayout;
use crate::value::Values;
use crate::view::{Element, Node};

/// Per-call props of one form instance.
#[derive(Debug, Clone, Default)]
pub struct Form {
    layout: FormLayout,
    loading: bool,
    show_submit_button: bool,
    on_submit: Option<SubmitCallback>,
    submit_renderer: Option<SubmitRenderer>,
}

impl Form {
    pub fn new(layout: FormLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// The submit affordance is hidden unless requested.
    pub fn show_submit_button(mut self, show: bool) -> Self {
        self.show_submit_button = show;
        self
    }

    pub fn on_submit(mut self, callback: impl Fn(&Values) + 'static) -> Self {
        self.on_submit = Some(SubmitCallback::new(callback));
        self
    }

    /// Per-call submit renderer, taking precedence over the configured one.
    pub fn submit_renderer(mut self, render: impl Fn(bool) -> Node + 'static) -> Self {
        self.submit_renderer = Some(SubmitRenderer::new(render));
        self
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    pub fn render(&self, controller: &SharedController, ctx: &RenderContext) -> RenderedForm {
        let fields = render_layout(&self.layout, controller, ctx);
        let on_submit = resolve_submit_action(controller, self.on_submit.clone());

        let (submit_source, submit) = if self.show_submit_button {
            let (source, node) =
                resolve_submit_button(self.submit_renderer.as_ref(), ctx.config(), self.loading);
            debug!(source = source.describe(), loading = self.loading, "submit affordance");
            (Some(source), Some(node))
        } else {
            (None, None)
        };

        RenderedForm {
            fields,
            submit,
            submit_source,
            loading: self.loading,
            on_submit,
        }
    }
}

/// Output of [`Form::render`].
#[derive(Debug, Clone)]
pub struct RenderedForm {
    /// Visible fields in description order
    pub fields: Vec<RenderedField>,
    /// Submit affordance, present only when requested
    pub submit: Option<Node>,
    pub submit_source: Option<SubmitSource>,
    pub loading: bool,
    on_submit: SubmitHandler,
}

impl RenderedForm {
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.key.as_str()).collect()
    }

    pub fn field(&self, key: &str) -> Option<&RenderedField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn submit_handler(&self) -> &SubmitHandler {
        &self.on_submit
    }

    /// Deliver a native submit and return the event after handling.
    pub fn submit(&self) -> SubmitEvent {
        let mut event = SubmitEvent::new();
        self.on_submit.call(&mut event);
        event
    }

    /// The whole form as one view: fields in a row, then the submit affordance.
    pub fn to_node(&self) -> Node {
        let row = Element::new("div")
            .class("form-row")
            .children(self.fields.iter().map(|f| f.node.clone()));
        let mut form = Element::new("form")
            .class("form")
            .flag("data-loading", self.loading)
            .on_submit(self.on_submit.clone())
            .child(row);
        if let Some(submit) = &self.submit {
            form = form.child(Element::new("div").class("form-actions").child(submit.clone()));
        }
        form.into()
    }

    pub fn to_html(&self) -> String {
        self.to_node().to_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::controller::FormState;
    use crate::types::FieldSpec;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    fn layout() -> FormLayout {
        FormLayout::new()
            .field("name", FieldSpec::new("text").label("Name").initial_value("Ada"))
            .field("age", FieldSpec::new("number").width(12))
    }

    #[test]
    fn test_submit_hidden_by_default() {
        let controller = FormState::from_layout(&layout()).shared();
        let rendered = Form::new(layout()).render(&controller, &RenderContext::default());
        assert_eq!(rendered.keys(), vec!["name", "age"]);
        assert!(rendered.submit.is_none());
        assert!(rendered.submit_source.is_none());
        assert!(rendered.to_node().find_tag("button").is_none());
    }

    #[test]
    fn test_default_button_when_shown() {
        let controller = FormState::new().shared();
        let rendered = Form::new(layout())
            .show_submit_button(true)
            .loading(true)
            .render(&controller, &RenderContext::default());
        assert_eq!(rendered.submit_source, Some(SubmitSource::Default));
        let button = rendered.to_node();
        let button = button.find_tag("button").unwrap();
        assert!(button.has_attr("disabled"));
    }

    #[test]
    fn test_per_call_renderer_beats_config() {
        let ctx = RenderContext::builder()
            .config(FormConfig::new().with_submit_renderer(|_| Node::text("config")))
            .build();
        let controller = FormState::new().shared();

        let rendered = Form::new(layout())
            .show_submit_button(true)
            .submit_renderer(|_| Node::text("mine"))
            .render(&controller, &ctx);
        assert_eq!(rendered.submit_source, Some(SubmitSource::Explicit));
        assert_eq!(rendered.submit, Some(Node::text("mine")));

        let rendered = Form::new(layout()).show_submit_button(true).render(&controller, &ctx);
        assert_eq!(rendered.submit_source, Some(SubmitSource::Config));
    }

    #[test]
    fn test_form_root_carries_submit_listener() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let controller = FormState::from_layout(&layout()).shared();
        let rendered = Form::new(layout())
            .on_submit(move |values| {
                assert_eq!(values.get("name"), Some(&json!("Ada")));
                counter.set(counter.get() + 1);
            })
            .render(&controller, &RenderContext::default());

        let root = rendered.to_node();
        let mut event = SubmitEvent::new();
        assert!(root.as_element().unwrap().dispatch_submit(&mut event));
        assert!(event.is_default_prevented());
        assert_eq!(calls.get(), 1);

        assert!(rendered.submit().is_default_prevented());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_html_output() {
        let controller = FormState::from_layout(&layout()).shared();
        let html = Form::new(layout())
            .render(&controller, &RenderContext::default())
            .to_html();
        assert!(html.starts_with("<form class=\"form\"><div class=\"form-row\">"));
        assert!(html.contains("<label class=\"form-label\" for=\"name\">Name</label>"));
        assert!(html.contains("col-span-6"));
        assert!(html.ends_with("</form>"));
    }
}
