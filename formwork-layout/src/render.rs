//! Layout renderer: one synchronous pass over a layout description.
//!
//! For each field in description order the pass evaluates visibility against
//! the snapshot taken at the start of the pass, resolves the span, resolves
//! the renderer (registry, then built-in, then stub), binds the field, and
//! composes the label, the view, and the inline error. A failing renderer is
//! contained to its own slot.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, trace, warn};

use crate::binding::{bind, Binding};
use crate::builtin::{failure_indicator, stub, BuiltinKind};
use crate::config::{FormConfig, LabelPosition};
use crate::context::RenderContext;
use crate::controller::SharedController;
use crate::registry::{FieldRegistry, FieldRenderer};
use crate::types::{FieldSpec, FormLayout};
use crate::view::{Element, Node};
use crate::width::Span;

/// Which renderer drew a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererSource {
    /// Host renderer found in the registry under the field's tag
    Registry,
    /// One of the engine's built-in renderers
    Builtin(BuiltinKind),
    /// Nothing can draw the field; an inert stub stands in
    Stub,
}

impl RendererSource {
    pub fn describe(&self) -> &'static str {
        match self {
            RendererSource::Registry => "registry",
            RendererSource::Builtin(kind) => kind.tag(),
            RendererSource::Stub => "stub",
        }
    }
}

/// A renderer chosen for one field in one pass.
pub enum ResolvedRenderer<'a> {
    Registry(&'a dyn FieldRenderer),
    Builtin(BuiltinKind),
    Stub,
}

impl ResolvedRenderer<'_> {
    pub fn source(&self) -> RendererSource {
        match self {
            ResolvedRenderer::Registry(_) => RendererSource::Registry,
            ResolvedRenderer::Builtin(kind) => RendererSource::Builtin(*kind),
            ResolvedRenderer::Stub => RendererSource::Stub,
        }
    }
}

/// Resolve a field's renderer. Total: always yields exactly one renderer.
///
/// Registry entries win over built-ins with the same tag. A `custom` field
/// without an inline render function resolves to the stub.
pub fn resolve_renderer<'a>(spec: &FieldSpec, registry: &'a FieldRegistry) -> ResolvedRenderer<'a> {
    if let Some(renderer) = registry.lookup(&spec.type_) {
        return ResolvedRenderer::Registry(renderer);
    }
    match BuiltinKind::from_tag(&spec.type_) {
        Some(BuiltinKind::Custom) if spec.render.is_none() => ResolvedRenderer::Stub,
        Some(kind) => ResolvedRenderer::Builtin(kind),
        None => ResolvedRenderer::Stub,
    }
}

/// One visible field of a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub key: String,
    pub type_tag: String,
    pub span: Span,
    pub source: RendererSource,
    /// Message of a contained renderer failure
    pub failure: Option<String>,
    /// Validation message shown beneath the field
    pub error: Option<String>,
    /// Column wrapper holding the label, the control and the error line
    pub node: Node,
}

impl RenderedField {
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Run one render pass.
///
/// Hidden fields are skipped before any span, renderer, or binding work.
/// The output keeps description order minus hidden fields.
pub fn render_layout(
    layout: &FormLayout,
    controller: &SharedController,
    ctx: &RenderContext,
) -> Vec<RenderedField> {
    let snapshot = controller.values();
    debug!(fields = layout.len(), registry = ctx.registry().len(), "render pass started");

    let mut rendered = Vec::with_capacity(layout.len());
    for (key, spec) in layout.iter() {
        if spec.is_hidden(&snapshot) {
            trace!(key, "field hidden");
            continue;
        }

        let span = ctx.config().span_strategy.resolve(spec.width);
        let resolved = resolve_renderer(spec, ctx.registry());
        let source = resolved.source();
        trace!(key, type_tag = %spec.type_, source = source.describe(), "renderer resolved");

        let binding = bind(controller, key);
        let error = binding.error().map(str::to_owned);

        let (view, failure) = match invoke(&resolved, &binding, spec, ctx.config()) {
            Ok(node) => (node, None),
            Err(message) => {
                warn!(key, type_tag = %spec.type_, %message, "field renderer failed");
                (failure_indicator(&message), Some(message))
            }
        };

        let node = compose(key, spec, &span, view, error.as_deref(), ctx.config());
        rendered.push(RenderedField {
            key: key.to_string(),
            type_tag: spec.type_.clone(),
            span,
            source,
            failure,
            error,
            node,
        });
    }

    debug!(rendered = rendered.len(), "render pass finished");
    rendered
}

/// Call the renderer, turning an `Err` or a panic into a failure message.
fn invoke(
    resolved: &ResolvedRenderer<'_>,
    binding: &Binding,
    spec: &FieldSpec,
    config: &FormConfig,
) -> std::result::Result<Node, String> {
    let error = binding.error();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match resolved {
        ResolvedRenderer::Registry(renderer) => renderer.render(binding, spec, error),
        ResolvedRenderer::Builtin(kind) => kind.render(binding, spec, error, config),
        ResolvedRenderer::Stub => Ok(stub()),
    }));
    match outcome {
        Ok(Ok(node)) => Ok(node),
        Ok(Err(err)) => Err(err.message().to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("renderer panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("renderer panicked: {s}")
    } else {
        "renderer panicked".to_string()
    }
}

/// Field container: label, control, and the error line when there is one,
/// inside a column wrapper carrying the span.
fn compose(
    key: &str,
    spec: &FieldSpec,
    span: &Span,
    view: Node,
    error: Option<&str>,
    config: &FormConfig,
) -> Node {
    let label = Element::new("label")
        .class("form-label")
        .attr("for", key)
        .text(spec.effective_label(key));

    let style = spec.inline_style();
    let mut container = Element::new("div")
        .class("form-field")
        .attr("data-key", key)
        .attr_opt("style", style.as_deref());
    if config.label_position == LabelPosition::Left {
        container = container.class("form-field--label-left");
    }
    if let Some(class) = spec.class_name.as_deref() {
        container = container.class(class);
    }
    container = container.child(label).child(view);
    if let Some(message) = error {
        container = container.child(
            Element::new("div")
                .class("form-error")
                .attr("role", "alert")
                .text(message),
        );
    }

    Element::new("div")
        .class("form-col")
        .class(&span.class)
        .attr_opt("style", span.style.as_deref())
        .child(container)
        .into()
}
