//! Dynamic form rendering engine
//!
//! `formwork-layout` turns a declarative layout description (field key to
//! field spec) into a headless view tree. It owns no form state: values,
//! errors and validation live behind a [`FormController`] supplied by the host.
//!
//! # Architecture
//!
//! - **Layout description**: an ordered map of [`FieldSpec`]s, loadable from YAML or JSON
//! - **Renderer resolution**: host registry first, then built-ins, then an inert stub
//! - **Field isolation**: a renderer that errors or panics only degrades its own slot
//! - **Visibility**: re-evaluated every pass against one values snapshot
//! - **Submission**: validation-gated submit handler and an override chain for the button
//!
//! ```rust,ignore
//! let layout = FormLayout::from_yaml_str(source)?;
//! let controller = FormState::from_layout(&layout).shared();
//! let ctx = RenderContext::builder().registry(registry).build();
//! let rendered = Form::new(layout).show_submit_button(true).render(&controller, &ctx);
//! println!("{}", rendered.to_html());
//! ```

pub mod binding;
pub mod builtin;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod form;
pub mod registry;
pub mod render;
pub mod submit;
pub mod types;
pub mod value;
pub mod view;
pub mod width;

pub use binding::{bind, Binding, ChangeEvent, ChangeHandler};
pub use builtin::BuiltinKind;
pub use config::{FormConfig, LabelPosition, SubmitRenderer};
pub use context::{RenderContext, RenderContextBuilder};
pub use controller::{FormController, FormState, SharedController, ValidationMode, Validator};
pub use error::{FormError, RenderError, Result};
pub use form::{Form, RenderedForm};
pub use registry::{FieldRegistry, FieldRenderer, RenderResult};
pub use render::{render_layout, resolve_renderer, RenderedField, RendererSource};
pub use submit::{
    resolve_submit_action, resolve_submit_button, SubmitCallback, SubmitEvent, SubmitHandler,
    SubmitSource,
};
pub use types::{
    CustomRenderProps, FieldOption, FieldSpec, FormLayout, SelectMode, VisibilityRule,
};
pub use value::{FieldErrors, Values};
pub use view::{Element, Node};
pub use width::{Span, SpanStrategy};
