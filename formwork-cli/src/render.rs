//! Formwork Render - render a layout against a values snapshot.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use comfy_table::Table;
use formwork_layout::value::display_value;
use formwork_layout::{
    Form, FormConfig, FormController, FormLayout, FormState, RenderContext, RenderedForm,
    SharedController, Values,
};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::demo::demo_registry;
use crate::table::{new_table, or_dash, truncate_str};

/// Options of the render command.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub values: Option<PathBuf>,
    pub errors: Option<PathBuf>,
    pub format: OutputFormat,
    pub submit: bool,
    pub loading: bool,
}

/// Run the render command.
pub fn run_render(path: &Path, options: &RenderOptions, config: FormConfig) -> Result<()> {
    let layout = formwork_config::load_layout(path)
        .with_context(|| format!("failed to load layout {}", path.display()))?;
    let values = options
        .values
        .as_deref()
        .map(load_snapshot)
        .transpose()?;
    let errors = options
        .errors
        .as_deref()
        .map(load_snapshot)
        .transpose()?;

    let output = render_output(layout, values, errors, options, config)?;
    println!("{output}");
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Values> {
    formwork_config::load_values(path)
        .with_context(|| format!("failed to load {}", path.display()))
}

/// Seed a controller, render once, optionally submit, and format the result.
pub fn render_output(
    layout: FormLayout,
    values: Option<Values>,
    errors: Option<Values>,
    options: &RenderOptions,
    config: FormConfig,
) -> Result<String> {
    let state = FormState::from_layout(&layout);
    for (key, value) in values.unwrap_or_default() {
        state.set_value(&key, value);
    }
    for (key, message) in errors.unwrap_or_default() {
        state.set_error(&key, display_value(&message));
    }
    let controller = state.shared();
    let ctx = RenderContext::new(demo_registry(), config);

    let submitted: Rc<RefCell<Option<Values>>> = Rc::default();
    let sink = Rc::clone(&submitted);
    let form = Form::new(layout)
        .loading(options.loading)
        .show_submit_button(options.submit)
        .on_submit(move |values| *sink.borrow_mut() = Some(values.clone()));
    let rendered = form.render(&controller, &ctx);
    debug!(fields = rendered.fields.len(), "rendered layout");

    let mut output = match options.format {
        OutputFormat::Table => fields_table(&rendered, &controller).to_string(),
        OutputFormat::Html => rendered.to_html(),
    };

    if options.submit {
        rendered.submit();
        output.push('\n');
        match submitted.borrow().as_ref() {
            Some(values) => {
                output.push_str("Submitted:\n");
                output.push_str(&serde_json::to_string_pretty(values)?);
            }
            None => output.push_str("Submit suppressed by validation errors."),
        }
    }
    Ok(output)
}

/// One row per rendered field.
pub fn fields_table(rendered: &RenderedForm, controller: &SharedController) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Key", "Type", "Renderer", "Span", "Value", "Error", "Status"]);

    for field in &rendered.fields {
        let value = controller.value(&field.key).unwrap_or_default();
        let status = match &field.failure {
            Some(message) => format!("failed: {}", truncate_str(message, 40)),
            None => "ok".to_string(),
        };
        table.add_row(vec![
            field.key.clone(),
            field.type_tag.clone(),
            field.source.describe().to_string(),
            format!("{}/{}", field.span.units, field.span.columns),
            or_dash(&truncate_str(&display_value(&value), 32)),
            or_dash(field.error.as_deref().unwrap_or("")),
            status,
        ]);
    }
    table
}
