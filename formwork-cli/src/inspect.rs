//! Formwork Inspect - list the fields of a layout description.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use formwork_layout::{resolve_renderer, FormConfig, FormLayout, RenderContext, VisibilityRule};

use crate::demo::demo_registry;
use crate::table::{new_table, or_dash, truncate_str};

/// Run the inspect command.
pub fn run_inspect(path: &Path, config: FormConfig) -> Result<()> {
    let layout = formwork_config::load_layout(path)
        .with_context(|| format!("failed to load layout {}", path.display()))?;
    let ctx = RenderContext::new(demo_registry(), config);

    if layout.is_empty() {
        println!("Layout has no fields.");
        return Ok(());
    }

    println!("{}", inspect_table(&layout, &ctx));
    println!("\n{} field(s).", layout.len());
    Ok(())
}

/// One row per field, in description order. Hidden state is not evaluated.
pub fn inspect_table(layout: &FormLayout, ctx: &RenderContext) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Key",
        "Type",
        "Label",
        "Width",
        "Span",
        "Renderer",
        "Hidden When",
    ]);

    for (key, spec) in layout.iter() {
        let span = ctx.config().span_strategy.resolve(spec.width);
        let renderer = resolve_renderer(spec, ctx.registry()).source();
        table.add_row(vec![
            key.to_string(),
            spec.type_.clone(),
            truncate_str(spec.effective_label(key), 32),
            spec.width.map(|w| w.to_string()).unwrap_or_else(|| "-".into()),
            format!("{}/{} {}", span.units, span.columns, or_dash(&span.class)),
            renderer.describe().to_string(),
            spec.hidden_when
                .as_ref()
                .map(describe_rule)
                .unwrap_or_else(|| "-".into()),
        ]);
    }
    table
}

/// Human-readable form of a visibility rule.
pub fn describe_rule(rule: &VisibilityRule) -> String {
    let mut parts = Vec::new();
    if let Some(value) = &rule.equals {
        parts.push(format!("{} == {}", rule.field, value));
    }
    if let Some(value) = &rule.not_equals {
        parts.push(format!("{} != {}", rule.field, value));
    }
    if parts.is_empty() {
        rule.field.clone()
    } else {
        parts.join(" && ")
    }
}
