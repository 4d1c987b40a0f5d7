//! Width resolver: maps the 1..=24 width unit to a layout span.
//!
//! Every strategy clamps an absent or out-of-range width to the full row and
//! never fails. Spans are monotonic in width within a strategy.

use serde::{Deserialize, Serialize};

/// Units in a full row of the layout description's width scale.
pub const WIDTH_UNITS: i64 = 24;

/// How widths are turned into spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SpanStrategy {
    /// Round onto a coarse grid of `columns` columns (at least one column)
    Grid { columns: u8 },
    /// Named spans for full/half/third/quarter, raw percentage otherwise
    Named,
    /// Raw percentage of the row
    Percent,
}

impl Default for SpanStrategy {
    fn default() -> Self {
        SpanStrategy::Grid { columns: 12 }
    }
}

/// Resolved layout span for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Units occupied on the strategy's grid
    pub units: u32,
    /// Units in a full row on the strategy's grid
    pub columns: u32,
    /// Class list for the field's column wrapper, possibly empty
    pub class: String,
    /// Inline style override, if the strategy needs one
    pub style: Option<String>,
}

impl Span {
    /// Fraction of the row this span covers, in `(0, 1]`.
    pub fn fraction(&self) -> f64 {
        f64::from(self.units) / f64::from(self.columns)
    }

    pub fn is_full_row(&self) -> bool {
        self.units == self.columns
    }
}

/// Clamp to `1..=24`; absent or out-of-range widths become the full row.
pub fn normalize_width(width: Option<i64>) -> i64 {
    match width {
        Some(w) if (1..=WIDTH_UNITS).contains(&w) => w,
        _ => WIDTH_UNITS,
    }
}

impl SpanStrategy {
    pub fn resolve(&self, width: Option<i64>) -> Span {
        let width = normalize_width(width);
        match *self {
            SpanStrategy::Grid { columns } => grid_span(width, columns),
            SpanStrategy::Named => named_span(width),
            SpanStrategy::Percent => percent_span(width),
        }
    }
}

/// Resolve with the default strategy.
pub fn resolve(width: Option<i64>) -> Span {
    SpanStrategy::default().resolve(width)
}

fn grid_span(width: i64, columns: u8) -> Span {
    let columns = u32::from(columns.max(1));
    let scaled = (width as f64 / WIDTH_UNITS as f64 * f64::from(columns)).round() as u32;
    let units = scaled.clamp(1, columns);
    Span {
        units,
        columns,
        class: format!("col-span-{units}"),
        style: None,
    }
}

fn named_span(width: i64) -> Span {
    let class = match width {
        24 => "basis-full",
        12 => "basis-1/2",
        8 => "basis-1/3",
        6 => "basis-1/4",
        _ => {
            return Span {
                style: Some(format!("flex-basis: {}%", percent(width))),
                ..raw_span(width, String::new())
            }
        }
    };
    raw_span(width, class.to_string())
}

fn percent_span(width: i64) -> Span {
    let pct = percent(width);
    Span {
        style: Some(format!("flex-basis: {pct}%; max-width: {pct}%")),
        ..raw_span(width, format!("basis-[{pct}%] max-w-[{pct}%]"))
    }
}

fn raw_span(width: i64, class: String) -> Span {
    Span {
        units: width as u32,
        columns: WIDTH_UNITS as u32,
        class,
        style: None,
    }
}

/// Percentage of the row, trimmed to at most four decimals.
fn percent(width: i64) -> String {
    let pct = width as f64 / WIDTH_UNITS as f64 * 100.0;
    let text = format!("{pct:.4}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
