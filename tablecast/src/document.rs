//! The JSON table document the CLI reads.
//!
//! A document mirrors the library's table: headers, rows, classes and the
//! extras rendered around the table. Cell values are plain JSON where JSON
//! has a matching type, and objects tagged with `"type"` for everything
//! else:
//!
//! ```json
//! {
//!   "title": "Invoices",
//!   "headers": ["Client", {"cell": "Total", "classes": ["num"]}],
//!   "rows": [
//!     {"cells": ["Acme", {"type": "money", "amount": "1234.5"}], "pk": 12},
//!     ["Globex", null]
//!   ],
//!   "buttons": [{"type": "button", "content": "Export", "url": "/invoices.csv"}]
//! }
//! ```
//!
//! A `{"cell": ...}` header renders as `<th>` unless it says
//! `"is_header": false`. Buttons are plain values.
//!
//! An object with neither `"type"` nor `"cell"` has no table meaning and is
//! rejected as an unsupported value.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Number, Value as Json};
use tablecastlib::{
    Cell, DisappearingFeedback, Entry, Feedback, Img, InHref, Money, Paragraph, Problem,
    RenderOptions, Row, SimpleList, Table, Tooltip, Value,
};

/// A whole table as read from JSON
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TableDocument {
    pub title: Option<String>,
    pub classes: Vec<String>,
    pub attrs: IndexMap<String, String>,
    pub headers: Vec<Json>,
    pub rows: Vec<RowDocument>,
    pub buttons: Vec<Json>,
    pub js: Option<String>,
    pub css: Option<String>,
}

/// A row: either a bare array of cells or an object with row metadata
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RowDocument {
    Cells(Vec<Json>),
    Full {
        cells: Vec<Json>,
        #[serde(default)]
        pk: Option<Json>,
        #[serde(default)]
        classes: Vec<String>,
        #[serde(default)]
        attrs: IndexMap<String, String>,
    },
}

/// Presentation keys allowed next to `"cell"`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CellOptions {
    classes: Vec<String>,
    is_header: Option<bool>,
    color: Option<String>,
    attrs: IndexMap<String, String>,
    blank_when_null: bool,
}

/// Values JSON cannot express directly
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TypedValue {
    Date {
        value: NaiveDate,
    },
    Datetime {
        value: DateTime<FixedOffset>,
    },
    Time {
        value: NaiveTime,
    },
    Duration {
        #[serde(default)]
        days: i64,
        #[serde(default)]
        seconds: f64,
    },
    Money {
        amount: Json,
        #[serde(default = "default_currency")]
        currency: String,
    },
    Link {
        content: Json,
        url: String,
        #[serde(default)]
        classes: Vec<String>,
    },
    Button {
        content: Json,
        url: String,
        #[serde(default)]
        classes: Vec<String>,
    },
    Img {
        src: String,
    },
    Tooltip {
        label: String,
        help: String,
        #[serde(default)]
        width: u32,
    },
    Feedback {
        text: String,
        #[serde(default)]
        hook: Option<String>,
    },
    DisappearingFeedback {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        hook: Option<String>,
    },
    Problem {
        text: String,
    },
    Paragraph {
        text: String,
    },
    SimpleList {
        items: Vec<Json>,
    },
}

fn default_currency() -> String {
    "USD".to_string()
}

impl TableDocument {
    /// Parse a document from JSON text
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("input is not a valid table document")
    }

    /// Build the table, failing on the first value that cannot be rendered
    pub fn into_table(self, options: RenderOptions) -> Result<Table> {
        let headers = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| header_from_json(header).with_context(|| format!("header {i}")))
            .collect::<Result<Vec<_>>>()?;
        let mut table = Table::new(headers)
            .context("headers")?
            .with_options(options);

        if let Some(title) = self.title {
            table.set_title(title);
        }
        for class in self.classes {
            table.add_class(class);
        }
        for (key, value) in self.attrs {
            table.set_attr(key, value);
        }
        for (i, row) in self.rows.into_iter().enumerate() {
            let row = row.into_row().with_context(|| format!("row {i}"))?;
            table.add_row(row);
        }
        for (i, button) in self.buttons.iter().enumerate() {
            let value = value_from_json(button).with_context(|| format!("button {i}"))?;
            table
                .add_button(value)
                .with_context(|| format!("button {i}"))?;
        }
        if let Some(js) = self.js {
            table.append_js(js);
        }
        if let Some(css) = self.css {
            table.append_css(css);
        }
        Ok(table)
    }
}

impl RowDocument {
    fn into_row(self) -> Result<Row> {
        let (cells, pk, classes, attrs) = match self {
            RowDocument::Cells(cells) => (cells, None, Vec::new(), IndexMap::new()),
            RowDocument::Full {
                cells,
                pk,
                classes,
                attrs,
            } => (cells, pk, classes, attrs),
        };

        let mut row = Row::new();
        for (i, cell) in cells.iter().enumerate() {
            let entry = entry_from_json(cell).with_context(|| format!("cell {i}"))?;
            row.add(entry).with_context(|| format!("cell {i}"))?;
        }
        for class in classes {
            row.add_class(class);
        }
        if let Some(pk) = pk {
            row.set_pk(scalar_text(&pk));
        }
        for (key, value) in attrs {
            row.set_attr(key, value);
        }
        Ok(row)
    }
}

/// A row cell: `{"cell": ...}` builds a cell, anything else a value
pub fn entry_from_json(json: &Json) -> Result<Entry> {
    slot_from_json(json, false)
}

/// Like `entry_from_json`, but `{"cell": ...}` headers default to `<th>`
pub fn header_from_json(json: &Json) -> Result<Entry> {
    slot_from_json(json, true)
}

fn slot_from_json(json: &Json, header: bool) -> Result<Entry> {
    match json {
        Json::Object(map) if map.contains_key("cell") => {
            Ok(Entry::Cell(cell_from_json(map, header)?))
        }
        other => Ok(Entry::Value(value_from_json(other)?)),
    }
}

fn cell_from_json(map: &Map<String, Json>, header: bool) -> Result<Cell> {
    let options: CellOptions =
        serde_json::from_value(Json::Object(map.clone())).context("invalid cell options")?;
    let value = value_from_json(map.get("cell").unwrap_or(&Json::Null))?;

    let mut cell = Cell::new(value)?.with_classes(options.classes);
    if options.is_header.unwrap_or(header) {
        cell = cell.as_header();
    }
    if let Some(color) = options.color {
        cell = cell.with_color(color);
    }
    for (key, value) in options.attrs {
        cell = cell.with_attr(key, value);
    }
    if options.blank_when_null {
        cell = cell.blank_when_null();
    }
    Ok(cell)
}

/// Convert one JSON value into a table value
pub fn value_from_json(json: &Json) -> Result<Value> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::from(*b),
        Json::Number(n) => number_value(n),
        Json::String(s) => Value::from(s.as_str()),
        Json::Array(items) => Value::List(
            items
                .iter()
                .map(value_from_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Json::Object(map) if map.contains_key("type") => {
            let typed: TypedValue =
                serde_json::from_value(json.clone()).context("invalid typed value")?;
            typed.into_value()?
        }
        Json::Object(_) => Value::foreign_named("object"),
    })
}

fn number_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        Value::from(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn scalar_text(json: &Json) -> String {
    match json {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_amount(amount: &Json) -> Result<Decimal> {
    let text = scalar_text(amount);
    text.parse::<Decimal>()
        .with_context(|| format!("'{text}' is not a decimal amount"))
}

fn link(link: InHref, classes: Vec<String>) -> InHref {
    classes
        .into_iter()
        .fold(link, |link, class| link.with_class(class))
}

impl TypedValue {
    fn into_value(self) -> Result<Value> {
        let value = match self {
            TypedValue::Date { value } => Value::from(value),
            TypedValue::Datetime { value } => Value::from(value),
            TypedValue::Time { value } => Value::from(value),
            TypedValue::Duration { days, seconds } => {
                let whole_days = TimeDelta::try_days(days)
                    .ok_or_else(|| anyhow!("{days} days is out of range"))?;
                let rest = TimeDelta::microseconds((seconds * 1_000_000.0).round() as i64);
                let delta = whole_days
                    .checked_add(&rest)
                    .ok_or_else(|| anyhow!("duration is out of range"))?;
                Value::from(delta)
            }
            TypedValue::Money { amount, currency } => {
                Value::from(Money::new(parse_amount(&amount)?, currency))
            }
            TypedValue::Link {
                content,
                url,
                classes,
            } => Value::from(link(InHref::new(value_from_json(&content)?, url)?, classes)),
            TypedValue::Button {
                content,
                url,
                classes,
            } => Value::from(link(
                InHref::button(value_from_json(&content)?, url)?,
                classes,
            )),
            TypedValue::Img { src } => Value::from(Img::new(src)),
            TypedValue::Tooltip { label, help, width } => {
                Value::from(Tooltip::new(label, help).width(width))
            }
            TypedValue::Feedback { text, hook } => {
                let feedback = Feedback::new(text);
                Value::from(match hook {
                    Some(hook) => feedback.hook(hook),
                    None => feedback,
                })
            }
            TypedValue::DisappearingFeedback { text, hook } => {
                Value::from(DisappearingFeedback::new(
                    text.unwrap_or_else(|| DisappearingFeedback::DEFAULT_TEXT.to_string()),
                    hook.unwrap_or_else(|| DisappearingFeedback::DEFAULT_HOOK.to_string()),
                ))
            }
            TypedValue::Problem { text } => Value::from(Problem::new(text)),
            TypedValue::Paragraph { text } => Value::from(Paragraph::new(text)),
            TypedValue::SimpleList { items } => {
                let items = items
                    .iter()
                    .map(value_from_json)
                    .collect::<Result<Vec<_>>>()?;
                Value::from(SimpleList::new(items)?)
            }
        };
        Ok(value)
    }
}
