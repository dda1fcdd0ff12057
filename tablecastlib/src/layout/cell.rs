//! Table cells and the loosely-typed entries rows are made of.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use indexmap::IndexMap;

use crate::coerce::{check, coerce_with, render_checked};
use crate::compare::assert_cells_equal;
use crate::content::{
    CellContent, CellContentList, DisappearingFeedback, Feedback, Img, InHref, Paragraph, Problem,
    SimpleList, StringContent, Tooltip,
};
use crate::money::Money;
use crate::options::{Format, RenderOptions};
use crate::value::Value;
use crate::Result;

/// One `<td>` (or `<th>`) and its CSV field.
///
/// The value is checked when the cell is built and cannot be replaced
/// afterwards; only presentation metadata has builders. None of that
/// metadata reaches the CSV field.
#[derive(Debug, Clone)]
pub struct Cell {
    value: Value,
    classes: Vec<String>,
    is_header: bool,
    color: Option<String>,
    attrs: IndexMap<String, String>,
    null_as_nbsp: bool,
}

impl Cell {
    /// Build a cell, failing fast if `value` cannot be coerced
    pub fn new(value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        check(&value)?;
        Ok(Self::from_checked(value))
    }

    /// Build a header (`<th>`) cell
    pub fn header(value: impl Into<Value>) -> Result<Self> {
        Ok(Self::new(value)?.as_header())
    }

    /// An empty cell
    pub fn blank() -> Self {
        Self::from_checked(Value::Null)
    }

    pub(crate) fn from_checked(value: Value) -> Self {
        Self {
            value,
            classes: Vec::new(),
            is_header: false,
            color: None,
            attrs: IndexMap::new(),
            null_as_nbsp: true,
        }
    }

    /// Builder: add a CSS class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Builder: add several CSS classes
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Builder: render as `<th>`
    pub fn as_header(mut self) -> Self {
        self.is_header = true;
        self
    }

    /// Builder: background color, hex with or without the leading `#`.
    ///
    /// Anything that is not three or six hex digits is ignored at render time.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Builder: extra attribute on the tag; a repeated key replaces the old value
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Builder: render a null value as a truly empty tag instead of `&nbsp;`
    pub fn blank_when_null(mut self) -> Self {
        self.null_as_nbsp = false;
        self
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn is_header(&self) -> bool {
        self.is_header
    }

    /// The background color as given
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn attrs(&self) -> &IndexMap<String, String> {
        &self.attrs
    }

    pub fn null_as_nbsp(&self) -> bool {
        self.null_as_nbsp
    }

    /// The coerced content for `format`
    pub fn content(&self, format: Format, options: &RenderOptions) -> Result<CellContent> {
        coerce_with(&self.value, format, options)
    }

    /// Background color as a `#rrggbb` token, if one is set
    pub fn background(&self) -> Option<String> {
        normalize_color(self.color.as_deref()?)
    }

    fn tag(&self) -> &'static str {
        if self.is_header {
            "th"
        } else {
            "td"
        }
    }

    /// The `<td>`/`<th>` element with default options
    pub fn render_html(&self) -> String {
        self.render_html_with(&RenderOptions::default())
    }

    /// The `<td>`/`<th>` element
    pub fn render_html_with(&self, options: &RenderOptions) -> String {
        let tag = self.tag();
        let inner = if self.value.is_null() && !self.null_as_nbsp {
            String::new()
        } else {
            render_checked(&self.value, Format::Html, options)
        };

        let mut open = vec![tag.to_string()];
        if !self.classes.is_empty() {
            open.push(format!("class=\"{}\"", self.classes.join(" ")));
        }
        if let Some(color) = self.background() {
            open.push(format!("style=\"background-color: {}\"", color));
        }
        for (key, value) in &self.attrs {
            open.push(format!("{}='{}'", key, value));
        }

        format!("<{}>{}</{}>", open.join(" "), inner, tag)
    }

    /// The CSV field with default options
    pub fn render_csv(&self) -> String {
        self.render_csv_with(&RenderOptions::default())
    }

    /// The CSV field
    pub fn render_csv_with(&self, options: &RenderOptions) -> String {
        render_checked(&self.value, Format::Csv, options)
    }
}

fn normalize_color(color: &str) -> Option<String> {
    let hex = color.trim().trim_start_matches('#');
    let is_hex = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if is_hex {
        Some(format!("#{}", hex.to_ascii_lowercase()))
    } else {
        None
    }
}

/// Cells are equal when `assert_cells_equal` finds no difference.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        assert_cells_equal(self, other).is_ok()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.value.is_null() {
            parts.push(self.value.describe());
        }
        if !self.classes.is_empty() {
            parts.push(format!("classes={:?}", self.classes));
        }
        if self.is_header {
            parts.push("is_header=true".to_string());
        }
        if let Some(color) = &self.color {
            parts.push(format!("color={:?}", color));
        }
        for (key, value) in &self.attrs {
            parts.push(format!("{}='{}'", key, value));
        }
        write!(f, "Cell({})", parts.join(", "))
    }
}

/// What a row or header slot holds: a prebuilt cell or a bare value.
///
/// Bare values are checked when added and wrapped in a default cell only
/// when rendered. Equality compares the cells the entries render as, so a
/// bare value equals a default cell holding it.
#[derive(Debug, Clone)]
pub enum Entry {
    Cell(Cell),
    Value(Value),
}

impl Entry {
    /// Check the value this entry would render
    pub fn check(&self) -> Result<()> {
        match self {
            Entry::Cell(cell) => check(cell.value()),
            Entry::Value(value) => check(value),
        }
    }

    /// This entry as a cell, wrapping bare values with default presentation
    pub fn to_cell(&self) -> Result<Cell> {
        match self {
            Entry::Cell(cell) => Ok(cell.clone()),
            Entry::Value(value) => Cell::new(value.clone()),
        }
    }

    /// Wrap without checking. Rows and tables only hold entries that passed
    /// `check` on the way in.
    pub(crate) fn cell(&self) -> Cell {
        match self {
            Entry::Cell(cell) => cell.clone(),
            Entry::Value(value) => Cell::from_checked(value.clone()),
        }
    }

    pub fn render_html_with(&self, options: &RenderOptions) -> Result<String> {
        Ok(self.to_cell()?.render_html_with(options))
    }

    pub fn render_csv_with(&self, options: &RenderOptions) -> Result<String> {
        Ok(self.to_cell()?.render_csv_with(options))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cell() == other.cell()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Cell(cell) => write!(f, "{}", cell),
            Entry::Value(value) => write!(f, "{}", value.describe()),
        }
    }
}

impl From<Cell> for Entry {
    fn from(cell: Cell) -> Self {
        Entry::Cell(cell)
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        Entry::Value(value)
    }
}

macro_rules! value_entry {
    ($($t:ty),* $(,)?) => {
        $(impl From<$t> for Entry {
            fn from(value: $t) -> Self {
                Entry::Value(Value::from(value))
            }
        })*
    };
}

value_entry!(
    &str,
    String,
    &String,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    NaiveDateTime,
    NaiveDate,
    NaiveTime,
    TimeDelta,
    Money,
    CellContent,
    StringContent,
    Paragraph,
    Tooltip,
    Feedback,
    DisappearingFeedback,
    InHref,
    Img,
    CellContentList,
    SimpleList,
    Problem,
);

impl<Tz: TimeZone> From<DateTime<Tz>> for Entry {
    fn from(dt: DateTime<Tz>) -> Self {
        Entry::Value(Value::from(dt))
    }
}

impl<T: Into<Value>> From<Option<T>> for Entry {
    fn from(opt: Option<T>) -> Self {
        Entry::Value(Value::from(opt))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Entry {
    fn from(items: Vec<T>) -> Self {
        Entry::Value(Value::from(items))
    }
}
