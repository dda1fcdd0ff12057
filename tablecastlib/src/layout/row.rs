//! Table rows.

use std::fmt;

use indexmap::IndexMap;

use crate::compare::assert_rows_equal;
use crate::layout::cell::{Cell, Entry};
use crate::options::RenderOptions;
use crate::Result;

/// Attribute client-side scripts use to find the record behind a row
pub const PK_ATTR: &str = "data-pk";

/// An ordered run of cells plus row-level classes and attributes.
///
/// A row carries no identity of its own; `with_pk` only writes the caller's
/// key into the `data-pk` attribute.
#[derive(Debug, Clone, Default)]
pub struct Row {
    entries: Vec<Entry>,
    classes: Vec<String>,
    attrs: IndexMap<String, String>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from cells and/or bare values
    pub fn from_entries<I, E>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        let mut row = Self::new();
        row.extend(entries)?;
        Ok(row)
    }

    /// Append a cell or a bare value.
    ///
    /// Bare values are checked now and wrapped in a cell at render time.
    pub fn add(&mut self, entry: impl Into<Entry>) -> Result<&mut Self> {
        let entry = entry.into();
        entry.check()?;
        self.entries.push(entry);
        Ok(self)
    }

    /// Append several cells or values
    pub fn extend<I, E>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        for entry in entries {
            self.add(entry)?;
        }
        Ok(self)
    }

    /// Add a CSS class to the `<tr>`
    pub fn add_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute on the `<tr>`; a repeated key replaces the old value
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Tag the row with the caller's primary key under `data-pk`
    pub fn set_pk(&mut self, pk: impl fmt::Display) -> &mut Self {
        self.set_attr(PK_ATTR, pk.to_string())
    }

    /// Builder: add a CSS class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: set an attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder: set the primary key attribute
    pub fn with_pk(mut self, pk: impl fmt::Display) -> Self {
        self.set_pk(pk);
        self
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attrs(&self) -> &IndexMap<String, String> {
        &self.attrs
    }

    /// The primary key written by `set_pk`, if any
    pub fn pk(&self) -> Option<&str> {
        self.attrs.get(PK_ATTR).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry as a cell
    pub fn cells(&self) -> Vec<Cell> {
        self.entries.iter().map(Entry::cell).collect()
    }

    /// Striping class for the zero-based row index
    pub fn stripe_class(index: usize) -> &'static str {
        if index % 2 == 0 {
            "row1"
        } else {
            "row2"
        }
    }

    /// The `<tr>` block with default options
    pub fn render_html_row(&self, index: usize) -> String {
        self.render_html_row_with(index, &RenderOptions::default())
    }

    /// The `<tr>` block: opening tag, one line per cell, closing tag
    pub fn render_html_row_with(&self, index: usize, options: &RenderOptions) -> String {
        let mut classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();
        classes.push(Self::stripe_class(index));

        let mut open = format!("    <tr class=\"{}\"", classes.join(" "));
        for (key, value) in &self.attrs {
            open.push_str(&format!(" {}=\"{}\"", key, value));
        }
        open.push('>');

        let mut lines = vec![open];
        lines.extend(
            self.entries
                .iter()
                .map(|entry| entry.cell().render_html_with(options)),
        );
        lines.push("    </tr>".to_string());
        lines.join("\n")
    }

    /// One CSV field per cell, with default options
    pub fn render_csv_row(&self) -> Vec<String> {
        self.render_csv_row_with(&RenderOptions::default())
    }

    /// One CSV field per cell
    pub fn render_csv_row_with(&self, options: &RenderOptions) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.cell().render_csv_with(options))
            .collect()
    }
}

/// Rows are equal when `assert_rows_equal` finds no difference.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        assert_rows_equal(self, other).is_ok()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.entries.iter().map(ToString::to_string).collect();
        if !self.classes.is_empty() {
            parts.push(format!("classes={:?}", self.classes));
        }
        for (key, value) in &self.attrs {
            parts.push(format!("{}='{}'", key, value));
        }
        write!(f, "Row({})", parts.join(", "))
    }
}
