//! The table: headers, rows and the extras rendered around them.

use indexmap::IndexMap;
use tracing::trace;

use crate::coerce::{check, render_checked};
use crate::export::RecordSink;
use crate::layout::cell::{Cell, Entry};
use crate::layout::row::Row;
use crate::options::{Format, RenderOptions};
use crate::value::Value;
use crate::Result;

/// Class every rendered table carries, after the caller's own classes
pub const RESULTS_CLASS: &str = "results";

/// A table ready to render as HTML or export as CSV.
///
/// Headers and rows are checked as they are added, so rendering cannot
/// fail; only the CSV sink can.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<Entry>,
    rows: Vec<Row>,
    classes: Vec<String>,
    title: Option<String>,
    js: Option<String>,
    css: Option<String>,
    attrs: IndexMap<String, String>,
    buttons: Vec<Value>,
    options: RenderOptions,
}

impl Table {
    /// Create a table with the given headers and no rows
    pub fn new<I, E>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        let mut table = Self::default();
        for header in headers {
            table.add_header(header)?;
        }
        Ok(table)
    }

    /// Append a header (bare value or cell)
    pub fn add_header(&mut self, header: impl Into<Entry>) -> Result<&mut Self> {
        let header = header.into();
        header.check()?;
        self.headers.push(header);
        Ok(self)
    }

    /// Append a finished row
    pub fn add_row(&mut self, row: Row) -> &mut Self {
        self.rows.push(row);
        self
    }

    /// Append a row built from `entries` and hand it back for further edits
    pub fn create_row<I, E>(&mut self, entries: I) -> Result<&mut Row>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        let row = Row::from_entries(entries)?;
        self.rows.push(row);
        let last = self.rows.len() - 1;
        Ok(&mut self.rows[last])
    }

    /// Append an element shown below the table, usually an `InHref::button`.
    ///
    /// Buttons are bare content: there is no cell around them to carry
    /// classes or attributes.
    pub fn add_button(&mut self, button: impl Into<Value>) -> Result<&mut Self> {
        let button = button.into();
        check(&button)?;
        self.buttons.push(button);
        Ok(self)
    }

    /// Add a CSS class to the `<table>` tag
    pub fn add_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute on the `<table>` tag
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Set the render options passed down to every cell
    pub fn options(&mut self, options: RenderOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Append script text, newline-separated from anything already there
    pub fn append_js(&mut self, js: impl AsRef<str>) -> &mut Self {
        append_block(&mut self.js, js.as_ref());
        self
    }

    /// Append style text, newline-separated from anything already there
    pub fn append_css(&mut self, css: impl AsRef<str>) -> &mut Self {
        append_block(&mut self.css, css.as_ref());
        self
    }

    /// Builder: set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.set_title(title);
        self
    }

    /// Builder: add a CSS class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: set a `<table>` attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder: set the render options
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn headers(&self) -> &[Entry] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn js(&self) -> Option<&str> {
        self.js.as_deref()
    }

    pub fn css(&self) -> Option<&str> {
        self.css.as_deref()
    }

    pub fn attrs(&self) -> &IndexMap<String, String> {
        &self.attrs
    }

    pub fn buttons(&self) -> &[Value] {
        &self.buttons
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the whole table with its own options
    pub fn render_html(&self) -> String {
        self.render_html_with(&self.options)
    }

    /// Render the whole table as one newline-joined markup string
    pub fn render_html_with(&self, options: &RenderOptions) -> String {
        trace!(
            headers = self.headers.len(),
            rows = self.rows.len(),
            buttons = self.buttons.len(),
            "rendering table as html"
        );

        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            lines.push(format!("<h3>{}</h3>", title));
        }

        let mut classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();
        classes.push(RESULTS_CLASS);
        let mut open = format!("<table class=\"{}\"", classes.join(" "));
        for (key, value) in &self.attrs {
            open.push_str(&format!(" {}=\"{}\"", key, value));
        }
        open.push('>');
        lines.push(open);

        if !self.headers.is_empty() {
            lines.push("  <thead>".to_string());
            lines.push("    <tr>".to_string());
            for header in &self.headers {
                lines.push(header_cell(header).render_html_with(options));
            }
            lines.push("    </tr>".to_string());
            lines.push("  </thead>".to_string());
        }

        if !self.rows.is_empty() {
            lines.push("  <tbody>".to_string());
            for (index, row) in self.rows.iter().enumerate() {
                lines.push(row.render_html_row_with(index, options));
            }
            lines.push("  </tbody>".to_string());
        }
        lines.push("</table>".to_string());

        if !self.buttons.is_empty() {
            let buttons: String = self
                .buttons
                .iter()
                .map(|button| render_checked(button, Format::Html, options))
                .collect();
            lines.push(format!("<div class=\"post-table-buttons\">{}</div>", buttons));
        }

        if let Some(js) = &self.js {
            lines.push(wrap_once(js, "script"));
        }
        if let Some(css) = &self.css {
            lines.push(wrap_once(css, "style"));
        }

        lines.join("\n")
    }

    /// The CSV header record
    pub fn header_record(&self) -> Vec<String> {
        self.header_record_with(&self.options)
    }

    fn header_record_with(&self, options: &RenderOptions) -> Vec<String> {
        self.headers
            .iter()
            .map(|header| header.cell().render_csv_with(options))
            .collect()
    }

    /// Header record followed by one record per row
    pub fn csv_records(&self) -> Vec<Vec<String>> {
        self.csv_records_with(&self.options)
    }

    pub fn csv_records_with(&self, options: &RenderOptions) -> Vec<Vec<String>> {
        let mut records = Vec::with_capacity(self.rows.len() + 1);
        records.push(self.header_record_with(options));
        records.extend(self.rows.iter().map(|row| row.render_csv_row_with(options)));
        records
    }

    /// Write the header record then every row to `sink`
    pub fn write_csv<S: RecordSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        self.write_csv_with(sink, &self.options)
    }

    pub fn write_csv_with<S: RecordSink + ?Sized>(
        &self,
        sink: &mut S,
        options: &RenderOptions,
    ) -> Result<()> {
        trace!(
            headers = self.headers.len(),
            rows = self.rows.len(),
            "exporting table as csv"
        );
        for record in self.csv_records_with(options) {
            sink.write_record(&record)?;
        }
        Ok(())
    }

    /// The CSV export as a string, using `csv`'s default dialect
    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        self.write_csv(&mut writer)?;
        let bytes = writer
            .into_inner()
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        String::from_utf8(bytes)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err).into())
    }
}

fn append_block(slot: &mut Option<String>, text: &str) {
    match slot {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(text);
        }
        None => *slot = Some(text.to_string()),
    }
}

/// Wrap `body` in `<tag>` unless it already starts with that tag
fn wrap_once(body: &str, tag: &str) -> String {
    if body.trim_start().starts_with(&format!("<{}", tag)) {
        body.to_string()
    } else {
        format!("<{tag}>{body}</{tag}>")
    }
}

/// Bare header values render as `<th>`; prebuilt cells render as built
fn header_cell(header: &Entry) -> Cell {
    match header {
        Entry::Cell(cell) => cell.clone(),
        Entry::Value(_) => header.cell().as_header(),
    }
}
