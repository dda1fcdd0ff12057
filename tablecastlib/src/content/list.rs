//! Several values in one cell.

use crate::coerce::{check, render_checked};
use crate::content::Render;
use crate::error::TableError;
use crate::options::{Format, RenderOptions};
use crate::value::Value;

/// Values rendered back to back with no separator.
///
/// No whitespace goes between items so a row of buttons stays tight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellContentList {
    items: Vec<Value>,
}

impl CellContentList {
    /// Build a list, failing if any item cannot be coerced
    pub fn new<I, V>(items: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items: Vec<Value> = items.into_iter().map(Into::into).collect();
        items.iter().try_for_each(check)?;
        Ok(Self { items })
    }

    /// Items already run through `check`
    pub(crate) fn from_checked(items: Vec<Value>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Render for CellContentList {
    fn render_html_with(&self, options: &RenderOptions) -> String {
        self.items
            .iter()
            .map(|item| render_checked(item, Format::Html, options))
            .collect()
    }

    fn render_csv_with(&self, options: &RenderOptions) -> String {
        self.items
            .iter()
            .map(|item| render_checked(item, Format::Csv, options))
            .collect()
    }
}

/// Values stacked vertically, one `<div>` each.
///
/// In CSV the items are joined with a single space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleList {
    items: Vec<Value>,
}

impl SimpleList {
    pub fn new<I, V>(items: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items: Vec<Value> = items.into_iter().map(Into::into).collect();
        items.iter().try_for_each(check)?;
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

impl Render for SimpleList {
    fn render_html_with(&self, options: &RenderOptions) -> String {
        self.items
            .iter()
            .map(|item| {
                format!(
                    "<div class=\"margin-top-third\">{}</div>",
                    render_checked(item, Format::Html, options)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_csv_with(&self, options: &RenderOptions) -> String {
        self.items
            .iter()
            .map(|item| render_checked(item, Format::Csv, options))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
