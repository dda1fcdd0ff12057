//! Renderable cell content.
//!
//! Every piece of content renders twice: once as trusted HTML, once as a
//! CSV field. The HTML side is **not escaped** here. Whatever text reaches a
//! content variant is interpolated as is, and the page template that inserts
//! the fragment is responsible for only feeding it trusted text.
//!
//! The variants are:
//!
//! - **StringContent**: plain text, `&nbsp;` when empty
//! - **Paragraph**: text wrapped in `<p>`
//! - **Tooltip**: label with hover text; CSV keeps the label
//! - **Feedback** / **DisappearingFeedback**: short status text; CSV keeps the text
//! - **InHref**: nested values inside a link; CSV drops the URL
//! - **Img**: an image; CSV keeps the URL
//! - **CellContentList** / **SimpleList**: several values inline or stacked
//! - **Problem**: an error marker; never exported

pub mod hint;
pub mod link;
pub mod list;
pub mod text;

pub use hint::{DisappearingFeedback, Feedback, Tooltip};
pub use link::{Img, InHref};
pub use list::{CellContentList, SimpleList};
pub use text::{Paragraph, Problem, StringContent};

use crate::options::{Format, RenderOptions};

/// Something that renders to both output formats.
///
/// Both methods are pure functions of `self` and the options.
pub trait Render {
    /// HTML fragment, using `options` for any nested dates
    fn render_html_with(&self, options: &RenderOptions) -> String;

    /// CSV field, using `options` for any nested dates
    fn render_csv_with(&self, options: &RenderOptions) -> String;

    /// HTML fragment with default options
    fn render_html(&self) -> String {
        self.render_html_with(&RenderOptions::default())
    }

    /// CSV field with default options
    fn render_csv(&self) -> String {
        self.render_csv_with(&RenderOptions::default())
    }

    /// Render for the given format
    fn render_with(&self, format: Format, options: &RenderOptions) -> String {
        match format {
            Format::Html => self.render_html_with(options),
            Format::Csv => self.render_csv_with(options),
        }
    }
}

/// One of the known content variants
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(StringContent),
    Paragraph(Paragraph),
    Tooltip(Tooltip),
    Feedback(Feedback),
    DisappearingFeedback(DisappearingFeedback),
    Link(InHref),
    Img(Img),
    List(CellContentList),
    SimpleList(SimpleList),
    Problem(Problem),
}

impl CellContent {
    /// Variant name, used in mismatch messages
    pub fn kind(&self) -> &'static str {
        match self {
            CellContent::Text(_) => "StringContent",
            CellContent::Paragraph(_) => "Paragraph",
            CellContent::Tooltip(_) => "Tooltip",
            CellContent::Feedback(_) => "Feedback",
            CellContent::DisappearingFeedback(_) => "DisappearingFeedback",
            CellContent::Link(_) => "InHref",
            CellContent::Img(_) => "Img",
            CellContent::List(_) => "CellContentList",
            CellContent::SimpleList(_) => "SimpleList",
            CellContent::Problem(_) => "Problem",
        }
    }

    fn as_render(&self) -> &dyn Render {
        match self {
            CellContent::Text(c) => c,
            CellContent::Paragraph(c) => c,
            CellContent::Tooltip(c) => c,
            CellContent::Feedback(c) => c,
            CellContent::DisappearingFeedback(c) => c,
            CellContent::Link(c) => c,
            CellContent::Img(c) => c,
            CellContent::List(c) => c,
            CellContent::SimpleList(c) => c,
            CellContent::Problem(c) => c,
        }
    }
}

impl Render for CellContent {
    fn render_html_with(&self, options: &RenderOptions) -> String {
        self.as_render().render_html_with(options)
    }

    fn render_csv_with(&self, options: &RenderOptions) -> String {
        self.as_render().render_csv_with(options)
    }
}

impl std::fmt::Display for CellContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_html())
    }
}

macro_rules! content_from {
    ($($variant:ident($t:ty)),* $(,)?) => {
        $(impl From<$t> for CellContent {
            fn from(content: $t) -> Self {
                CellContent::$variant(content)
            }
        })*
    };
}

content_from!(
    Text(StringContent),
    Paragraph(Paragraph),
    Tooltip(Tooltip),
    Feedback(Feedback),
    DisappearingFeedback(DisappearingFeedback),
    Link(InHref),
    Img(Img),
    List(CellContentList),
    SimpleList(SimpleList),
    Problem(Problem),
);
