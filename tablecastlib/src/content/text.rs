//! Text content: plain strings, paragraphs and problem markers.

use crate::content::Render;
use crate::options::RenderOptions;

/// Placeholder so empty HTML cells keep their height
pub const NBSP: &str = "&nbsp;";

/// Plain text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringContent {
    text: String,
}

impl StringContent {
    /// Wrap `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The wrapped text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Render for StringContent {
    fn render_html_with(&self, _options: &RenderOptions) -> String {
        if self.text.is_empty() {
            NBSP.to_string()
        } else {
            self.text.clone()
        }
    }

    fn render_csv_with(&self, _options: &RenderOptions) -> String {
        self.text.clone()
    }
}

/// Text in its own `<p>` block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    inner: StringContent,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            inner: StringContent::new(text),
        }
    }

    pub fn text(&self) -> &str {
        self.inner.text()
    }
}

impl Render for Paragraph {
    fn render_html_with(&self, options: &RenderOptions) -> String {
        format!("<p>{}</p>", self.inner.render_html_with(options))
    }

    fn render_csv_with(&self, options: &RenderOptions) -> String {
        self.inner.render_csv_with(options)
    }
}

/// An error or warning shown on the page but never exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    text: String,
}

impl Problem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Render for Problem {
    fn render_html_with(&self, _options: &RenderOptions) -> String {
        format!("<span class=\"problem\">{}</span>", self.text)
    }

    fn render_csv_with(&self, _options: &RenderOptions) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_placeholder() {
        let content = StringContent::new("");
        assert_eq!(content.render_html(), "&nbsp;");
        assert_eq!(content.render_csv(), "");
    }

    #[test]
    fn test_string_is_not_escaped() {
        let content = StringContent::new("<b>bold</b>");
        assert_eq!(content.render_html(), "<b>bold</b>");
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(Paragraph::new("Hi").render_html(), "<p>Hi</p>");
        assert_eq!(Paragraph::new("Hi").render_csv(), "Hi");
        assert_eq!(Paragraph::new("").render_html(), "<p>&nbsp;</p>");
    }

    #[test]
    fn test_problem_not_exported() {
        let problem = Problem::new("No rate set");
        assert_eq!(
            problem.render_html(),
            "<span class=\"problem\">No rate set</span>"
        );
        assert_eq!(problem.render_csv(), "");
    }
}
