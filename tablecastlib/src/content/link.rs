//! Links and images.

use crate::coerce::{check, render_checked};
use crate::content::Render;
use crate::error::TableError;
use crate::options::{Format, RenderOptions};
use crate::value::Value;

/// Nested values wrapped in a hyperlink.
///
/// The CSV field is the nested content alone; URLs are not exported.
#[derive(Debug, Clone, PartialEq)]
pub struct InHref {
    contents: Vec<Value>,
    url: String,
    classes: Vec<String>,
}

impl InHref {
    /// Link `contents` to `url`.
    ///
    /// A list value links each element in turn. Fails if any nested value
    /// cannot be coerced.
    pub fn new(contents: impl Into<Value>, url: impl Into<String>) -> Result<Self, TableError> {
        let contents = match contents.into() {
            Value::List(items) => items,
            single => vec![single],
        };
        contents.iter().try_for_each(check)?;
        Ok(Self {
            contents,
            url: url.into(),
            classes: Vec::new(),
        })
    }

    /// A link styled as a button (the `ButtonInHref` form)
    pub fn button(contents: impl Into<Value>, url: impl Into<String>) -> Result<Self, TableError> {
        Ok(Self::new(contents, url)?.with_class("button"))
    }

    /// Builder: add a CSS class to the `<a>` tag
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn contents(&self) -> &[Value] {
        &self.contents
    }

    fn render_contents(&self, format: Format, options: &RenderOptions) -> String {
        self.contents
            .iter()
            .map(|value| render_checked(value, format, options))
            .collect()
    }
}

impl Render for InHref {
    fn render_html_with(&self, options: &RenderOptions) -> String {
        let classes = if self.classes.is_empty() {
            String::new()
        } else {
            format!(" class=\"{}\"", self.classes.join(" "))
        };
        format!(
            "<a href=\"{}\"{}>{}</a>",
            self.url,
            classes,
            self.render_contents(Format::Html, options)
        )
    }

    fn render_csv_with(&self, options: &RenderOptions) -> String {
        self.render_contents(Format::Csv, options)
    }
}

/// An image, shown 100px high
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Img {
    src: String,
}

impl Img {
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }

    pub fn src(&self) -> &str {
        &self.src
    }
}

impl Render for Img {
    fn render_html_with(&self, _options: &RenderOptions) -> String {
        format!("<img src=\"{}\" height=\"100\">", self.src)
    }

    fn render_csv_with(&self, _options: &RenderOptions) -> String {
        self.src.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_link() {
        let link = InHref::new("Click", "/go").unwrap();
        assert_eq!(link.render_html(), "<a href=\"/go\">Click</a>");
        assert_eq!(link.render_csv(), "Click");
    }

    #[test]
    fn test_button_link() {
        let link = InHref::button("Edit", "/edit/4").unwrap().with_class("small");
        assert_eq!(
            link.render_html(),
            "<a href=\"/edit/4\" class=\"button small\">Edit</a>"
        );
    }

    #[test]
    fn test_link_around_image() {
        let link = InHref::new(Img::new("/thumb.jpg"), "/full.jpg").unwrap();
        assert_eq!(
            link.render_html(),
            "<a href=\"/full.jpg\"><img src=\"/thumb.jpg\" height=\"100\"></a>"
        );
        assert_eq!(link.render_csv(), "/thumb.jpg");
    }

    #[test]
    fn test_link_list_contents_concatenate() {
        let link = InHref::new(vec![Value::from("a\nb"), Value::from(2)], "/x").unwrap();
        assert_eq!(link.render_html(), "<a href=\"/x\">a<br>b2</a>");
        assert_eq!(link.render_csv(), "a b2");
    }

    #[test]
    fn test_link_rejects_foreign_contents() {
        struct Socket;
        let result = InHref::new(Value::foreign(&Socket), "/x");
        assert!(matches!(
            result,
            Err(TableError::UnsupportedValueType { .. })
        ));
    }

    #[test]
    fn test_img() {
        let img = Img::new("https://cdn.example.com/a.png");
        assert_eq!(
            img.render_html(),
            "<img src=\"https://cdn.example.com/a.png\" height=\"100\">"
        );
        assert_eq!(img.render_csv(), "https://cdn.example.com/a.png");
    }
}
