//! Tooltips and transient feedback.
//!
//! Feedback is exported as its bare text. The CSS hook and the hiding script
//! only make sense on a live page, so they never reach a CSV field.

use crate::content::Render;
use crate::options::RenderOptions;

/// A label that shows extra text on hover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    label: String,
    help_text: String,
    width: Option<u32>,
}

impl Tooltip {
    pub fn new(label: impl Into<String>, help_text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            help_text: help_text.into(),
            width: None,
        }
    }

    /// Builder: fix the popup width in pixels (0 means automatic)
    pub fn width(mut self, pixels: u32) -> Self {
        self.width = Some(pixels);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn help_text(&self) -> &str {
        &self.help_text
    }
}

impl Render for Tooltip {
    fn render_html_with(&self, _options: &RenderOptions) -> String {
        let width = match self.width {
            Some(pixels) if pixels > 0 => format!(" style=\"width: {}px;\"", pixels),
            _ => String::new(),
        };
        format!(
            "<div class=\"tooltip\">{}<span class=\"tooltiptext\"{}>{}</span></div>",
            self.label, width, self.help_text
        )
    }

    fn render_csv_with(&self, _options: &RenderOptions) -> String {
        self.label.clone()
    }
}

/// Short status text such as "Saved!" or "3 rows updated"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    text: String,
    hook: Option<String>,
}

impl Feedback {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hook: None,
        }
    }

    /// Builder: extra CSS class scripts can find this element by
    pub fn hook(mut self, class: impl Into<String>) -> Self {
        self.hook = Some(class.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hook_class(&self) -> Option<&str> {
        self.hook.as_deref()
    }
}

impl Render for Feedback {
    fn render_html_with(&self, _options: &RenderOptions) -> String {
        let hook = self
            .hook
            .as_ref()
            .map(|class| format!(" {}", class))
            .unwrap_or_default();
        format!("<span class=\"feedback{}\">{}</span>", hook, self.text)
    }

    fn render_csv_with(&self, _options: &RenderOptions) -> String {
        self.text.clone()
    }
}

/// Feedback that hides itself one second after the page renders.
///
/// Meant for "Saved!" after a form POST. The emitted script expects jQuery
/// on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisappearingFeedback {
    feedback: Feedback,
}

impl DisappearingFeedback {
    /// Default hook class the hiding script targets
    pub const DEFAULT_HOOK: &'static str = "hide_soon";
    pub const DEFAULT_TEXT: &'static str = "Saved!";

    pub fn new(text: impl Into<String>, hook: impl Into<String>) -> Self {
        Self {
            feedback: Feedback::new(text).hook(hook),
        }
    }

    pub fn text(&self) -> &str {
        self.feedback.text()
    }

    fn hook(&self) -> &str {
        self.feedback.hook_class().unwrap_or(Self::DEFAULT_HOOK)
    }
}

impl Default for DisappearingFeedback {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEXT, Self::DEFAULT_HOOK)
    }
}

impl Render for DisappearingFeedback {
    fn render_html_with(&self, options: &RenderOptions) -> String {
        format!(
            "{}\n<script>setTimeout(function() {{ $(\".{}\").hide(); }}, 1000);</script>",
            self.feedback.render_html_with(options),
            self.hook()
        )
    }

    fn render_csv_with(&self, options: &RenderOptions) -> String {
        self.feedback.render_csv_with(options)
    }
}
