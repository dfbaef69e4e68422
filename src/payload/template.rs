//! Template types for typed variable injection.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }

    pub const fn content(&self) -> &'static str {
        self.content
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Placeholder replaced by the rendered manifest.
pub const ASSETS_PLACEHOLDER: &str = "__ASSETS__";

/// Placeholder replaced by the host's sandbox source expression.
pub const CSP_SOURCE_PLACEHOLDER: &str = "__CSP_SOURCE__";

/// Variables for the preview page.
pub struct PreviewVars<'a> {
    /// Rendered manifest markup
    pub assets: &'a str,
    pub csp_source: &'a str,
}

impl TemplateVars for PreviewVars<'_> {
    /// The CSP source is substituted in the page only, never inside the
    /// manifest, which carries raw document text.
    fn apply(&self, content: &str) -> String {
        let Some((head, tail)) = content.split_once(ASSETS_PLACEHOLDER) else {
            return content.replace(CSP_SOURCE_PLACEHOLDER, self.csp_source);
        };

        let mut html = String::with_capacity(content.len() + self.assets.len());
        html.push_str(&head.replace(CSP_SOURCE_PLACEHOLDER, self.csp_source));
        html.push_str(self.assets);
        html.push_str(&tail.replace(CSP_SOURCE_PLACEHOLDER, self.csp_source));
        html
    }
}
