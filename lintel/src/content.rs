//! Dialog body content: literal text, a prebuilt subtree, or a builder
//! closure evaluated each time the panel renders.

use std::fmt;
use std::sync::Arc;

use joist::{Element, Style, TextWrap};

/// Body content for a dialog panel.
#[derive(Clone)]
pub enum ContentSpec {
    /// A plain paragraph, word-wrapped to the panel width.
    Text(String),
    /// A prebuilt element subtree.
    Node(Element),
    /// Deferred content, built fresh on every render.
    Build(Arc<dyn Fn() -> Element + Send + Sync>),
}

impl fmt::Debug for ContentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSpec::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ContentSpec::Node(el) => f.debug_tuple("Node").field(&el.id).finish(),
            ContentSpec::Build(_) => f.write_str("Build(..)"),
        }
    }
}

impl From<&str> for ContentSpec {
    fn from(text: &str) -> Self {
        ContentSpec::Text(text.to_string())
    }
}

impl From<String> for ContentSpec {
    fn from(text: String) -> Self {
        ContentSpec::Text(text)
    }
}

impl From<Element> for ContentSpec {
    fn from(el: Element) -> Self {
        ContentSpec::Node(el)
    }
}

/// Overrides applied to the wrapper element the content is built into.
#[derive(Debug, Clone, Default)]
pub struct ContentOverrides {
    pub id: Option<String>,
    pub style: Option<Style>,
}

/// Materialize the content into a wrapper element carrying the overrides.
pub fn render_content(spec: &ContentSpec, overrides: &ContentOverrides) -> Element {
    let body = match spec {
        ContentSpec::Text(text) => Element::text(text).text_wrap(TextWrap::Wrap),
        ContentSpec::Node(el) => el.clone(),
        ContentSpec::Build(build) => build(),
    };

    let mut wrapper = Element::col().child(body);
    if let Some(id) = &overrides.id {
        wrapper = wrapper.id(id);
    }
    if let Some(style) = overrides.style.clone() {
        wrapper = wrapper.style(style);
    }
    wrapper
}

#[cfg(test)]
mod tests {
    use super::*;
    use joist::element::{find_element, Content};

    #[test]
    fn text_spec_wraps() {
        let spec = ContentSpec::from("hello there");
        let el = render_content(
            &spec,
            &ContentOverrides {
                id: Some("body".into()),
                style: None,
            },
        );

        assert_eq!(el.id, "body");
        let child = find_element(&el, "body").and_then(|w| match &w.content {
            Content::Children(children) => children.first(),
            _ => None,
        });
        let child = child.expect("wrapper has the text child");
        assert_eq!(child.text_wrap, TextWrap::Wrap);
    }

    #[test]
    fn build_spec_runs_closure() {
        let spec = ContentSpec::Build(Arc::new(|| Element::text("fresh").id("inner")));
        let el = render_content(&spec, &ContentOverrides::default());

        assert!(find_element(&el, "inner").is_some());
    }
}
