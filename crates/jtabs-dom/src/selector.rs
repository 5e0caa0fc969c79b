//! Compound `tag.class` selectors.

use crate::Element;

/// A compound selector: optional tag name plus required classes.
///
/// Supports the forms used by the tab markup (`p.tab-title`,
/// `div.tab-content.tabgroup-lang`, `.active`, `pre`). Combinators are not
/// supported; walk the tree for structural queries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    /// Parse a selector such as `ul.tab` or `.tab-content`.
    #[must_use]
    pub fn parse(selector: &str) -> Self {
        let mut parts = selector.trim().split('.');
        let tag = parts
            .next()
            .filter(|tag| !tag.is_empty() && *tag != "*")
            .map(str::to_ascii_lowercase);
        let classes = parts
            .filter(|class| !class.is_empty())
            .map(str::to_owned)
            .collect();
        Self { tag, classes }
    }

    /// Selector matching any element with the given tag.
    #[must_use]
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            classes: Vec::new(),
        }
    }

    /// Require an additional class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag
            && !element.tag.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        self.classes.iter().all(|class| element.has_class(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_and_classes() {
        let selector = Selector::parse("p.tab-title.tabgroup-lang");
        let element = Element::new("p").with_attr("class", "tabgroup-lang tab-title tab-hide");
        assert!(selector.matches(&element));
    }

    #[test]
    fn test_missing_class_does_not_match() {
        let selector = Selector::parse("p.tab-title.tabgroup-lang");
        let element = Element::new("p").with_attr("class", "tab-title tabgroup-other");
        assert!(!selector.matches(&element));
    }

    #[test]
    fn test_wrong_tag_does_not_match() {
        let selector = Selector::parse("div.tab-content");
        assert!(!selector.matches(&Element::new("p").with_attr("class", "tab-content")));
    }

    #[test]
    fn test_class_only_selector() {
        let selector = Selector::parse(".active");
        assert!(selector.matches(&Element::new("li").with_attr("class", "active")));
        assert!(!selector.matches(&Element::new("li")));
    }

    #[test]
    fn test_builder_equals_parsed() {
        assert_eq!(
            Selector::tag("ul").with_class("tab"),
            Selector::parse("ul.tab")
        );
    }
}
