//! Compound selectors understood by [`MemoryDom`](super::MemoryDom):
//! an optional tag name followed by any number of `.class` and `#id` parts.
//! Combinators are not supported.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() || input.contains(char::is_whitespace) {
            return None;
        }

        let mut selector = Selector::default();
        let mut rest = input;
        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_end > 0 {
            selector.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            match marker {
                '.' => selector.classes.push(name.to_string()),
                '#' => selector.id = Some(name.to_string()),
                _ => return None,
            }
            rest = &body[end..];
        }

        Some(selector)
    }

    pub(crate) fn matches<'a>(&self, tag: &str, attribute: impl Fn(&str) -> Option<&'a str>) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(expected) = &self.id {
            if attribute("id") != Some(expected.as_str()) {
                return false;
            }
        }
        if self.classes.is_empty() {
            return true;
        }
        let class_list = attribute("class").unwrap_or_default();
        self.classes
            .iter()
            .all(|class| class_list.split_whitespace().any(|candidate| candidate == class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<&'a str> {
        move |name| pairs.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
    }

    #[test]
    fn matches_class_among_several() {
        let selector = Selector::parse(".event__input--destination").unwrap();
        let pairs = [("class", "event__input  event__input--destination")];
        assert!(selector.matches("input", attrs(&pairs)));
        assert!(!selector.matches("input", attrs(&[("class", "event__input")])));
    }

    #[test]
    fn compound_selector_needs_every_part() {
        let selector = Selector::parse("input#event-price.event__input").unwrap();
        let pairs = [("id", "event-price"), ("class", "event__input")];
        assert!(selector.matches("INPUT", attrs(&pairs)));
        assert!(!selector.matches("div", attrs(&pairs)));
        assert!(!selector.matches("input", attrs(&[("class", "event__input")])));
    }

    #[test]
    fn rejects_combinators_and_empty_parts() {
        assert_eq!(Selector::parse(".event .event__header"), None);
        assert_eq!(Selector::parse("form."), None);
        assert_eq!(Selector::parse(""), None);
    }
}
