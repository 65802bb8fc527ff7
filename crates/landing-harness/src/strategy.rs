// Strategy - one way of matching a semantic element in the live document
//
// Strategies are plain data. A target lists several of them in priority
// order; the resolver renders each one into a runtime selector and tries
// them in that order.
//
// Rendering:
// - `selector()` produces the selector handed to the automation runtime.
//   It may use runtime-only pseudo classes such as `:has-text()`.
// - `css_selector()` produces a standard CSS selector when one exists. Probes that
//   run as page script (computed style, bounding box, scrolling) need it.

use std::fmt;

/// A single element-matching strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Raw CSS selector, used verbatim
    Css(String),
    /// Element id (`#first-name`)
    Id(String),
    /// Partial class match (`button[class*="carousel-next"]`)
    ClassFragment {
        tag: Option<String>,
        fragment: String,
    },
    /// ARIA role attribute (`[role="combobox"]`)
    Role { role: String },
    /// Partial `aria-label` match (`button[aria-label*="Next"]`)
    AriaLabel { tag: String, fragment: String },
    /// Element containing visible text, case-insensitive substring
    Text { tag: String, text: String },
    /// Element containing an icon whose class contains the fragment
    HasIcon { tag: String, icon_fragment: String },
    /// Inner strategy restricted to descendants of `scope`
    Scoped { scope: String, inner: Box<Strategy> },
}

impl Strategy {
    pub fn css(selector: impl Into<String>) -> Self {
        Strategy::Css(selector.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Strategy::Id(id.into())
    }

    /// Class fragment match on any element.
    pub fn class_fragment(fragment: impl Into<String>) -> Self {
        Strategy::ClassFragment {
            tag: None,
            fragment: fragment.into(),
        }
    }

    /// Class fragment match restricted to one tag.
    pub fn tagged_class_fragment(tag: impl Into<String>, fragment: impl Into<String>) -> Self {
        Strategy::ClassFragment {
            tag: Some(tag.into()),
            fragment: fragment.into(),
        }
    }

    pub fn role(role: impl Into<String>) -> Self {
        Strategy::Role { role: role.into() }
    }

    pub fn aria_label(tag: impl Into<String>, fragment: impl Into<String>) -> Self {
        Strategy::AriaLabel {
            tag: tag.into(),
            fragment: fragment.into(),
        }
    }

    pub fn text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Strategy::Text {
            tag: tag.into(),
            text: text.into(),
        }
    }

    pub fn has_icon(tag: impl Into<String>, icon_fragment: impl Into<String>) -> Self {
        Strategy::HasIcon {
            tag: tag.into(),
            icon_fragment: icon_fragment.into(),
        }
    }

    /// Restricts this strategy to descendants of `scope`.
    pub fn within(self, scope: impl Into<String>) -> Self {
        Strategy::Scoped {
            scope: scope.into(),
            inner: Box::new(self),
        }
    }

    /// Selector understood by the automation runtime.
    pub fn selector(&self) -> String {
        // Every variant has a runtime rendering
        self.render(true).unwrap_or_default()
    }

    /// Standard CSS form of this strategy, if it has one.
    pub fn css_selector(&self) -> Option<String> {
        self.render(false)
    }

    fn render(&self, runtime: bool) -> Option<String> {
        match self {
            Strategy::Css(selector) => Some(selector.clone()),
            Strategy::Id(id) => Some(format!("#{}", id)),
            Strategy::ClassFragment { tag, fragment } => Some(format!(
                "{}[class*={}]",
                tag.as_deref().unwrap_or(""),
                quote(fragment)
            )),
            Strategy::Role { role } => Some(format!("[role={}]", quote(role))),
            Strategy::AriaLabel { tag, fragment } => {
                Some(format!("{}[aria-label*={}]", tag, quote(fragment)))
            }
            Strategy::Text { tag, text } => {
                runtime.then(|| format!("{}:has-text({})", tag, quote(text)))
            }
            Strategy::HasIcon { tag, icon_fragment } => {
                Some(format!("{}:has(svg[class*={}])", tag, quote(icon_fragment)))
            }
            Strategy::Scoped { scope, inner } => inner.render(runtime).map(|selector| {
                // Every branch of a selector list gets the scope
                split_list(scope)
                    .into_iter()
                    .flat_map(|outer| {
                        split_list(&selector)
                            .into_iter()
                            .map(move |branch| format!("{} {}", outer, branch))
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            }),
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Strategy::Css(_) => "css",
            Strategy::Id(_) => "id",
            Strategy::ClassFragment { .. } => "class-fragment",
            Strategy::Role { .. } => "role",
            Strategy::AriaLabel { .. } => "aria-label",
            Strategy::Text { .. } => "text",
            Strategy::HasIcon { .. } => "icon",
            Strategy::Scoped { inner, .. } => inner.kind(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.selector())
    }
}

// Double-quoted attribute/text value with `"` and `\` escaped
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

// Splits a selector list on commas outside brackets, parentheses and quotes
fn split_list(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in selector.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(selector[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(selector[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}
