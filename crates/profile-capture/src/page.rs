//! Read-only access to a rendered profile page.
//!
//! A [`ProfilePage`] wraps a parsed DOM snapshot (the serialized outer HTML of
//! the live document) together with the address it was captured from. The
//! free functions in this module are the traversal primitives both extraction
//! engines build on: child / sibling / ancestor walks and text retrieval.
//!
//! Nothing here mutates the tree. Extraction runs synchronously against the
//! parsed document; callers on an async runtime should finish extraction
//! before awaiting anything, since `scraper::Html` is not `Send`.

use crate::error::ExtractError;
use scraper::{ElementRef, Html, Selector};

/// A parsed page snapshot plus the URL it was rendered from.
#[derive(Debug)]
pub struct ProfilePage {
    document: Html,
    url: String,
}

impl ProfilePage {
    /// Parse a page snapshot captured at `url`.
    pub fn parse(html: &str, url: impl Into<String>) -> Self {
        Self {
            document: Html::parse_document(html),
            url: url.into(),
        }
    }

    /// The address the snapshot was captured from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The underlying parsed document.
    pub fn document(&self) -> &Html {
        &self.document
    }

    /// First element in document order matching `selector`.
    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.document.select(selector).next()
    }

    /// All elements in document order matching `selector`.
    pub fn select_all(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.document.select(selector).collect()
    }

    /// Element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(id))
    }

    /// Content block of an anchored profile section.
    ///
    /// Profile sections are introduced by an empty anchor element carrying the
    /// section id, followed by a header element, followed by the content. The
    /// content is therefore the anchor's second following element sibling.
    pub fn section_after_anchor(&self, anchor_id: &str) -> Option<ElementRef<'_>> {
        let anchor = self.element_by_id(anchor_id)?;
        let header = next_element_sibling(anchor)?;
        next_element_sibling(header)
    }
}

/// Compile a CSS selector, reporting failures as an extraction error.
pub fn compile(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        css,
        message: format!("{e:?}"),
    })
}

/// Direct element children of `el`, in order.
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Direct element children of `el` with the given tag name, in order.
pub fn children_named<'a>(
    el: ElementRef<'a>,
    tag: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    child_elements(el).filter(move |child| child.value().name() == tag)
}

/// The `index`-th direct child of `el` with the given tag name.
pub fn nth_child_named<'a>(el: ElementRef<'a>, tag: &'static str, index: usize) -> Option<ElementRef<'a>> {
    children_named(el, tag).nth(index)
}

/// The next sibling of `el` that is an element, skipping text and comments.
pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().filter_map(ElementRef::wrap).next()
}

/// Nearest inclusive ancestor of `el` with the given tag name.
pub fn closest<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    if el.value().name() == tag {
        return Some(el);
    }
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == tag)
}

/// Whether an element strictly between `el` and `scope` carries `class`.
///
/// The walk stops at `scope`; ancestors above it are not considered.
pub fn has_class_between(el: ElementRef<'_>, scope: ElementRef<'_>, class: &str) -> bool {
    for ancestor in el.ancestors().filter_map(ElementRef::wrap) {
        if ancestor.id() == scope.id() {
            return false;
        }
        if ancestor.value().classes().any(|c| c == class) {
            return true;
        }
    }
    false
}

/// Rendered text of an element: all descendant text with whitespace runs
/// collapsed to single spaces, trimmed at both ends.
pub fn inner_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for piece in el.text() {
        raw.push_str(piece);
    }
    collapse_whitespace(&raw)
}

/// Raw concatenated descendant text of an element, untrimmed.
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Rendered text of the first descendant of `scope` matching `selector`.
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(inner_text)
}

fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    buf.trim_end().to_string()
}
