// src/core/html.rs
// Thin helpers over `scraper` so the page specs read as selector + text steps.

use scraper::{ElementRef, Html, Selector};

/// Compile a selector literal. Only called with constants in `static` initializers,
/// so a bad selector is a programming error caught by the first test that touches it.
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// All text below `el`, concatenated as-is (no trimming).
pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// All text below `el`, trimmed.
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    s!(raw_text(el).trim())
}

/// Trimmed text of the first match of `sel` in the document.
pub fn first_text(doc: &Html, sel: &Selector) -> Option<String> {
    doc.select(sel).next().map(trimmed_text)
}

/// Direct element children of `el` with the given tag name.
/// Nested tables inside a cell don't leak extra cells this way.
pub fn child_elements<'a>(el: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name().eq_ignore_ascii_case(tag))
        .collect()
}
