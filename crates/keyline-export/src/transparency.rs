//! Transparency post-processing.
//!
//! Guarantees that a finished SVG document declares both "no default
//! fill" and a transparent background on its root element. Presence is
//! checked by substring scan, so the operation is idempotent: running it
//! twice produces the same result as running it once. Nothing else in
//! the document is altered.
//!
//! Pure string transformation, no I/O.

/// Declaration marking the document as having no default fill.
pub const NO_FILL_DECL: &str = r#"fill="none""#;

/// Declaration marking the document background as transparent.
pub const TRANSPARENT_BG_DECL: &str = "background-color: transparent";

/// Ensure the root `<svg>` element declares no default fill and a
/// transparent background.
///
/// Each declaration is injected only if its substring is absent from the
/// document, so existing declarations are never duplicated. Documents
/// without a root `<svg>` tag are returned unchanged (they fail the
/// sanity check elsewhere).
#[must_use]
pub fn ensure_transparent(markup: &str) -> String {
    let mut patched = markup.to_owned();

    if !patched.contains(NO_FILL_DECL) {
        patched = inject_root_attribute(&patched, NO_FILL_DECL);
    }

    if !patched.contains(TRANSPARENT_BG_DECL) {
        let style = format!(r#"style="{TRANSPARENT_BG_DECL}""#);
        patched = inject_root_attribute(&patched, &style);
    }

    patched
}

/// Insert an attribute into the root `<svg>` opening tag.
///
/// Handles both `<svg ...>` and self-closing `<svg .../>` forms. When no
/// root tag can be located, the document is returned unchanged.
fn inject_root_attribute(markup: &str, attribute: &str) -> String {
    let Some(open) = markup.find("<svg") else {
        return markup.to_owned();
    };
    let Some(relative_end) = markup[open..].find('>') else {
        return markup.to_owned();
    };

    let mut insert_at = open + relative_end;
    if markup[..insert_at].ends_with('/') {
        insert_at -= 1;
    }

    let (head, tail) = markup.split_at(insert_at);
    format!("{head} {attribute}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><path d="M0,0 L1,1z"/></svg>"#;

    #[test]
    fn both_declarations_are_added() {
        let patched = ensure_transparent(BARE);
        assert!(patched.contains(NO_FILL_DECL));
        assert!(patched.contains(TRANSPARENT_BG_DECL));
    }

    #[test]
    fn declarations_land_on_the_root_tag() {
        let patched = ensure_transparent(BARE);
        let root_end = patched.find('>').unwrap_or(patched.len());
        let root_tag = &patched[..root_end];
        assert!(root_tag.contains(NO_FILL_DECL));
        assert!(root_tag.contains(TRANSPARENT_BG_DECL));
    }

    #[test]
    fn existing_no_fill_is_not_duplicated() {
        let input = r#"<svg fill="none" xmlns="http://www.w3.org/2000/svg"></svg>"#;
        let patched = ensure_transparent(input);
        assert_eq!(patched.matches(NO_FILL_DECL).count(), 1);
    }

    #[test]
    fn existing_background_is_not_duplicated() {
        let input =
            r#"<svg style="background-color: transparent" xmlns="http://www.w3.org/2000/svg"></svg>"#;
        let patched = ensure_transparent(input);
        assert_eq!(patched.matches(TRANSPARENT_BG_DECL).count(), 1);
    }

    #[test]
    fn idempotent() {
        let once = ensure_transparent(BARE);
        let twice = ensure_transparent(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn path_content_is_untouched() {
        let patched = ensure_transparent(BARE);
        assert!(patched.contains(r#"<path d="M0,0 L1,1z"/>"#));
    }

    #[test]
    fn self_closing_root_is_handled() {
        let input = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1"/>"#;
        let patched = ensure_transparent(input);
        assert!(patched.ends_with("/>"));
        assert!(patched.contains(NO_FILL_DECL));
        assert!(patched.contains(TRANSPARENT_BG_DECL));
    }

    #[test]
    fn xml_declaration_is_preserved() {
        let input = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{BARE}");
        let patched = ensure_transparent(&input);
        assert!(patched.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(patched.contains(NO_FILL_DECL));
    }

    #[test]
    fn document_without_root_tag_is_unchanged_structurally() {
        let patched = ensure_transparent("not markup at all");
        assert_eq!(patched, "not markup at all");
    }
}
