//! Denylist sanitizer for contact form text.
//!
//! Strips angle brackets, `javascript:` schemes and inline `on<word>=`
//! handlers, then caps the length. This blunts naive HTML injection in the
//! notification email; it is not an HTML encoder and will not stop a
//! determined attacker.

use std::sync::LazyLock;

use regex::Regex;

pub const MAX_FIELD_CHARS: usize = 5000;

static JS_SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("Invalid regex"));

static EVENT_HANDLER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on[a-z0-9_]+=").expect("Invalid regex"));

/// Sanitize one text field.
///
/// Removing one pattern can splice together another (`javaonx=script:`),
/// so the strip pass repeats until the text stops changing. Each pass that
/// changes anything makes the text shorter, so this terminates. Truncation
/// runs last; a prefix of clean text is still clean.
pub fn sanitize(input: &str) -> String {
    let mut current = strip_once(input);
    loop {
        let next = strip_once(&current);
        if next == current {
            break;
        }
        current = next;
    }

    if current.chars().count() > MAX_FIELD_CHARS {
        current = current.chars().take(MAX_FIELD_CHARS).collect();
    }
    current
}

fn strip_once(input: &str) -> String {
    let without_brackets = input.replace(['<', '>'], "");
    let without_scheme = JS_SCHEME_RE.replace_all(&without_brackets, "");
    EVENT_HANDLER_RE.replace_all(&without_scheme, "").into_owned()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn strips_angle_brackets() {
        assert_eq!(sanitize("<script>alert(1)</script>"), "scriptalert(1)/script");
    }

    #[test]
    fn strips_javascript_scheme_any_case() {
        assert_eq!(sanitize("click JavaScript:void(0) now"), "click void(0) now");
        assert_eq!(sanitize("JAVASCRIPT:x"), "x");
    }

    #[test]
    fn strips_event_handlers_any_case() {
        assert_eq!(sanitize("img src=x onerror=alert(1)"), "img src=x alert(1)");
        assert_eq!(sanitize("OnMouseOver=steal()"), "steal()");
    }

    #[test]
    fn leaves_plain_text_alone() {
        let text = "Hi, I'd like a quote for 3 pages. Call me on 555-0100.";

        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn bare_on_equals_is_kept() {
        // "on=" has no handler name, so nothing to strip
        assert_eq!(sanitize("turn on= please"), "turn on= please");
    }

    #[test]
    fn spliced_patterns_are_removed() {
        assert_eq!(sanitize("javaonx=script:alert(1)"), "alert(1)");
        assert_eq!(sanitize("java<script:x"), "x");
        assert_eq!(sanitize("o<nload=1"), "1");
    }

    #[test]
    fn truncates_to_max_chars() {
        let long = "é".repeat(MAX_FIELD_CHARS + 100);

        let out = sanitize(&long);

        assert_eq!(out.chars().count(), MAX_FIELD_CHARS);
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(sanitize(""), "");
    }

    fn has_event_handler(s: &str) -> bool {
        let lower = s.to_ascii_lowercase();
        lower.match_indices("on").any(|(i, _)| {
            let rest = &lower[i + 2..];
            let word = rest
                .bytes()
                .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
                .count();
            word > 0 && rest.as_bytes().get(word) == Some(&b'=')
        })
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(input in ".{0,200}") {
            let once = sanitize(&input);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn sanitize_is_idempotent_on_hostile_input(
            input in "([<>]|javascript:|JavaScript:|on[a-z]{1,4}=|java|script:|o|n|=|[a-z ]){0,40}"
        ) {
            let once = sanitize(&input);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn output_has_no_denylisted_patterns(
            input in "([<>]|javascript:|JAVASCRIPT:|on[a-zA-Z]{1,6}=|java|script:|o|n|=|[a-zA-Z0-9 ]){0,40}"
        ) {
            let out = sanitize(&input);
            prop_assert!(!out.contains('<'));
            prop_assert!(!out.contains('>'));
            prop_assert!(!out.to_ascii_lowercase().contains("javascript:"));
            prop_assert!(!has_event_handler(&out));
        }

        #[test]
        fn output_never_exceeds_max_chars(input in ".{0,6000}") {
            prop_assert!(sanitize(&input).chars().count() <= MAX_FIELD_CHARS);
        }
    }
}
