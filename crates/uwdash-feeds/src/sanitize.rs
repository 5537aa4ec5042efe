//! Content Sanitizer: allow-list HTML cleaning plus visible-length truncation.
//!
//! Source APIs return rich HTML bodies. The dashboard only ever shows short
//! teasers, so everything except paragraphs and line breaks is stripped, the
//! visible text is cut to the block's `max_chars` budget, and the result is
//! re-cleaned so a cut in the middle of a paragraph still yields balanced
//! markup.

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Tags that survive sanitization.
pub const ALLOWED_TAGS: [&str; 2] = ["p", "br"];

/// Appended when content is truncated.
pub const ELLIPSIS: char = '…';

static CLEANER: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut builder = ammonia::Builder::default();
    builder
        .tags(ALLOWED_TAGS.into_iter().collect::<HashSet<_>>())
        .generic_attributes(HashSet::new())
        .tag_attributes(HashMap::new())
        .link_rel(None);
    builder
});

// A tag or a character reference. Everything between matches is text.
static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>|&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")
        .expect("valid markup regex")
});

/// One piece of cleaned HTML: either markup or a single visible character.
struct Unit<'a> {
    span: Range<usize>,
    text: &'a str,
    visible: bool,
}

impl Unit<'_> {
    fn is_whitespace(&self) -> bool {
        self.visible && self.text.chars().all(char::is_whitespace)
    }
}

/// Splits cleaned HTML into tags and visible characters. A visible character
/// is a grapheme cluster of text or one character reference such as `&amp;`.
fn units<'a>(html: &'a str) -> Vec<Unit<'a>> {
    let mut out = Vec::new();
    let push_text = |out: &mut Vec<Unit<'a>>, start: usize, end: usize| {
        for (offset, grapheme) in html[start..end].grapheme_indices(true) {
            let from = start + offset;
            out.push(Unit {
                span: from..from + grapheme.len(),
                text: grapheme,
                visible: true,
            });
        }
    };

    let mut cursor = 0;
    for m in MARKUP_RE.find_iter(html) {
        push_text(&mut out, cursor, m.start());
        out.push(Unit {
            span: m.range(),
            text: m.as_str(),
            visible: !m.as_str().starts_with('<'),
        });
        cursor = m.end();
    }
    push_text(&mut out, cursor, html.len());
    out
}

/// Number of characters a reader sees in `html`: tags count zero, entities
/// and grapheme clusters count one.
#[must_use]
pub fn visible_len(html: &str) -> usize {
    units(html).iter().filter(|u| u.visible).count()
}

/// Cleans `html` down to `<p>`/`<br>` and truncates it to `max_chars`
/// visible characters.
///
/// A truncated result ends at the last word boundary inside the budget (or
/// exactly at the budget when the text has no whitespace), followed by `…`.
/// Content that already fits is returned cleaned but otherwise unchanged.
#[must_use]
pub fn sanitize(html: &str, max_chars: usize) -> String {
    let cleaned = CLEANER.clean(html).to_string();
    let units = units(&cleaned);

    let visible: Vec<usize> = units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.visible)
        .map(|(i, _)| i)
        .collect();
    if visible.len() <= max_chars {
        return cleaned;
    }

    let cut = cut_offset(&units, &visible, max_chars);
    let mut truncated = cleaned[..cut].trim_end().to_string();
    truncated.push(ELLIPSIS);

    CLEANER.clean(&truncated).to_string()
}

/// Byte offset at which to cut, given the indices of visible units and a
/// budget smaller than their count.
fn cut_offset(units: &[Unit<'_>], visible: &[usize], max_chars: usize) -> usize {
    if max_chars == 0 {
        return 0;
    }
    let last_kept = &units[visible[max_chars - 1]];
    let next = &units[visible[max_chars]];
    if last_kept.is_whitespace() || next.is_whitespace() {
        return last_kept.span.end;
    }

    // A boundary only counts when at least one word precedes it.
    let Some(first_word) = visible[..max_chars]
        .iter()
        .position(|&i| !units[i].is_whitespace())
    else {
        return last_kept.span.end;
    };
    visible[first_word + 1..max_chars]
        .iter()
        .rev()
        .map(|&i| &units[i])
        .find(|u| u.is_whitespace())
        .map_or(last_kept.span.end, |u| u.span.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_names(html: &str) -> Vec<String> {
        let re = Regex::new(r"</?([A-Za-z0-9]+)").unwrap();
        re.captures_iter(html)
            .map(|c| c[1].to_ascii_lowercase())
            .collect()
    }

    #[test]
    fn strips_disallowed_tags_and_attributes() {
        let out = sanitize(
            r#"<div class="x"><p style="color:red">Hello <b>world</b> <a href="/x">link</a></p></div>"#,
            400,
        );
        assert_eq!(out, "<p>Hello world link</p>");
    }

    #[test]
    fn drops_script_content_entirely() {
        let out = sanitize("<p>safe</p><script>alert(1)</script>", 400);
        assert_eq!(out, "<p>safe</p>");
    }

    #[test]
    fn keeps_line_breaks() {
        let out = sanitize("<p>one<br>two</p>", 400);
        assert_eq!(out, "<p>one<br>two</p>");
    }

    #[test]
    fn short_content_has_no_ellipsis() {
        let out = sanitize("<p>Short teaser.</p>", 100);
        assert_eq!(out, "<p>Short teaser.</p>");
    }

    #[test]
    fn truncates_at_last_word_boundary_and_closes_paragraph() {
        let out = sanitize("<p>The quick brown fox</p>", 12);
        assert_eq!(out, "<p>The quick…</p>");
    }

    #[test]
    fn cut_right_before_whitespace_keeps_whole_word() {
        let out = sanitize("The quick brown fox", 9);
        assert_eq!(out, "The quick…");
    }

    #[test]
    fn hard_cut_when_no_whitespace() {
        let out = sanitize("abcdefghijkl", 5);
        assert_eq!(out, "abcde…");
    }

    #[test]
    fn leading_whitespace_is_not_a_word_boundary() {
        let url = "https://example.com/".repeat(10);
        let out = sanitize(&format!("<p>\n{url}</p>"), 100);
        assert_eq!(out, format!("<p>\n{}…</p>", &url[..99]));
        assert_eq!(visible_len(&out), 101);
    }

    #[test]
    fn truncation_balances_markup_across_paragraphs() {
        let out = sanitize("<p>one two three</p><p>four five six</p>", 17);
        assert_eq!(out, "<p>one two three</p><p>four…</p>");
        assert_eq!(out.matches("<p>").count(), out.matches("</p>").count());
    }

    #[test]
    fn combining_marks_are_never_split() {
        let text = "e\u{301}e\u{301}e\u{301}";
        let out = sanitize(text, 2);
        assert_eq!(out, "e\u{301}e\u{301}…");
    }

    #[test]
    fn zwj_emoji_counts_as_one_character() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert_eq!(visible_len(family), 1);
        let out = sanitize(&format!("{family}{family}{family}"), 2);
        assert_eq!(out, format!("{family}{family}…"));
    }

    #[test]
    fn entities_count_as_one_character() {
        assert_eq!(visible_len("Fish &amp; Chips"), 12);
        assert_eq!(visible_len("<p>a<br>b</p>"), 2);
    }

    #[test]
    fn respects_budget_for_every_valid_max_chars() {
        let paragraph = "<p>Lorem ipsum dolor sit amet, <em>consectetur</em> adipiscing elit. </p>";
        let body = format!(
            "{}<div><img src=x onerror=alert(1)>Extra &amp; more</div>",
            paragraph.repeat(20)
        );
        for max_chars in [100, 250, 400, 600] {
            let out = sanitize(&body, max_chars);
            assert!(
                visible_len(&out) <= max_chars + 1,
                "max_chars={max_chars} produced {} visible characters",
                visible_len(&out)
            );
            assert!(out.ends_with("…</p>"), "unexpected tail for {max_chars}: {out}");
            for name in tag_names(&out) {
                assert!(ALLOWED_TAGS.contains(&name.as_str()), "found <{name}>");
            }
            assert_eq!(out.matches("<p>").count(), out.matches("</p>").count());
        }
    }
}
