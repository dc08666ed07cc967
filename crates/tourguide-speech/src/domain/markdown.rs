//! Markdown to narratable plain text.

use std::ops::Range;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Removes inline markup so `text` can be read aloud.
///
/// Only emphasis, strong emphasis, inline code and links are touched
/// (`**x**`, `__x__`, `*x*`, `_x_`, `` `x` `` become `x`; `[t](u)` becomes
/// `t`). Everything else, including list markers, escapes and entities,
/// is copied from the source unchanged, so stripping twice equals stripping
/// once.
#[must_use]
pub fn strip_markdown(text: &str) -> String {
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    let mut links: Vec<(Range<usize>, Option<Range<usize>>)> = Vec::new();

    for (event, range) in Parser::new(text).into_offset_iter() {
        if !matches!(event, Event::End(TagEnd::Link)) {
            if let Some((_, inner)) = links.last_mut() {
                *inner = Some(match inner.take() {
                    Some(span) => span.start.min(range.start)..span.end.max(range.end),
                    None => range.clone(),
                });
            }
        }
        match event {
            Event::Start(Tag::Emphasis) => delimiters(&mut edits, &range, 1),
            Event::Start(Tag::Strong) => delimiters(&mut edits, &range, 2),
            Event::Start(Tag::Link { .. }) => links.push((range, None)),
            Event::End(TagEnd::Link) => {
                if let Some((outer, inner)) = links.pop() {
                    match inner {
                        Some(inner) => {
                            edits.push((outer.start..inner.start, String::new()));
                            edits.push((inner.end..outer.end, String::new()));
                        }
                        None => edits.push((outer, String::new())),
                    }
                }
            }
            Event::Code(code) => edits.push((range, strip_markdown(&code))),
            _ => {}
        }
    }

    edits.sort_by_key(|(range, _)| range.start);
    let mut plain = String::with_capacity(text.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        if range.start < cursor {
            continue;
        }
        plain.push_str(&text[cursor..range.start]);
        plain.push_str(&replacement);
        cursor = range.end;
    }
    plain.push_str(&text[cursor..]);
    plain.trim_end().to_owned()
}

/// Drops `width` delimiter bytes from each end of an emphasis span.
fn delimiters(edits: &mut Vec<(Range<usize>, String)>, span: &Range<usize>, width: usize) {
    if span.len() >= 2 * width {
        edits.push((span.start..span.start + width, String::new()));
        edits.push((span.end - width..span.end, String::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_each_inline_form() {
        assert_eq!(strip_markdown("**x**"), "x");
        assert_eq!(strip_markdown("__x__"), "x");
        assert_eq!(strip_markdown("*x*"), "x");
        assert_eq!(strip_markdown("_x_"), "x");
        assert_eq!(strip_markdown("`x`"), "x");
        assert_eq!(strip_markdown("[t](u)"), "t");
    }

    #[test]
    fn test_strips_bold_attraction_name() {
        assert_eq!(
            strip_markdown("**Red Fort** is a fort."),
            "Red Fort is a fort."
        );
    }

    #[test]
    fn test_mixed_markup_in_one_sentence() {
        let text = "Visit [the *Lotus* Temple](https://example.org) and try `chaat`, it is __great__.";

        assert_eq!(
            strip_markdown(text),
            "Visit the Lotus Temple and try chaat, it is great."
        );
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(strip_markdown("1648"), "1648");
        assert_eq!(strip_markdown("snake_case_name stays"), "snake_case_name stays");
    }

    #[test]
    fn test_block_structure_is_kept() {
        assert_eq!(
            strip_markdown("First **part**.\n\nSecond part."),
            "First part.\n\nSecond part."
        );
        assert_eq!(strip_markdown("- item `a`\n- item b"), "- item a\n- item b");
    }

    #[test]
    fn test_leading_number_is_spoken() {
        assert_eq!(
            strip_markdown("1648. The year the fort was built."),
            "1648. The year the fort was built."
        );
    }

    #[test]
    fn test_escapes_and_entities_are_copied() {
        assert_eq!(strip_markdown("\\*not emphasis\\*"), "\\*not emphasis\\*");
        assert_eq!(strip_markdown("Tickets &amp;amp; tours"), "Tickets &amp;amp; tours");
    }

    #[test]
    fn test_nested_emphasis_inside_link() {
        assert_eq!(strip_markdown("***Jama Masjid***"), "Jama Masjid");
        assert_eq!(strip_markdown("see [**Raj Ghat**](https://x.y) now"), "see Raj Ghat now");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let samples = [
            "**Red Fort** is a fort.",
            "_Oh_, you're near [Humayun's Tomb](https://x.y)!",
            "Line one\n\nLine *two*\n- item `a`\n- item b",
            "Did you know that __Qutub Minar__ is 73 m tall?",
            "1648. The year the fort was built.",
            "\\*not emphasis\\*",
            "Tickets &amp;amp; tours",
            "`*starred*` and <https://example.org>",
        ];

        for sample in samples {
            let once = strip_markdown(sample);
            assert_eq!(strip_markdown(&once), once, "not idempotent for {sample:?}");
        }
    }
}
