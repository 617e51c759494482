use crate::ui::span::{Span, SpanLine, WrapMode};
use unicode_width::UnicodeWidthChar;

pub struct Layout;

impl Layout {
    /// Re-flows span lines into the terminal width: wrappable spans break
    /// onto continuation lines, no-wrap spans are truncated at the edge.
    pub fn compose(lines: &[SpanLine], width: u16) -> Vec<SpanLine> {
        let width = width.max(1) as usize;
        let mut out = Vec::new();

        for line in lines {
            let mut current: SpanLine = Vec::new();
            let mut used = 0usize;

            for span in line {
                match span.wrap_mode {
                    WrapMode::NoWrap => {
                        let remaining = width.saturating_sub(used);
                        if remaining == 0 {
                            continue;
                        }
                        let (head, head_width) = take_width(&span.text, remaining);
                        if !head.is_empty() {
                            used += head_width;
                            current.push(Span {
                                text: head,
                                style: span.style,
                                wrap_mode: span.wrap_mode,
                            });
                        }
                    }
                    WrapMode::Wrap => {
                        let mut rest = span.text.as_str();
                        while !rest.is_empty() {
                            let remaining = width.saturating_sub(used);
                            let (head, head_width) = take_width(rest, remaining);
                            if head.is_empty() {
                                if used == 0 {
                                    // Glyph wider than the whole line.
                                    break;
                                }
                                out.push(std::mem::take(&mut current));
                                used = 0;
                                continue;
                            }
                            used += head_width;
                            rest = &rest[head.len()..];
                            current.push(Span {
                                text: head,
                                style: span.style,
                                wrap_mode: span.wrap_mode,
                            });
                        }
                    }
                }
            }

            out.push(current);
        }

        out
    }
}

/// Longest prefix of `text` that fits in `max_width` columns, plus its width.
fn take_width(text: &str, max_width: usize) -> (String, usize) {
    let mut head = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        head.push(ch);
    }
    (head, used)
}

#[cfg(test)]
mod tests {
    use super::Layout;
    use crate::ui::span::Span;

    #[test]
    fn wraps_long_spans_onto_continuation_lines() {
        let lines = vec![vec![Span::new("abcdefghij")]];
        let composed = Layout::compose(&lines, 4);
        let texts: Vec<String> = composed
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect())
            .collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn truncates_no_wrap_spans_at_the_edge() {
        let lines = vec![vec![Span::new("abcdefghij").no_wrap()]];
        let composed = Layout::compose(&lines, 4);
        assert_eq!(composed.len(), 1);
        assert_eq!(composed[0][0].text, "abcd");
    }
}
