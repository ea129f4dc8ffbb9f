// src/markdown.rs
//! Converts model output into styled terminal text.
//!
//! Line oriented: headings, fenced code, lists, quotes and rules are
//! recognised per line, then `**bold**`, `*italic*`/`_italic_` and
//! `` `code` `` inside a line.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

const CODE_STYLE: Style = Style::new().fg(Color::LightCyan);
const QUOTE_STYLE: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC);

pub fn render_markdown(source: &str) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut in_code_block = false;

    for raw in source.lines() {
        let trimmed = raw.trim_start();

        if let Some(rest) = trimmed.strip_prefix("```") {
            in_code_block = !in_code_block;
            let label = rest.trim();
            if in_code_block && !label.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("┌ {}", label),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            continue;
        }

        if in_code_block {
            lines.push(Line::from(vec![
                Span::styled("│ ", Style::default().fg(Color::DarkGray)),
                Span::styled(raw.to_string(), CODE_STYLE),
            ]));
            continue;
        }

        lines.push(render_block_line(raw, trimmed));
    }

    Text::from(lines)
}

fn render_block_line(raw: &str, trimmed: &str) -> Line<'static> {
    if trimmed.is_empty() {
        return Line::from("");
    }

    if let Some((level, heading)) = heading(trimmed) {
        let color = match level {
            1 => Color::LightMagenta,
            2 => Color::LightBlue,
            _ => Color::Cyan,
        };
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        let mut line = Line::from(render_inline(heading, style));
        if level == 1 {
            line = line.patch_style(Style::default().add_modifier(Modifier::UNDERLINED));
        }
        return line;
    }

    if is_rule(trimmed) {
        return Line::from(Span::styled("─".repeat(40), Style::default().fg(Color::DarkGray)));
    }

    if let Some(quote) = trimmed.strip_prefix('>') {
        let mut spans = vec![Span::styled("▌ ", Style::default().fg(Color::DarkGray))];
        spans.extend(render_inline(quote.trim_start(), QUOTE_STYLE));
        return Line::from(spans);
    }

    let indent = " ".repeat(raw.len() - trimmed.len());

    if let Some(item) = bullet_item(trimmed) {
        let mut spans = vec![Span::raw(format!("{}• ", indent))];
        spans.extend(render_inline(item, Style::default()));
        return Line::from(spans);
    }

    if let Some((marker, item)) = numbered_item(trimmed) {
        let mut spans = vec![Span::styled(
            format!("{}{} ", indent, marker),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        spans.extend(render_inline(item, Style::default()));
        return Line::from(spans);
    }

    Line::from(render_inline(raw, Style::default()))
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if rest.is_empty() {
        return Some((level, ""));
    }
    rest.strip_prefix(' ').map(|text| (level, text.trim()))
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&m| compact.chars().all(|c| c == m))
}

fn bullet_item(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
}

fn numbered_item(line: &str) -> Option<(&str, &str)> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let rest = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") "))?;
    Some((&line[..digits + 1], rest))
}

/// Splits a line into spans for inline emphasis and code. Unterminated
/// markers are kept as literal text, and `_` never opens or closes inside
/// a word, so identifiers like `train_test_split` survive.
pub fn render_inline(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;
    let mut prev: Option<char> = None;

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            spans.push(Span::styled(std::mem::take(plain), base));
        }
    };

    while let Some(c) = rest.chars().next() {
        let after_word = prev.is_some_and(|p| p.is_alphanumeric());
        let delimited = match c {
            '`' => closing(rest, "`", false).map(|(inner, tail)| (Span::styled(inner.to_string(), CODE_STYLE), tail)),
            '*' if rest.starts_with("**") => closing(rest, "**", false)
                .map(|(inner, tail)| (Span::styled(inner.to_string(), base.add_modifier(Modifier::BOLD)), tail)),
            '_' if after_word => None,
            '_' if rest.starts_with("__") => closing(rest, "__", true)
                .map(|(inner, tail)| (Span::styled(inner.to_string(), base.add_modifier(Modifier::BOLD)), tail)),
            '*' | '_' => closing(rest, &rest[..1], c == '_')
                .filter(|(inner, _)| !inner.starts_with(' '))
                .map(|(inner, tail)| (Span::styled(inner.to_string(), base.add_modifier(Modifier::ITALIC)), tail)),
            _ => None,
        };

        match delimited {
            Some((span, tail)) => {
                flush(&mut plain, &mut spans);
                spans.push(span);
                rest = tail;
                prev = Some(c);
            }
            None => {
                plain.push(c);
                rest = &rest[c.len_utf8()..];
                prev = Some(c);
            }
        }
    }

    flush(&mut plain, &mut spans);
    spans
}

/// For `text` starting with `marker`, returns the non-empty inner text and
/// what follows the closing marker. With `word_bounded`, a closing marker
/// directly followed by a letter or digit is skipped.
fn closing<'a>(text: &'a str, marker: &str, word_bounded: bool) -> Option<(&'a str, &'a str)> {
    let body = &text[marker.len()..];
    let mut from = 0;

    loop {
        let end = from + body[from..].find(marker)?;
        let tail = &body[end + marker.len()..];

        if word_bounded && tail.chars().next().is_some_and(|n| n.is_alphanumeric()) {
            from = end + marker.len();
            continue;
        }
        if end == 0 {
            return None;
        }
        return Some((&body[..end], tail));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_headings_are_bold_without_hashes() {
        let text = render_markdown("# 线性代数\n### Eigen");
        assert_eq!(line_text(&text.lines[0]), "线性代数");
        assert!(text.lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line_text(&text.lines[1]), "Eigen");
    }

    #[test]
    fn test_code_block_preserves_content() {
        let text = render_markdown("before\n```python\ndef f(x):\n    return **x**\n```\nafter");
        let rendered: Vec<String> = text.lines.iter().map(line_text).collect();
        assert_eq!(
            rendered,
            vec!["before", "┌ python", "│ def f(x):", "│     return **x**", "after"]
        );
    }

    #[test]
    fn test_inline_emphasis_and_code() {
        let spans = render_inline("a **bold** and *it* with `x = 1`", Style::default());
        let contents: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(contents, vec!["a ", "bold", " and ", "it", " with ", "x = 1"]);
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(spans[3].style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(spans[5].style, CODE_STYLE);
    }

    #[test]
    fn test_unterminated_markers_stay_literal() {
        let spans = render_inline("2 * 3 = 6 and snake_case", Style::default());
        let joined: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(joined, "2 * 3 = 6 and snake_case");
    }

    #[test]
    fn test_snake_case_identifiers_keep_underscores() {
        let source = "调用 train_test_split 和 learning_rate_decay 函数";
        let spans = render_inline(source, Style::default());
        let joined: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(joined, source);
        assert!(spans.iter().all(|s| !s.style.add_modifier.contains(Modifier::ITALIC)));

        let spans = render_inline("use __init__ here", Style::default());
        let joined: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(joined, "use init here");
    }

    #[test]
    fn test_underscore_emphasis_at_word_edges() {
        let spans = render_inline("an _italic_ word and __strong__ text", Style::default());
        let contents: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(contents, vec!["an ", "italic", " word and ", "strong", " text"]);
        assert!(spans[1].style.add_modifier.contains(Modifier::ITALIC));
        assert!(spans[3].style.add_modifier.contains(Modifier::BOLD));

        let spans = render_inline("_x_y z_", Style::default());
        let joined: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(joined, "x_y z");
    }

    #[test]
    fn test_lists_quotes_and_rules() {
        let text = render_markdown("- item\n  * nested\n1. first\n> quoted\n---");
        let rendered: Vec<String> = text.lines.iter().map(line_text).collect();
        assert_eq!(rendered[0], "• item");
        assert_eq!(rendered[1], "  • nested");
        assert_eq!(rendered[2], "1. first");
        assert_eq!(rendered[3], "▌ quoted");
        assert_eq!(rendered[4], "─".repeat(40));
    }

    #[test]
    fn test_plain_error_text_renders_verbatim() {
        let text = render_markdown("Error loading content: API Key is missing");
        assert_eq!(text.lines.len(), 1);
        assert_eq!(line_text(&text.lines[0]), "Error loading content: API Key is missing");
    }
}
