//! Small text helpers shared by the renderer and the application shell.

/// Truncate to a character budget, marking the cut with an ellipsis
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Greedy word wrap into lines of at most `max_len` characters. A single
/// word longer than the budget gets its own line rather than being split.
pub fn wrap_lines(text: &str, max_len: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_len {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// File-name-safe slug for exports; falls back to "aim_export"
pub fn sanitize_filename(text: &str, max_len: usize) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let joined = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let slug: String = joined.chars().take(max_len).collect();
    if slug.is_empty() {
        "aim_export".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("hello world", 6), "hello…");
    }

    #[test]
    fn wrap_respects_budget() {
        let lines = wrap_lines("I value honest feedback from my team", 12);
        assert!(lines.iter().all(|l| l.chars().count() <= 12), "{lines:?}");
        assert_eq!(lines.join(" "), "I value honest feedback from my team");
    }

    #[test]
    fn wrap_empty_is_empty() {
        assert!(wrap_lines("", 10).is_empty());
        assert!(wrap_lines("   ", 10).is_empty());
    }

    #[test]
    fn wrap_keeps_long_words_whole() {
        let lines = wrap_lines("a extraordinarily long", 8);
        assert_eq!(lines, vec!["a", "extraordinarily", "long"]);
    }

    #[test]
    fn sanitize_builds_a_slug() {
        assert_eq!(sanitize_filename("My 2026 Map!", 50), "My_2026_Map");
        assert_eq!(sanitize_filename("***", 50), "aim_export");
        assert_eq!(sanitize_filename("", 50), "aim_export");
    }
}
