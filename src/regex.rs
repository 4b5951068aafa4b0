//! regex.rs
//!
//! The `regex` crate has no lookaround. The block splitter needs a lookahead
//! split and the token scan needs a lookbehind word test, so both are
//! emulated here with match positions and string slicing.

/// Splits `s` in front of every occurrence of any of `literals`, keeping the
/// literal at the start of the following piece. This behaves like a split on
/// the lookahead `(?=lit1|lit2|...)`: an occurrence at offset 0 does not
/// produce an empty leading piece, and overlapping occurrences each start a
/// new piece. Matching is case-sensitive.
///
/// This function:
/// - Collects the byte offset of every occurrence of every non-empty literal.
/// - Sorts and deduplicates those offsets, dropping offset 0.
/// - Cuts `s` at each remaining offset.
///
/// # Arguments
///
/// * `s` - The text to split.
/// * `literals` - Delimiters to split in front of. Empty ones are ignored.
///
/// # Returns
///
/// The pieces of `s` in order. They always concatenate back to `s`, and
/// there is at least one piece (the whole of `s` when nothing matches).
///
/// # Examples
///
/// ```
/// use checkin_resumen::regex::split_before_literals;
///
/// let pieces = split_before_literals("Kids > A 9a Voluntarios CDV > B 8a", &["Kids > ", "Voluntarios CDV > "]);
/// assert_eq!(pieces, vec!["Kids > A 9a ", "Voluntarios CDV > B 8a"]);
/// ```
pub fn split_before_literals<'a, S: AsRef<str>>(s: &'a str, literals: &[S]) -> Vec<&'a str> {
    // Find every cut point.
    let mut cuts: Vec<usize> = Vec::new();
    for lit in literals {
        let lit = lit.as_ref();
        if lit.is_empty() {
            continue;
        }
        let mut pos = 0;
        while let Some(found) = s[pos..].find(lit) {
            let start = pos + found;
            if start > 0 {
                cuts.push(start);
            }
            // step one char, not the whole literal, so overlaps are seen
            pos = start + s[start..].chars().next().map(char::len_utf8).unwrap_or(1);
            if pos >= s.len() {
                break;
            }
        }
    }
    // Literals may share a start; cut there once.
    cuts.sort_unstable();
    cuts.dedup();

    // Slice between consecutive cuts.
    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        pieces.push(&s[start..cut]);
        start = cut;
    }
    pieces.push(&s[start..]);
    pieces
}

/// Returns the last `n` chars of `s` (all of `s` if it is shorter).
pub fn last_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `true` when `window` ends with `word` followed by exactly one whitespace
/// char, and `word` starts on a word boundary. Comparison ignores case.
/// This is the lookbehind `\bword\s$`.
pub fn ends_with_word(window: &str, word: &str) -> bool {
    let mut chars = window.chars();
    match chars.next_back() {
        Some(c) if c.is_whitespace() => {}
        _ => return false,
    }
    let rest = chars.as_str();
    let word_len = word.chars().count();
    if word_len == 0 || rest.chars().count() < word_len {
        return false;
    }
    let tail = last_chars(rest, word_len);
    if tail.to_lowercase() != word.to_lowercase() {
        return false;
    }
    let before = &rest[..rest.len() - tail.len()];
    match (before.chars().next_back(), tail.chars().next()) {
        (Some(b), Some(t)) => is_word_char(b) != is_word_char(t),
        (None, Some(t)) => is_word_char(t),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_delimiters() {
        let s = "intro Voluntarios CDV > A 7a Kids > B 8a";
        assert_eq!(
            split_before_literals(s, &["Voluntarios CDV > ", "Kids > "]),
            vec!["intro ", "Voluntarios CDV > A 7a ", "Kids > B 8a"]
        );
    }

    #[test]
    fn test_split_at_start_and_edges() {
        assert_eq!(split_before_literals("XaXb", &["X"]), vec!["Xa", "Xb"]);
        assert_eq!(split_before_literals("", &["X"]), vec![""]);
        assert_eq!(split_before_literals("none", &["X"]), vec!["none"]);
        assert_eq!(split_before_literals("aXb", &[""]), vec!["aXb"]);
    }

    #[test]
    fn test_split_is_case_sensitive() {
        assert_eq!(split_before_literals("a kids > b", &["Kids > "]), vec!["a kids > b"]);
    }

    #[test]
    fn test_split_overlapping() {
        assert_eq!(split_before_literals("xaaa", &["aa"]), vec!["x", "a", "aa"]);
    }

    #[test]
    fn test_split_non_ascii() {
        assert_eq!(
            split_before_literals("ñ > é ñ > x", &["ñ > "]),
            vec!["ñ > é ", "ñ > x"]
        );
    }

    #[test]
    fn test_last_chars() {
        assert_eq!(last_chars("héllo", 3), "llo");
        assert_eq!(last_chars("héllo", 4), "éllo");
        assert_eq!(last_chars("ab", 8), "ab");
        assert_eq!(last_chars("ab", 0), "");
    }

    #[test]
    fn test_ends_with_word() {
        assert!(ends_with_word("Sunday ", "sunday"));
        assert!(ends_with_word(" SUNDAY ", "sunday"));
        assert!(ends_with_word("e:sunday\n", "sunday"));
        assert!(!ends_with_word("xsunday ", "sunday"));
        assert!(!ends_with_word("sunday", "sunday"));
        assert!(!ends_with_word("sunday  ", "sunday"));
        assert!(!ends_with_word("monday ", "sunday"));
    }
}
