use std::path::Path;

/// Extract filename from a file path
///
/// Returns the filename component of a path, or "Untitled" if it can't be extracted.
pub fn extract_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Find the next occurrence of `term` in `text`, searching forward from
/// byte position `start`. Case-sensitive. Returns the byte position of the
/// match, or None.
pub fn find_from(text: &str, term: &str, start: usize) -> Option<usize> {
    if term.is_empty() || start >= text.len() {
        return None;
    }
    // `get` returns None if start is not a char boundary, which cannot match.
    text.get(start..)
        .and_then(|tail| tail.find(term))
        .map(|pos| start + pos)
}

/// Find `term` forward from `start`, wrapping once to the buffer start if
/// nothing matches before the end. None only if the wrap also fails.
/// An empty term never matches.
pub fn find_wrapping(text: &str, term: &str, start: usize) -> Option<usize> {
    if term.is_empty() {
        return None;
    }
    if let Some(pos) = find_from(text, term, start) {
        return Some(pos);
    }
    if start > 0 {
        return find_from(text, term, 0);
    }
    None
}

/// Replace every literal occurrence of `find` with `with`.
///
/// Returns (new_text, count_of_replacements). An empty `find` is a no-op,
/// not an error: the input is returned unchanged with count 0.
pub fn replace_all_literal(text: &str, find: &str, with: &str) -> (String, usize) {
    if find.is_empty() {
        return (text.to_string(), 0);
    }
    let count = text.matches(find).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace(find, with), count)
}

/// Compute 1-based (line, column) for a byte position in `text`.
/// Column counts characters since the last newline.
pub fn cursor_line_col(text: &str, pos: usize) -> (usize, usize) {
    let clamped = pos.min(text.len());
    let prefix = match text.get(..clamped) {
        Some(p) => p,
        None => return (1, 1),
    };
    let line = prefix.matches('\n').count() + 1;
    let col = match prefix.rfind('\n') {
        Some(nl) => prefix[nl + 1..].chars().count() + 1,
        None => prefix.chars().count() + 1,
    };
    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename_from_path() {
        assert_eq!(extract_filename("/home/user/test.txt"), "test.txt");
        assert_eq!(extract_filename("notes.md"), "notes.md");
        assert_eq!(extract_filename("/path/with/many/levels/file.rs"), "file.rs");
    }

    #[test]
    fn test_extract_filename_edge_cases() {
        assert_eq!(extract_filename(""), "Untitled");
        assert_eq!(extract_filename("."), "Untitled");
        assert_eq!(extract_filename("/"), "Untitled");
    }

    #[test]
    fn test_find_from_start() {
        let text = "hello world, hello rust";
        assert_eq!(find_from(text, "hello", 0), Some(0));
        assert_eq!(find_from(text, "hello", 1), Some(13));
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let text = "Hello world";
        assert_eq!(find_from(text, "hello", 0), None);
        assert_eq!(find_from(text, "Hello", 0), Some(0));
    }

    #[test]
    fn test_find_past_end() {
        assert_eq!(find_from("abc", "a", 3), None);
        assert_eq!(find_from("abc", "a", 100), None);
    }

    #[test]
    fn test_find_wrapping_wraps_once() {
        let text = "cat dog cat";
        // Forward from position 9 finds nothing, wrap finds the first one.
        assert_eq!(find_wrapping(text, "cat", 9), Some(0));
        // Forward match wins over the wrapped one.
        assert_eq!(find_wrapping(text, "cat", 1), Some(8));
    }

    #[test]
    fn test_find_wrapping_absent_term() {
        assert_eq!(find_wrapping("cat dog", "bird", 3), None);
        assert_eq!(find_wrapping("cat dog", "bird", 0), None);
    }

    #[test]
    fn test_find_empty_term_is_noop() {
        assert_eq!(find_from("anything", "", 0), None);
        assert_eq!(find_wrapping("anything", "", 4), None);
    }

    #[test]
    fn test_replace_all_simple() {
        let (text, count) = replace_all_literal("cat cat cat", "cat", "dog");
        assert_eq!(text, "dog dog dog");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_replace_all_literal_not_regex() {
        let (text, count) = replace_all_literal("a.c abc", "a.c", "x");
        assert_eq!(text, "x abc");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_replace_all_case_sensitive() {
        let (text, count) = replace_all_literal("Cat cat CAT", "cat", "dog");
        assert_eq!(text, "Cat dog CAT");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_replace_all_empty_find_unchanged() {
        let (text, count) = replace_all_literal("hello world", "", "xyz");
        assert_eq!(text, "hello world");
        assert_eq!(count, 0);

        let (text, count) = replace_all_literal("", "", "xyz");
        assert_eq!(text, "");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_replace_all_no_matches() {
        let (text, count) = replace_all_literal("hello world", "rust", "crab");
        assert_eq!(text, "hello world");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cursor_line_col() {
        assert_eq!(cursor_line_col("", 0), (1, 1));
        assert_eq!(cursor_line_col("abc", 2), (1, 3));
        assert_eq!(cursor_line_col("ab\ncd", 3), (2, 1));
        assert_eq!(cursor_line_col("ab\ncd", 5), (2, 3));
        // Past the end clamps to the end.
        assert_eq!(cursor_line_col("ab\ncd", 50), (2, 3));
    }
}
