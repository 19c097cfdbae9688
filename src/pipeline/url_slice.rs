//! URL path slicing
//!
//! The URL contributes the part of its path after the host and before the
//! query string: everything after the 3rd `/` and up to the first `?` that
//! follows it. For `http://example.com/a/b/c?x=1` that is `a/b/c`.

/// Byte index of the `n`-th (1-based) occurrence of `ch` in `input`
///
/// Returns `None` when `ch` occurs fewer than `n` times or `n` is 0.
pub fn nth_index_of(input: &str, ch: char, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    input.match_indices(ch).nth(n - 1).map(|(i, _)| i)
}

/// The path portion of `url` used for phrase extraction
///
/// Returns `None` when the URL has no 3rd `/`, i.e. no path at all. Callers
/// treat that as an empty fragment.
pub fn url_fragment(url: &str) -> Option<&str> {
    let start = nth_index_of(url, '/', 3)? + 1;
    let end = match nth_index_of(url, '?', 1) {
        Some(q) if q >= start => q,
        _ => url.len(),
    };
    Some(&url[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nth_index_of() {
        let url = "http://example.com/a/b/c?x=1";
        assert_eq!(nth_index_of(url, '/', 1), Some(5));
        assert_eq!(nth_index_of(url, '/', 2), Some(6));
        assert_eq!(nth_index_of(url, '/', 3), Some(18));
        assert_eq!(nth_index_of(url, '?', 1), Some(24));
    }

    #[test]
    fn test_nth_index_of_missing() {
        assert_eq!(nth_index_of("http://example.com", '/', 3), None);
        assert_eq!(nth_index_of("no slashes here", '/', 1), None);
        assert_eq!(nth_index_of("a/b", '/', 0), None);
    }

    #[test]
    fn test_fragment_with_query() {
        assert_eq!(url_fragment("http://example.com/a/b/c?x=1"), Some("a/b/c"));
    }

    #[test]
    fn test_fragment_without_query() {
        assert_eq!(
            url_fragment("https://blog.example.org/rust/ownership-explained"),
            Some("rust/ownership-explained")
        );
    }

    #[test]
    fn test_question_mark_before_path() {
        // A '?' before the path start is ignored; slice runs to the end
        assert_eq!(url_fragment("http://a?b/c/deep-dive"), Some("c/deep-dive"));
    }

    #[test]
    fn test_no_path() {
        assert_eq!(url_fragment("http://example.com"), None);
        assert_eq!(url_fragment(""), None);
    }

    #[test]
    fn test_root_path() {
        assert_eq!(url_fragment("http://example.com/"), Some(""));
        assert_eq!(url_fragment("http://example.com/?q=1"), Some(""));
    }

    #[test]
    fn test_non_ascii_host() {
        assert_eq!(url_fragment("http://bücher.de/neue-bücher?x"), Some("neue-bücher"));
    }
}
