//! ASCII word tokenizer
//!
//! Splits lowercased text on every maximal run of characters that are not
//! `a..=z`. Callers fold case first, so only digits, punctuation, whitespace
//! and non-ASCII characters separate words. Runs of separators never
//! produce empty tokens.

/// Iterate over the words of an already-lowercased string
pub fn words(lowered: &str) -> impl Iterator<Item = &str> {
    lowered
        .split(|c: char| !c.is_ascii_lowercase())
        .filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<String> {
        words(&text.to_lowercase()).map(str::to_string).collect()
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(split("the Quick quick fox"), vec!["the", "quick", "quick", "fox"]);
    }

    #[test]
    fn test_uppercase_left_in_place_is_a_separator() {
        let found: Vec<&str> = words("rust Lang").collect();
        assert_eq!(found, vec!["rust", "ang"]);
    }

    #[test]
    fn test_separator_runs_yield_no_empty_tokens() {
        assert_eq!(split("  --hello,,  world!!  "), vec!["hello", "world"]);
    }

    #[test]
    fn test_digits_split_words() {
        assert_eq!(split("web2py rocks"), vec!["web", "py", "rocks"]);
    }

    #[test]
    fn test_non_ascii_letters_are_separators() {
        // 'é' is not in a..=z and acts as a separator
        assert_eq!(split("café crème"), vec!["caf", "cr", "me"]);
    }

    #[test]
    fn test_url_path() {
        assert_eq!(split("a/b/c"), vec!["a", "b", "c"]);
        assert_eq!(
            split("blog/2021/rust-ownership-explained.html"),
            vec!["blog", "rust", "ownership", "explained", "html"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(split("").is_empty());
        assert!(split("123 !!! ...").is_empty());
    }
}
