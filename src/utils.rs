/// Prefix of `text` holding at most `n` characters
pub fn first_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Suffix of `text` holding at most `n` characters
pub fn last_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

/// Count whitespace-delimited tokens longer than two characters
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_chars() {
        assert_eq!(first_chars("abcdef", 3), "abc");
        assert_eq!(first_chars("ab", 10), "ab");
        assert_eq!(first_chars("héllo", 2), "hé");
        assert_eq!(first_chars("abc", 0), "");
    }

    #[test]
    fn test_last_chars() {
        assert_eq!(last_chars("abcdef", 3), "def");
        assert_eq!(last_chars("ab", 10), "ab");
        assert_eq!(last_chars("12px", 3), "2px");
        assert_eq!(last_chars("naïve", 2), "ve");
        assert_eq!(last_chars("abc", 0), "");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("the cat sat on a mat"), 4);
        assert_eq!(count_words("  \n\t "), 0);
        assert_eq!(count_words("ça été très"), 2);
    }
}
