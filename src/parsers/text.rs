use crate::utils::{first_chars, last_chars};

/// Minimum number of characters a line needs to count as content
const MIN_LINE_CHARS: usize = 6;

/// Line openings that mark leaked CSS at-rules or script statements
const CODE_PREFIXES: [&str; 7] = ["@", "function", "var ", "const ", "let ", "if (", "for ("];

/// Cleans extracted text down to readable lines
///
/// Splits on newlines, trims each line, drops empty lines and anything
/// rejected by [`is_content_line`], then joins the survivors with `\n`.
pub fn clean_lines(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| is_content_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether a trimmed line reads like prose rather than stray CSS/JS
pub fn is_content_line(line: &str) -> bool {
    if line.chars().count() < MIN_LINE_CHARS {
        return false;
    }

    if CODE_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
        return false;
    }

    // custom properties and pseudo-elements
    if line.contains("--") || line.contains("::") {
        return false;
    }

    // rule blocks open early: `.nav {`, `body{`
    if first_chars(line, 10).contains('{') {
        return false;
    }

    // declarations ending in a pixel unit
    !last_chars(line, 3).contains("px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_prose() {
        assert!(is_content_line("Hello world!"));
        assert!(is_content_line("The quick brown fox jumps over the lazy dog."));
    }

    #[test]
    fn test_length_boundary() {
        assert!(!is_content_line("Hello"));
        assert!(is_content_line("Hello!"));
        // five multi-byte characters are still only five characters
        assert!(!is_content_line("ééééé"));
        assert!(is_content_line("éééééé"));
    }

    #[test]
    fn test_rejects_code_prefixes() {
        assert!(!is_content_line("const x = 5;"));
        assert!(!is_content_line("var tracking = true;"));
        assert!(!is_content_line("let answer = 42;"));
        assert!(!is_content_line("function init() {}"));
        assert!(!is_content_line("@media screen and (max-width: 600)"));
        assert!(!is_content_line("if (window.ready) start();"));
        assert!(!is_content_line("for (i = 0; i < 3; i++)"));
    }

    #[test]
    fn test_prefix_needs_trailing_space() {
        // "constant" is not the `const ` keyword
        assert!(is_content_line("constant vigilance"));
        assert!(is_content_line("variety is the spice of life"));
    }

    #[test]
    fn test_rejects_css_artifacts() {
        assert!(!is_content_line("color: var(--brand-primary);"));
        assert!(!is_content_line("a.button::after content"));
        assert!(!is_content_line(".nav { display: none }"));
        assert!(!is_content_line("margin-left: 12px"));
        assert!(!is_content_line("width: 100px;"));
    }

    #[test]
    fn test_brace_after_tenth_char_is_kept() {
        assert!(is_content_line("Templates use {placeholders} heavily"));
    }

    #[test]
    fn test_clean_lines() {
        let raw = "  Hello world!  \n\nconst x = 5;\n  \nshort\nAnother good line\n";
        assert_eq!(clean_lines(raw), "Hello world!\nAnother good line");
    }

    #[test]
    fn test_clean_lines_can_be_empty() {
        assert_eq!(clean_lines("a\nb\n{}\n"), "");
        assert_eq!(clean_lines(""), "");
    }
}
