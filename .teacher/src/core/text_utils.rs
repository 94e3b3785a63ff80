//! Text manipulation utilities for working with source code.

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters.
/// This matches the behavior expected by most programming languages including SysML.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Find the boundaries of a word at the given position.
///
/// Returns `Some((start, end))` where `start` is the character index of the word start
/// and `end` is the character index after the last word character.
/// Returns `None` if there is no word at the position.
pub fn find_word_boundaries(chars: &[char], position: usize) -> Option<(usize, usize)> {
    if position >= chars.len() {
        return None;
    }

    // Check if we're on a word character
    if !is_word_character(chars[position]) {
        return None;
    }

    // Find start of word
    let mut start = position;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }

    // Find end of word
    let mut end = position;
    while end < chars.len() && is_word_character(chars[end]) {
        end += 1;
    }

    Some((start, end))
}

/// Extract the word (identifier) at the cursor position in a line of text.
///
/// Returns the word as a `String`, or `None` if there is no word at the position.
///
/// # Example
/// ```
/// use syster::core::text_utils::extract_word_at_cursor;
///
/// let line = "let foo = bar";
/// assert_eq!(extract_word_at_cursor(line, 4), Some("foo".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 10), Some("bar".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 8), None); // space
/// ```
pub fn extract_word_at_cursor(line: &str, position: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();

    if position >= chars.len() {
        return None;
    }

    let (start, end) = find_word_boundaries(&chars, position)?;

    Some(chars[start..end].iter().collect())
}

/// Check if a character is part of a qualified name (identifier or `:`).
#[inline]
fn is_qualified_name_character(c: char) -> bool {
    is_word_character(c) || c == ':'
}

/// Extract the qualified name at the cursor position in a line of text.
///
/// This extracts names that may contain `::` separators, like `Package::Type`.
/// Returns `None` if there is no qualified name at the position.
///
/// # Example
/// ```
/// use syster::core::text_utils::extract_qualified_name_at_cursor;
///
/// let line = "import ISQ::MassValue;";
/// assert_eq!(extract_qualified_name_at_cursor(line, 7), Some("ISQ::MassValue".to_string()));
/// assert_eq!(extract_qualified_name_at_cursor(line, 12), Some("ISQ::MassValue".to_string()));
/// ```
pub fn extract_qualified_name_at_cursor(line: &str, position: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();

    if position >= chars.len() || !is_qualified_name_character(chars[position]) {
        return None;
    }

    // Find start of qualified name
    let mut start = position;
    while start > 0 && is_qualified_name_character(chars[start - 1]) {
        start -= 1;
    }

    // Find end of qualified name
    let mut end = position;
    while end < chars.len() && is_qualified_name_character(chars[end]) {
        end += 1;
    }

    let result: String = chars[start..end].iter().collect();

    // Clean up and validate: must contain "::" (namespace separator)
    // Single ":" is a type annotation (e.g., "attr:String"), not a qualified name
    let trimmed = result.trim_matches(':');
    trimmed.contains("::").then(|| trimmed.to_string())
}
