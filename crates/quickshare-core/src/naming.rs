//! Display-name derivation for items created without an explicit name.

use crate::constants::{
    MAX_DERIVED_NAME_CHARS, MAX_DERIVED_NAME_WORDS, TRUNCATION_MARKER, UNTITLED_NAME,
};

/// Derive a display name from the leading words of a text snippet.
///
/// Words are taken in order and joined with single spaces until adding the next word
/// would push the name past [`MAX_DERIVED_NAME_CHARS`] code points or past
/// [`MAX_DERIVED_NAME_WORDS`] words. A first word that is longer than the character limit
/// on its own is cut at the limit. When the name is shorter than the trimmed content,
/// [`TRUNCATION_MARKER`] is appended. Blank content yields [`UNTITLED_NAME`].
pub fn derive_display_name(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return UNTITLED_NAME.to_string();
    }

    let mut name = String::new();
    let mut name_chars = 0usize;
    let mut word_count = 0usize;

    for word in trimmed.split_whitespace() {
        if word_count == MAX_DERIVED_NAME_WORDS {
            break;
        }

        let separator = usize::from(word_count > 0);
        let word_chars = word.chars().count();

        if name_chars + separator + word_chars > MAX_DERIVED_NAME_CHARS {
            if word_count == 0 {
                name = word.chars().take(MAX_DERIVED_NAME_CHARS).collect();
                name_chars = MAX_DERIVED_NAME_CHARS;
            }
            break;
        }

        if separator == 1 {
            name.push(' ');
        }
        name.push_str(word);
        name_chars += separator + word_chars;
        word_count += 1;
    }

    if name_chars < trimmed.chars().count() {
        name.push_str(TRUNCATION_MARKER);
    }

    name
}

/// Display name for an uploaded file: the last path component of the client-supplied
/// filename, accepting both `/` and `\` as separators.
pub fn file_display_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        UNTITLED_NAME.to_string()
    } else {
        base.to_string()
    }
}
