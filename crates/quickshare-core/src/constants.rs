//! Shared constants

/// Label used when no display name can be derived.
pub const UNTITLED_NAME: &str = "Untitled";

/// Maximum length of a derived display name, in Unicode code points.
pub const MAX_DERIVED_NAME_CHARS: usize = 50;

/// Maximum number of words taken from content for a derived display name.
pub const MAX_DERIVED_NAME_WORDS: usize = 7;

/// Appended to a derived display name that does not cover the whole content.
pub const TRUNCATION_MARKER: &str = "...";

/// Lifetime applied to every item when `ITEM_TTL_HOURS` is not set.
pub const DEFAULT_ITEM_TTL_HOURS: i64 = 24;

/// Upper bound for `ITEM_TTL_HOURS` (ten years).
pub const MAX_ITEM_TTL_HOURS: i64 = 24 * 365 * 10;

/// Content type used for downloads when the uploader did not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
