//! API-level constants

/// Prefix shared by every item route.
pub const API_PREFIX: &str = "/api";

/// Multipart field carrying the uploaded bytes.
pub const FILE_FIELD: &str = "file";

/// Optional multipart field overriding the display name.
pub const NAME_FIELD: &str = "name";
