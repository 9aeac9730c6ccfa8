//! Blob file name generation.
//!
//! Format: `{id}` or `{id}.{ext}`. The extension is copied from the name hint only when it
//! is at most `MAX_EXTENSION_LEN` ASCII alphanumeric characters.

use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 16;

/// Generate the on-disk file name for the blob of item `id`.
pub fn blob_file_name(id: Uuid, name_hint: &str) -> String {
    match safe_extension(name_hint) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

fn safe_extension(name_hint: &str) -> Option<String> {
    let base = name_hint.rsplit(|c: char| c == '/' || c == '\\').next()?;
    let (stem, ext) = base.rsplit_once('.')?;

    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_keeps_simple_extension() {
        let id = Uuid::new_v4();
        assert_eq!(blob_file_name(id, "Report.PDF"), format!("{}.pdf", id));
        assert_eq!(blob_file_name(id, "archive.tar.gz"), format!("{}.gz", id));
    }

    #[test]
    fn test_name_without_usable_extension() {
        let id = Uuid::new_v4();
        assert_eq!(blob_file_name(id, "README"), id.to_string());
        assert_eq!(blob_file_name(id, ".bashrc"), id.to_string());
        assert_eq!(blob_file_name(id, "weird.ex t"), id.to_string());
        assert_eq!(blob_file_name(id, ""), id.to_string());
        assert_eq!(
            blob_file_name(id, "file.averyveryverylongextension"),
            id.to_string()
        );
    }

    #[test]
    fn test_name_ignores_path_components() {
        let id = Uuid::new_v4();
        let name = blob_file_name(id, "../../etc/passwd");
        assert_eq!(name, id.to_string());
        let name = blob_file_name(id, "..\\evil\\payload.sh");
        assert_eq!(name, format!("{}.sh", id));
        assert!(!name.contains('/') && !name.contains('\\'));
    }
}
