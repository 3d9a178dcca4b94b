pub mod media_store;

pub use media_store::MediaStore;

/// Extensions accepted for plain image uploads.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
/// Logos additionally allow vector files.
pub const LOGO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "svg"];
/// Résumé/cover-letter documents.
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
/// Résumés above this size are rejected before anything is written.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Lower-cased extension of a file name, without the dot.
pub fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

pub fn has_allowed_extension(file_name: &str, allowed: &[&str]) -> bool {
    match extension_of(file_name) {
        Some(ext) => allowed.contains(&ext.as_str()),
        None => false,
    }
}

/// File stem used when an upload arrives without an explicit name.
pub fn name_from_file(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("Logo.PNG").as_deref(), Some("png"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert!(extension_of("README").is_none());
    }

    #[test]
    fn resume_extensions_accept_documents_only() {
        assert!(has_allowed_extension("cv.pdf", RESUME_EXTENSIONS));
        assert!(has_allowed_extension("cv.docx", RESUME_EXTENSIONS));
        assert!(!has_allowed_extension("cv.exe", RESUME_EXTENSIONS));
        assert!(!has_allowed_extension("cv", RESUME_EXTENSIONS));
    }

    #[test]
    fn name_from_file_strips_extension() {
        assert_eq!(name_from_file("team-photo.jpg"), "team-photo");
        assert_eq!(name_from_file("noext"), "noext");
    }
}
