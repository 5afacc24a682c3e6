// src/utils.rs
use crate::image_validator::ImageFormat;

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Extension to store an accepted picture under. Keeps the client's extension
/// only when it names the sniffed format, otherwise uses the format's own.
pub fn picture_extension(client_name: Option<&str>, format: ImageFormat) -> String {
    client_name
        .and_then(get_file_extension)
        .filter(|ext| format.accepts_extension(ext))
        .unwrap_or_else(|| format.extension().to_string())
}

/// Download name for the exported PDF, e.g. `resume_ada_lovelace.pdf`
pub fn download_filename(person_name: &str) -> String {
    let slug = person_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect::<String>();

    if slug.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("resume_{}.pdf", slug)
    }
}
