// src/render/document.rs
//! Standalone HTML document handed to the PDF converter

use serde::Serialize;

use super::markup::escape_html;
use crate::types::{ResumeRecord, TemplateSelector};

pub const CREATOR: &str = "Resume Builder";

/// Styles for the resume markup, shared by the preview page and the PDF
pub const RESUME_STYLESHEET: &str = r#"
.resume-template { font-family: helvetica, sans-serif; font-size: 11pt; color: #222222; }
.resume-template p { margin: 0 0 2px 0; }
.resume-name { font-size: 20pt; font-weight: bold; margin: 0 0 4px 0; }
.resume-header, .resume-header-modern { overflow: hidden; }
.resume-identity { float: left; }
.resume-photo-slot { float: right; }
.resume-photo, .resume-photo-modern { width: 110px; height: 110px; object-fit: cover; border-radius: 50%; }
.resume-header-modern { background-color: #222222; color: #ffffff; padding: 10px; }
.resume-section { margin-top: 10px; }
.resume-section-title { font-size: 13pt; font-weight: bold; margin: 10px 0 4px 0; border-bottom: 1px solid #333333; }
.resume-muted { color: #555555; font-size: 9pt; }
.resume-body-modern { width: 100%; border-collapse: collapse; margin-top: 10px; }
.resume-column-main { width: 60%; vertical-align: top; padding-right: 12px; }
.resume-column-side { width: 40%; vertical-align: top; }
.resume-skills-list li, .resume-skills-list-modern li { margin-bottom: 2px; }
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub creator: String,
}

impl DocumentMetadata {
    pub fn for_record(record: &ResumeRecord) -> Self {
        Self {
            title: format!("Resume - {}", record.name),
            author: record.name.clone(),
            creator: CREATOR.to_string(),
        }
    }
}

/// Full document for export. The picture is a preview-only element and is
/// not part of the exported document.
pub fn render_document(
    record: &ResumeRecord,
    selector: TemplateSelector,
    metadata: &DocumentMetadata,
) -> String {
    wrap_document(&super::render(record, selector, None), metadata)
}

/// Standalone HTML page around a rendered resume fragment
pub fn wrap_document(body: &str, metadata: &DocumentMetadata) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str(&format!(
        "<title>{}</title>\n",
        escape_html(&metadata.title)
    ));
    out.push_str(&format!(
        "<meta name=\"author\" content=\"{}\">\n",
        escape_html(&metadata.author)
    ));
    out.push_str(&format!(
        "<meta name=\"generator\" content=\"{}\">\n",
        escape_html(&metadata.creator)
    ));
    out.push_str("<style>");
    out.push_str(RESUME_STYLESHEET);
    out.push_str("@page { margin: 15mm; }\n");
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(body);
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::resume::sample_record;

    #[test]
    fn test_metadata_for_record() {
        let metadata = DocumentMetadata::for_record(&sample_record());
        assert_eq!(metadata.title, "Resume - Ada Lovelace");
        assert_eq!(metadata.author, "Ada Lovelace");
        assert_eq!(metadata.creator, "Resume Builder");
    }

    #[test]
    fn test_document_wraps_fragment_without_picture() {
        let mut record = sample_record();
        record.profile_picture = Some("uploads/profile_1_abc.png".to_string());
        let metadata = DocumentMetadata::for_record(&record);

        let html = render_document(&record, TemplateSelector::Modern, &metadata);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Resume - Ada Lovelace</title>"));
        assert!(html.contains("<meta name=\"author\" content=\"Ada Lovelace\">"));
        assert!(html.contains(&crate::render::render(&record, TemplateSelector::Modern, None)));
        assert!(!html.contains("<img"));
    }
}
