// src/render/mod.rs
//! Template rendering. Each [`TemplateSelector`] maps to one pure function
//! producing the resume markup; preview and PDF export share that output.

pub mod classic;
pub mod document;
pub mod markup;
pub mod modern;

pub use document::{render_document, wrap_document, DocumentMetadata, RESUME_STYLESHEET};
pub use markup::escape_html;

use crate::error::RenderError;
use crate::picture_path::SafePicturePath;
use crate::types::{ResumeRecord, TemplateSelector};

pub type RenderFn = fn(&ResumeRecord, Option<SafePicturePath<'_>>) -> String;

pub fn renderer_for(selector: TemplateSelector) -> RenderFn {
    match selector {
        TemplateSelector::Classic => classic::render,
        TemplateSelector::Modern => modern::render,
    }
}

pub fn render(
    record: &ResumeRecord,
    selector: TemplateSelector,
    picture: Option<SafePicturePath<'_>>,
) -> String {
    renderer_for(selector)(record, picture)
}

/// Render from a raw template id. Ids outside the known set are a caller bug
/// and are reported, never replaced by a default layout.
pub fn render_by_id(
    record: &ResumeRecord,
    template_id: u8,
    picture: Option<SafePicturePath<'_>>,
) -> Result<String, RenderError> {
    let selector =
        TemplateSelector::from_id(template_id).ok_or(RenderError::UnknownTemplate(template_id))?;
    Ok(render(record, selector, picture))
}
