// src/web/handlers/export_handlers.rs
//! PDF download

use rocket::State;
use std::sync::Arc;
use tracing::info;

use crate::core::{DocumentConverter, SessionStore};
use crate::error::FlowError;
use crate::render::{render_document, DocumentMetadata};
use crate::types::TemplateSelector;
use crate::utils::download_filename;
use crate::web::session_guard::SessionId;
use crate::web::types::{FlowFailure, PdfResponse};

pub async fn generate_pdf_handler(
    template: Option<String>,
    session: SessionId,
    sessions: &State<SessionStore>,
    converter: &State<Arc<dyn DocumentConverter>>,
) -> Result<PdfResponse, FlowFailure> {
    let record = sessions.load(session.as_str()).require_record()?;
    let selector = TemplateSelector::from_query(template.as_deref());

    let metadata = DocumentMetadata::for_record(&record);
    let markup = render_document(&record, selector, &metadata);

    let pdf = converter
        .convert(&markup, &metadata)
        .await
        .map_err(FlowError::from)?;

    let filename = download_filename(&record.name);
    info!(
        "Generated {} ({} bytes) with template {}",
        filename,
        pdf.len(),
        selector.name()
    );

    Ok(PdfResponse::with_filename(pdf, filename))
}
