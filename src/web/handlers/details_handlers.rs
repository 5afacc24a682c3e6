// src/web/handlers/details_handlers.rs
//! Step one: the details form

use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::State;
use std::collections::HashMap;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::core::{LocalImageStore, SessionStore};
use crate::image_validator::ImageValidator;
use crate::normalizer::{FieldErrors, FormField, Normalizer, PictureUpload, RawSubmission};
use crate::web::pages;
use crate::web::session_guard::SessionId;
use crate::web::types::{DetailsForm, FlowFailure, ServerConfig, SubmitResponse};

pub async fn details_form_handler(
    session: SessionId,
    sessions: &State<SessionStore>,
    config: &State<ServerConfig>,
) -> RawHtml<String> {
    let state = sessions.load(session.as_str());
    let record = state.record();

    let values = record
        .as_ref()
        .map(|r| RawSubmission::from_record(r).fields)
        .unwrap_or_default();
    let picture = record.as_ref().and_then(|r| r.profile_picture.as_deref());

    RawHtml(pages::details_page(
        &values,
        &FieldErrors::default(),
        picture,
        config.max_picture_bytes,
    ))
}

pub async fn submit_details_handler(
    form: Form<DetailsForm<'_>>,
    session: SessionId,
    sessions: &State<SessionStore>,
    store: &State<LocalImageStore>,
    config: &State<ServerConfig>,
) -> Result<SubmitResponse, FlowFailure> {
    let picture = read_picture(form.profile_picture.as_ref()).await;
    let raw = RawSubmission::new(form.text_fields()).with_picture(picture);

    let mut state = sessions.load(session.as_str());
    let previous_picture = state.record().and_then(|record| record.profile_picture);

    let normalizer = Normalizer::new(
        ImageValidator::new(config.max_picture_bytes),
        store.inner(),
    );

    match normalizer.normalize(&raw, previous_picture.as_deref()) {
        Ok(record) => {
            state.set_record(&record)?;
            sessions.save(session.as_str(), state);
            info!("Stored resume details for {}", record.name);
            Ok(SubmitResponse::Accepted(Redirect::to("/template")))
        }
        Err(errors) => {
            let values: HashMap<String, String> = FormField::TEXT_FIELDS
                .iter()
                .map(|field| (field.key().to_string(), raw.value(*field)))
                .collect();
            Ok(SubmitResponse::Rejected(RawHtml(pages::details_page(
                &values,
                &errors,
                previous_picture.as_deref(),
                config.max_picture_bytes,
            ))))
        }
    }
}

/// Pull the uploaded picture into memory
async fn read_picture(file: Option<&TempFile<'_>>) -> PictureUpload {
    let Some(file) = file else {
        return PictureUpload::Missing;
    };

    let file_name = file
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string());

    let reader = match file.open().await {
        Ok(reader) => reader,
        Err(e) => {
            warn!("Failed to open uploaded picture: {}", e);
            return PictureUpload::TransferFailed;
        }
    };
    tokio::pin!(reader);

    let mut bytes = Vec::new();
    match reader.read_to_end(&mut bytes).await {
        Ok(_) => PictureUpload::Received { file_name, bytes },
        Err(e) => {
            warn!("Failed to read uploaded picture: {}", e);
            PictureUpload::TransferFailed
        }
    }
}
