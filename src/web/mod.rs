// src/web/mod.rs

pub mod handlers;
pub mod pages;
pub mod session_guard;
pub mod types;

pub use session_guard::{SessionId, SESSION_COOKIE};
pub use types::*;

use anyhow::Result;
use rocket::data::{ByteUnit, Limits};
use rocket::form::Form;
use rocket::fs::FileServer;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{catchers, get, post, routes, Build, Request, Rocket, State};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};

use crate::core::{DocumentConverter, LocalImageStore, SessionStore};
use crate::environment::EnvironmentConfig;

/// Extra room on top of the picture itself for the text fields
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

#[get("/")]
pub async fn details_form(
    session: SessionId,
    sessions: &State<SessionStore>,
    config: &State<ServerConfig>,
) -> RawHtml<String> {
    handlers::details_form_handler(session, sessions, config).await
}

#[post("/", data = "<form>")]
pub async fn submit_details(
    form: Form<DetailsForm<'_>>,
    session: SessionId,
    sessions: &State<SessionStore>,
    store: &State<LocalImageStore>,
    config: &State<ServerConfig>,
) -> Result<SubmitResponse, FlowFailure> {
    let span = info_span!("submit_details", session = %session.as_str());
    handlers::submit_details_handler(form, session, sessions, store, config)
        .instrument(span)
        .await
}

#[get("/template")]
pub async fn template_choice(
    session: SessionId,
    sessions: &State<SessionStore>,
) -> Result<RawHtml<String>, FlowFailure> {
    handlers::template_choice_handler(session, sessions).await
}

#[post("/template", data = "<form>")]
pub async fn select_template(
    form: Form<TemplateForm>,
    session: SessionId,
    sessions: &State<SessionStore>,
) -> Result<Redirect, FlowFailure> {
    handlers::select_template_handler(form, session, sessions).await
}

#[get("/preview?<template>")]
pub async fn preview(
    template: Option<String>,
    session: SessionId,
    sessions: &State<SessionStore>,
) -> Result<RawHtml<String>, FlowFailure> {
    let span = info_span!("preview", session = %session.as_str());
    handlers::preview_handler(template, session, sessions)
        .instrument(span)
        .await
}

#[get("/generate?<template>")]
pub async fn generate_pdf(
    template: Option<String>,
    session: SessionId,
    sessions: &State<SessionStore>,
    converter: &State<Arc<dyn DocumentConverter>>,
) -> Result<PdfResponse, FlowFailure> {
    let span = info_span!(
        "generate_pdf",
        session = %session.as_str(),
        template = %template.as_deref().unwrap_or("default")
    );
    handlers::generate_pdf_handler(template, session, sessions, converter)
        .instrument(span)
        .await
}

#[get("/templates")]
pub async fn get_templates() -> Json<DataResponse<Vec<TemplateInfo>>> {
    handlers::get_templates_handler().await
}

#[get("/health")]
pub async fn health(sessions: &State<SessionStore>) -> Json<TextResponse> {
    handlers::health_handler(sessions).await
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> RawHtml<String> {
    RawHtml(pages::error_page(400, "The request could not be understood."))
}

#[rocket::catch(404)]
pub fn not_found(request: &Request<'_>) -> RawHtml<String> {
    RawHtml(pages::error_page(
        404,
        &format!("Nothing found at {}", request.uri().path()),
    ))
}

#[rocket::catch(422)]
pub fn unprocessable(request: &Request<'_>) -> RawHtml<String> {
    tracing::warn!("Unprocessable submission to {}", request.uri());
    RawHtml(pages::error_page(
        422,
        "The submitted form could not be read. Please try again.",
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> RawHtml<String> {
    RawHtml(pages::error_page(
        500,
        "Something went wrong on our side. Please try again in a few moments.",
    ))
}

#[rocket::catch(404)]
pub fn api_not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Endpoint not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Available endpoints: /api/health, /api/templates".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn api_internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Upload limits sized so an oversized picture still reaches the validator
fn upload_limits(max_picture_bytes: u64) -> Limits {
    let file_limit = max_picture_bytes.saturating_mul(4);
    Limits::default()
        .limit("file", ByteUnit::from(file_limit))
        .limit(
            "data-form",
            ByteUnit::from(file_limit.saturating_add(FORM_OVERHEAD_BYTES)),
        )
}

/// Assemble the application. The uploads directory must already exist.
pub fn build_rocket(
    config: &EnvironmentConfig,
    converter: Arc<dyn DocumentConverter>,
) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("limits", upload_limits(config.max_picture_bytes)));

    let server_config = ServerConfig {
        max_picture_bytes: config.max_picture_bytes,
    };

    rocket::custom(figment)
        .manage(server_config)
        .manage(SessionStore::new(config.session_ttl()))
        .manage(LocalImageStore::new(config.uploads_path.clone()))
        .manage(converter)
        .register("/", catchers![bad_request, not_found, unprocessable, internal_error])
        .register("/api", catchers![api_not_found, api_internal_error])
        .mount(
            "/",
            routes![
                details_form,
                submit_details,
                template_choice,
                select_template,
                preview,
                generate_pdf,
            ],
        )
        .mount("/api", routes![get_templates, health])
        .mount("/uploads", FileServer::from(&config.uploads_path))
}

// Main server start function
pub async fn start_web_server(
    config: EnvironmentConfig,
    converter: Arc<dyn DocumentConverter>,
    port: u16,
) -> Result<()> {
    config.ensure_directories().await?;

    info!("Starting Resume Builder server");
    info!("Uploads: {}", config.uploads_path.display());
    info!("Converter: {:?}", config.converter.kind);

    let rocket = build_rocket(&config, converter);
    let figment = rocket.figment().clone().merge(("port", port));

    let _rocket = rocket
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
