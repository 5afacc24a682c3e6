// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use crate::core::SessionStore;
use crate::types::TemplateSelector;
use crate::web::types::{DataResponse, TemplateInfo, TextResponse};

pub async fn get_templates_handler() -> Json<DataResponse<Vec<TemplateInfo>>> {
    let templates: Vec<TemplateInfo> = TemplateSelector::ALL
        .into_iter()
        .map(TemplateInfo::from)
        .collect();

    Json(DataResponse::success(
        format!("{} templates available", templates.len()),
        templates,
    ))
}

pub async fn health_handler(sessions: &State<SessionStore>) -> Json<TextResponse> {
    info!("Health check ({} live sessions)", sessions.len());
    Json(TextResponse::success("OK".to_string()))
}
