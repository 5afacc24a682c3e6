// src/web/handlers/template_handlers.rs
//! Step two: choosing a layout

use rocket::form::Form;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::State;
use tracing::info;

use crate::core::SessionStore;
use crate::types::TemplateSelector;
use crate::web::pages;
use crate::web::session_guard::SessionId;
use crate::web::types::{FlowFailure, TemplateForm};

pub async fn template_choice_handler(
    session: SessionId,
    sessions: &State<SessionStore>,
) -> Result<RawHtml<String>, FlowFailure> {
    let state = sessions.load(session.as_str());
    state.require_record()?;

    let current = state.template().unwrap_or_default();
    Ok(RawHtml(pages::template_page(current)))
}

pub async fn select_template_handler(
    form: Form<TemplateForm>,
    session: SessionId,
    sessions: &State<SessionStore>,
) -> Result<Redirect, FlowFailure> {
    let mut state = sessions.load(session.as_str());
    state.require_record()?;

    let selector = TemplateSelector::from_query(form.template.as_deref());
    state.set_template(selector)?;
    sessions.save(session.as_str(), state);
    info!("Selected template {}", selector.name());

    Ok(Redirect::to(format!("/preview?template={}", selector.id())))
}
