// src/web/handlers/preview_handlers.rs
//! Step three: live preview

use rocket::response::content::RawHtml;
use rocket::State;
use tracing::debug;

use crate::core::SessionStore;
use crate::picture_path::safe_profile_picture_path;
use crate::render;
use crate::types::TemplateSelector;
use crate::web::pages;
use crate::web::session_guard::SessionId;
use crate::web::types::FlowFailure;

pub async fn preview_handler(
    template: Option<String>,
    session: SessionId,
    sessions: &State<SessionStore>,
) -> Result<RawHtml<String>, FlowFailure> {
    let mut state = sessions.load(session.as_str());
    let record = state.require_record()?;

    let selector = match template.as_deref().and_then(TemplateSelector::parse) {
        Some(selector) => {
            state.set_template(selector)?;
            sessions.save(session.as_str(), state);
            selector
        }
        None => state.template().unwrap_or_default(),
    };
    debug!("Previewing with template {}", selector.name());

    let picture = safe_profile_picture_path(record.profile_picture.as_deref());
    let markup = render::render(&record, selector, picture);

    Ok(RawHtml(pages::preview_page(&markup, selector)))
}
