// src/web/session_guard.rs
use rocket::http::{Cookie, SameSite};
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "resume_session";

/// Id of the caller's session, read from the private session cookie. A fresh
/// id is issued when the cookie is absent or does not decrypt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionId {
    type Error = std::convert::Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let session_id = request.local_cache(|| {
            let jar = request.cookies();
            let existing = jar
                .get_private(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .filter(|value| Uuid::parse_str(value).is_ok());

            SessionId(match existing {
                Some(id) => id,
                None => {
                    let id = Uuid::new_v4().to_string();
                    debug!("Issuing new session {}", id);
                    jar.add_private(
                        Cookie::build((SESSION_COOKIE, id.clone()))
                            .http_only(true)
                            .same_site(SameSite::Lax),
                    );
                    id
                }
            })
        });

        Outcome::Success(session_id.clone())
    }
}
