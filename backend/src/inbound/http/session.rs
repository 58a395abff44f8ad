//! Session helpers to keep HTTP handlers free of framework-specific
//! logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal
//! with domain-friendly operations such as persisting or requiring the
//! authenticated organization id. This is the token-issuance boundary:
//! the authentication use-case returns the identity, and this collaborator
//! turns it into a signed cookie.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, OrgId};

pub(crate) const ORG_ID_KEY: &str = "org_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated organization's id in the session cookie.
    pub fn persist_org(&self, org_id: &OrgId) -> Result<(), Error> {
        self.0
            .insert(ORG_ID_KEY, org_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current organization id from the session, if present.
    pub fn org_id(&self) -> Result<Option<OrgId>, Error> {
        let id = self
            .0
            .get::<String>(ORG_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match OrgId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid organization id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated organization id or return `401`.
    pub fn require_org_id(&self) -> Result<OrgId, Error> {
        self.org_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_session::SessionMiddleware;
    use actix_session::storage::CookieSessionStore;
    use actix_web::cookie::Key;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    async fn persist(session: SessionContext, org_id: web::Path<String>) -> HttpResponse {
        let id = OrgId::new(org_id.into_inner()).expect("test ids are valid");
        session.persist_org(&id).expect("session insert succeeds");
        HttpResponse::Ok().finish()
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_org_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    #[actix_web::test]
    async fn round_trips_the_org_id_through_the_cookie() {
        let app = test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .route("/persist/{org_id}", web::get().to(persist))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let org_id = OrgId::random();
        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/persist/{org_id}"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .response()
            .cookies()
            .next()
            .expect("session cookie is set")
            .into_owned();

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = test::read_body(response).await;
        assert_eq!(body, org_id.to_string().as_bytes());
    }

    #[actix_web::test]
    async fn missing_session_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request())
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
