use actix_web::{
    cookie::Cookie,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, SET_COOKIE},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use tracing::Instrument;
use uuid::Uuid;

/// Middleware that ties each request to a session id.
///
/// Extracts the id from the session cookie, minting a fresh UUID when the
/// cookie is absent, and exposes it to handlers through request extensions
/// (see [`SessionId`]). Freshly minted ids are sent back as an HttpOnly
/// cookie on the response. Each request also runs inside a tracing span
/// carrying the session id.
pub struct SessionMiddleware {
    cookie_name: Rc<str>,
}

impl SessionMiddleware {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: Rc::from(cookie_name.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            cookie_name: Rc::clone(&self.cookie_name),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let existing = req
            .cookie(&self.cookie_name)
            .map(|cookie| cookie.value().to_string());
        let minted = existing.is_none();
        let session_id = existing.unwrap_or_else(|| Uuid::new_v4().to_string());

        req.extensions_mut().insert(SessionId(session_id.clone()));

        let method = req.method().to_string();
        let path = req.path().to_string();
        let cookie_name = Rc::clone(&self.cookie_name);
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let span = tracing::info_span!(
                "http_request",
                session_id = %session_id,
                method = %method,
                path = %path
            );

            async move {
                tracing::debug!("Request received - method={}, path={}", method, path);

                let mut res = service.call(req).await?;

                if minted {
                    let cookie = Cookie::build(cookie_name.as_ref(), session_id.as_str())
                        .path("/")
                        .http_only(true)
                        .finish();
                    if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
                        res.response_mut().headers_mut().append(SET_COOKIE, value);
                    }
                }

                tracing::debug!("Request completed - status={}", res.status());

                Ok(res)
            }
            .instrument(span)
            .await
        })
    }
}

/// Session id carried in request extensions by [`SessionMiddleware`].
///
/// Implements `FromRequest`, so handlers take it as an argument.
#[derive(Clone, Debug)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromRequest for SessionId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(req.extensions().get::<SessionId>().cloned().ok_or_else(|| {
            actix_web::error::ErrorInternalServerError("session middleware not configured")
        }))
    }
}
