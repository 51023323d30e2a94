pub mod list_controller;
pub mod todo_controller;

use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{HttpRequest, HttpResponse};
use log::info;
use session_store::SessionContext;
use todo_core::StoreError;

use crate::error::AppError;

/// 303 redirect after a POST.
pub(crate) fn redirect_to(path: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, path))
        .finish()
}

pub(crate) fn html_page(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Async clients flag themselves with the XMLHttpRequest header and get bare
/// status codes instead of redirects on delete endpoints.
pub(crate) fn is_async_request(req: &HttpRequest) -> bool {
    req.headers()
        .get("X-Requested-With")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.eq_ignore_ascii_case("XMLHttpRequest"))
        .unwrap_or(false)
}

/// Not-found outcome: flash the message and send the client back to the
/// lists index. Never a hard error.
pub(crate) async fn flash_not_found(
    mut ctx: SessionContext,
    err: &StoreError,
) -> Result<HttpResponse, AppError> {
    info!("Not found for session {}: {}", ctx.session_id(), err);
    ctx.data_mut().set_error(err.to_string());
    ctx.commit().await?;
    Ok(redirect_to("/lists"))
}
