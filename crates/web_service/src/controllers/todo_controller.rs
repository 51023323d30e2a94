//! Todo controller: adding, completing and deleting items within a list.

use actix_web::{
    web,
    web::{Data, Form, Path},
    HttpRequest, HttpResponse,
};
use log::info;
use serde::Deserialize;
use session_store::SessionContext;
use todo_core::StoreError;

use crate::controllers::{flash_not_found, html_page, is_async_request, redirect_to};
use crate::error::Result;
use crate::middleware::SessionId;
use crate::server::AppState;
use crate::views::{Flash, ListPage};

/// Form body for adding an item.
#[derive(Debug, Deserialize)]
pub struct TodoForm {
    pub todo: String,
}

/// Form body for toggling an item. Anything other than "true" means
/// incomplete.
#[derive(Debug, Deserialize)]
pub struct CompletedForm {
    #[serde(default)]
    pub completed: Option<String>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/lists/{list_id}/todos", web::post().to(add_todo))
        .route(
            "/lists/{list_id}/todos/{todo_id}/delete",
            web::post().to(delete_todo),
        )
        .route(
            "/lists/{list_id}/todos/{todo_id}",
            web::post().to(set_completed),
        );
}

/// POST /lists/{list_id}/todos - add an item, or re-render the list page on
/// invalid input
async fn add_todo(
    state: Data<AppState>,
    session: SessionId,
    path: Path<usize>,
    form: Form<TodoForm>,
) -> Result<HttpResponse> {
    let mut ctx = SessionContext::load(state.storage(), session.into_inner()).await?;
    let list_index = path.into_inner();
    let name = form.todo.trim().to_string();

    match ctx.data_mut().lists.add_todo(list_index, &name) {
        Ok(id) => {
            info!(
                "Added todo {} to list {} for session {}",
                id,
                list_index,
                ctx.session_id()
            );
            ctx.data_mut().set_success("The todo was successfully added.");
            ctx.commit().await?;
            Ok(redirect_to(&format!("/lists/{list_index}")))
        }
        Err(err) if err.is_validation() => {
            if ctx.data().lists.get(list_index).is_err() {
                return flash_not_found(ctx, &StoreError::ListNotFound).await;
            }
            let list = ctx
                .data()
                .lists
                .get(list_index)
                .map_err(anyhow::Error::from)?;
            let page = ListPage::from_list(
                list_index,
                list,
                Flash {
                    error: Some(err.to_string()),
                    success: None,
                },
                name,
            );
            let body = state.views().render("list.html", page)?;
            Ok(html_page(body))
        }
        Err(err) => flash_not_found(ctx, &err).await,
    }
}

/// POST /lists/{list_id}/todos/{todo_id}/delete - delete an item; async
/// clients get a bare 204
async fn delete_todo(
    state: Data<AppState>,
    session: SessionId,
    path: Path<(usize, u64)>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let mut ctx = SessionContext::load(state.storage(), session.into_inner()).await?;
    let (list_index, todo_id) = path.into_inner();

    match ctx.data_mut().lists.delete_todo(list_index, todo_id) {
        Ok(removed) => {
            info!(
                "Deleted todo '{}' from list {} for session {}",
                removed.name,
                list_index,
                ctx.session_id()
            );
            if is_async_request(&req) {
                ctx.commit().await?;
                Ok(HttpResponse::NoContent().finish())
            } else {
                ctx.data_mut().set_success("The todo has been deleted.");
                ctx.commit().await?;
                Ok(redirect_to(&format!("/lists/{list_index}")))
            }
        }
        Err(err) => {
            if is_async_request(&req) {
                Ok(HttpResponse::NotFound().finish())
            } else {
                flash_not_found(ctx, &err).await
            }
        }
    }
}

/// POST /lists/{list_id}/todos/{todo_id} - set an item's completed flag
async fn set_completed(
    state: Data<AppState>,
    session: SessionId,
    path: Path<(usize, u64)>,
    form: Form<CompletedForm>,
) -> Result<HttpResponse> {
    let mut ctx = SessionContext::load(state.storage(), session.into_inner()).await?;
    let (list_index, todo_id) = path.into_inner();
    let completed = form.completed.as_deref() == Some("true");

    match ctx
        .data_mut()
        .lists
        .set_todo_completed(list_index, todo_id, completed)
    {
        Ok(()) => {
            ctx.data_mut().set_success("The todo has been updated.");
            ctx.commit().await?;
            Ok(redirect_to(&format!("/lists/{list_index}")))
        }
        Err(err) => flash_not_found(ctx, &err).await,
    }
}
