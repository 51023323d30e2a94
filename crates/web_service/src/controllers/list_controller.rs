//! List controller: viewing, creating, renaming and deleting to-do lists.

use actix_web::http::header::LOCATION;
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
use crate::views::{EditListPage, Flash, ListPage, ListSummary, ListsPage, NewListPage};

/// Form body for create and rename.
#[derive(Debug, Deserialize)]
pub struct ListNameForm {
    pub list_name: String,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/lists", web::get().to(index))
        .route("/lists", web::post().to(create))
        .route("/lists/new", web::get().to(new_form))
        .route("/lists/{id}", web::get().to(show))
        .route("/lists/{id}", web::post().to(rename))
        .route("/lists/{id}/edit", web::get().to(edit_form))
        .route("/lists/{id}/delete", web::post().to(delete))
        .route("/lists/{id}/complete_all", web::post().to(complete_all));
}

async fn load_session(
    state: &AppState,
    session: SessionId,
) -> Result<SessionContext> {
    Ok(SessionContext::load(state.storage(), session.into_inner()).await?)
}

/// GET / - entry point, lists live at /lists
async fn home() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, "/lists"))
        .finish()
}

/// GET /lists - render all lists with their completion counts
async fn index(
    state: Data<AppState>,
    session: SessionId,
) -> Result<HttpResponse> {
    let mut ctx = load_session(&state, session).await?;

    let flash = Flash::consume(ctx.data_mut());
    ctx.commit().await?;

    let lists = ctx
        .data()
        .lists
        .lists()
        .iter()
        .enumerate()
        .map(|(index, list)| ListSummary::from_list(index, list))
        .collect();

    let body = state.views().render("lists.html", ListsPage { flash, lists })?;
    Ok(html_page(body))
}

/// GET /lists/new - render the creation form
async fn new_form(
    state: Data<AppState>,
    session: SessionId,
) -> Result<HttpResponse> {
    let mut ctx = load_session(&state, session).await?;

    let flash = Flash::consume(ctx.data_mut());
    ctx.commit().await?;

    let body = state.views().render(
        "new_list.html",
        NewListPage {
            flash,
            list_name: String::new(),
        },
    )?;
    Ok(html_page(body))
}

/// POST /lists - create a list, or re-render the form on invalid input
async fn create(
    state: Data<AppState>,
    session: SessionId,
    form: Form<ListNameForm>,
) -> Result<HttpResponse> {
    let mut ctx = load_session(&state, session).await?;
    let name = form.list_name.trim().to_string();

    match ctx.data_mut().lists.create_list(&name) {
        Ok(()) => {
            info!("Created list '{}' for session {}", name, ctx.session_id());
            ctx.data_mut().set_success("The list has been created.");
            ctx.commit().await?;
            Ok(redirect_to("/lists"))
        }
        Err(err) => {
            // Validation failure: collection untouched, form re-rendered
            // with the message and the submitted value preserved.
            let body = state.views().render(
                "new_list.html",
                NewListPage {
                    flash: Flash {
                        error: Some(err.to_string()),
                        success: None,
                    },
                    list_name: name,
                },
            )?;
            Ok(html_page(body))
        }
    }
}

/// GET /lists/{id} - render one list, items sorted incomplete-first
async fn show(
    state: Data<AppState>,
    session: SessionId,
    path: Path<usize>,
) -> Result<HttpResponse> {
    let mut ctx = load_session(&state, session).await?;
    let index = path.into_inner();

    if ctx.data().lists.get(index).is_err() {
        return flash_not_found(ctx, &StoreError::ListNotFound).await;
    }

    let flash = Flash::consume(ctx.data_mut());
    ctx.commit().await?;

    let list = ctx.data().lists.get(index).map_err(anyhow::Error::from)?;
    let body = state
        .views()
        .render("list.html", ListPage::from_list(index, list, flash, String::new()))?;
    Ok(html_page(body))
}

/// GET /lists/{id}/edit - render the rename form
async fn edit_form(
    state: Data<AppState>,
    session: SessionId,
    path: Path<usize>,
) -> Result<HttpResponse> {
    let mut ctx = load_session(&state, session).await?;
    let index = path.into_inner();

    if ctx.data().lists.get(index).is_err() {
        return flash_not_found(ctx, &StoreError::ListNotFound).await;
    }

    let flash = Flash::consume(ctx.data_mut());
    ctx.commit().await?;

    let list = ctx.data().lists.get(index).map_err(anyhow::Error::from)?;
    let body = state.views().render(
        "edit_list.html",
        EditListPage {
            flash,
            index,
            name: list.name.clone(),
            list_name: list.name.clone(),
        },
    )?;
    Ok(html_page(body))
}

/// POST /lists/{id} - rename a list, or re-render the form on invalid input
async fn rename(
    state: Data<AppState>,
    session: SessionId,
    path: Path<usize>,
    form: Form<ListNameForm>,
) -> Result<HttpResponse> {
    let mut ctx = load_session(&state, session).await?;
    let index = path.into_inner();
    let name = form.list_name.trim().to_string();

    match ctx.data_mut().lists.rename_list(index, &name) {
        Ok(()) => {
            ctx.data_mut().set_success("The list has been updated.");
            ctx.commit().await?;
            Ok(redirect_to(&format!("/lists/{index}")))
        }
        Err(err) if err.is_validation() => {
            let current = ctx.data().lists.get(index).map_err(anyhow::Error::from)?;
            let body = state.views().render(
                "edit_list.html",
                EditListPage {
                    flash: Flash {
                        error: Some(err.to_string()),
                        success: None,
                    },
                    index,
                    name: current.name.clone(),
                    list_name: name,
                },
            )?;
            Ok(html_page(body))
        }
        Err(err) => flash_not_found(ctx, &err).await,
    }
}

/// POST /lists/{id}/delete - delete a list; async clients get a bare 204
async fn delete(
    state: Data<AppState>,
    session: SessionId,
    path: Path<usize>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let mut ctx = load_session(&state, session).await?;
    let index = path.into_inner();

    match ctx.data_mut().lists.delete_list(index) {
        Ok(removed) => {
            info!(
                "Deleted list '{}' for session {}",
                removed.name,
                ctx.session_id()
            );
            if is_async_request(&req) {
                // An async client never renders the next page, so a queued
                // flash would leak into an unrelated later render.
                ctx.commit().await?;
                Ok(HttpResponse::NoContent().finish())
            } else {
                ctx.data_mut().set_success("The list has been deleted.");
                ctx.commit().await?;
                Ok(redirect_to("/lists"))
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

/// POST /lists/{id}/complete_all - mark every item in the list complete
async fn complete_all(
    state: Data<AppState>,
    session: SessionId,
    path: Path<usize>,
) -> Result<HttpResponse> {
    let mut ctx = load_session(&state, session).await?;
    let index = path.into_inner();

    match ctx.data_mut().lists.complete_all(index) {
        Ok(()) => {
            ctx.data_mut().set_success("All todos have been completed.");
            ctx.commit().await?;
            Ok(redirect_to(&format!("/lists/{index}")))
        }
        Err(err) => flash_not_found(ctx, &err).await,
    }
}
