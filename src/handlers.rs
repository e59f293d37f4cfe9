use crate::errors::AppError;
use crate::interaction::Interaction;
use crate::models::{AddItemRequest, ItemResponse, ListQuery, RenameRequest};
use crate::mutations;
use crate::notify::{Alert, PermissionReport, PermissionResponse};
use crate::query::query;
use crate::state::AppState;
use crate::status::{now, status_of};
use crate::ui::{render_index, Page};
use crate::view::render;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let now = now();
    let items = state.store.lock().await.load()?;
    let interaction = *state.interaction.lock().await;

    let filtered = query(&items, &params.q, params.status, now);
    let list = render(&filtered, now, &interaction);

    Ok(Html(render_index(&Page {
        list: &list,
        query: &params,
        interaction,
        today: now.date(),
    })))
}

// Form posts carry the page's `q`/`status` in their action URL so the
// redirect lands back on the same filtered view.

pub async fn add_item(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
    Form(payload): Form<AddItemRequest>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    mutations::add_item(&mut store, &payload.name, payload.expiry).await?;
    Ok(Redirect::to(&params.page_url()))
}

pub async fn begin_edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<ListQuery>,
) -> Result<Redirect, AppError> {
    let store = state.store.lock().await;
    let mut interaction = state.interaction.lock().await;
    mutations::begin_edit(&store, &mut interaction, id)?;
    Ok(Redirect::to(&params.page_url()))
}

pub async fn confirm_edit(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
    Form(payload): Form<RenameRequest>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    let mut interaction = state.interaction.lock().await;
    mutations::confirm_edit(&mut store, &mut interaction, &payload.name).await?;
    Ok(Redirect::to(&params.page_url()))
}

pub async fn cancel(State(state): State<AppState>, Query(params): Query<ListQuery>) -> Redirect {
    state.interaction.lock().await.cancel();
    Redirect::to(&params.page_url())
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<ListQuery>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    let mut interaction = state.interaction.lock().await;
    mutations::delete_and_forget(&mut store, &mut interaction, id).await?;
    Ok(Redirect::to(&params.page_url()))
}

pub async fn request_clear(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Redirect {
    state.interaction.lock().await.request_clear();
    Redirect::to(&params.page_url())
}

pub async fn confirm_clear(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    let mut interaction = state.interaction.lock().await;
    mutations::confirm_clear(&mut store, &mut interaction).await?;
    Ok(Redirect::to(&params.page_url()))
}

pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let now = now();
    let items = state.store.lock().await.load()?;
    let response = query(&items, &params.q, params.status, now)
        .into_iter()
        .map(|item| {
            let status = status_of(item.expiry, now);
            ItemResponse::new(item, status)
        })
        .collect();

    Ok(Json(response))
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), AppError> {
    let mut store = state.store.lock().await;
    let item = mutations::add_item(&mut store, &payload.name, payload.expiry)
        .await?
        .ok_or_else(|| AppError::bad_request("name must not be empty"))?;

    let status = status_of(item.expiry, now());
    Ok((StatusCode::CREATED, Json(ItemResponse::new(item, status))))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RenameRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }

    let mut store = state.store.lock().await;
    let item = mutations::rename_item(&mut store, id, &payload.name)
        .await?
        .ok_or_else(|| AppError::not_found(format!("no item with id {id}")))?;

    let status = status_of(item.expiry, now());
    Ok(Json(ItemResponse::new(item, status)))
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    let mut interaction = state.interaction.lock().await;
    mutations::delete_and_forget(&mut store, &mut interaction, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_items(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    let mut interaction = state.interaction.lock().await;
    mutations::clear_items(&mut store).await?;
    *interaction = Interaction::Idle;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn report_permission(
    State(state): State<AppState>,
    Json(payload): Json<PermissionReport>,
) -> Json<PermissionResponse> {
    let mut gate = state.notifications.lock().await;
    Json(gate.record_permission(payload.permission))
}

pub async fn pending_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Alert>>, AppError> {
    let items = state.store.lock().await.load()?;
    let mut gate = state.notifications.lock().await;
    Ok(Json(gate.check_and_notify(&items, now())))
}
