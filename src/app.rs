use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/items", post(handlers::add_item))
        .route("/items/:id/edit", post(handlers::begin_edit))
        .route("/items/:id/delete", post(handlers::delete_item))
        .route("/edit/confirm", post(handlers::confirm_edit))
        .route("/edit/cancel", post(handlers::cancel))
        .route("/clear", post(handlers::request_clear))
        .route("/clear/confirm", post(handlers::confirm_clear))
        .route("/clear/cancel", post(handlers::cancel))
        .route(
            "/api/items",
            get(handlers::list_items)
                .post(handlers::create_item)
                .delete(handlers::clear_items),
        )
        .route(
            "/api/items/:id",
            put(handlers::update_item).delete(handlers::remove_item),
        )
        .route("/api/notifications", get(handlers::pending_notifications))
        .route(
            "/api/notifications/permission",
            post(handlers::report_permission),
        )
        .with_state(state)
}
