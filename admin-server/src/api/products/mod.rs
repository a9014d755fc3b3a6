//! Product API 模块

pub(crate) mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::submit)
                .delete(handler::delete_all),
        )
        .route("/status", get(handler::status))
        // Image staging (must be before /{id} to avoid path conflicts)
        .route("/images", post(handler::stage_image))
        .route("/images/{index}", delete(handler::remove_image))
        .route("/{id}", delete(handler::delete_one))
}
