//! Feedback API Module
//!
//! 反馈写在评估上：`feedback` 文本 + 可选的 `overall` 评分回复。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/feedback", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::submit))
        .route("/{evaluation_id}", get(handler::get).put(handler::update))
}
