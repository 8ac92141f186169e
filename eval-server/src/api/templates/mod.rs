//! Template API Module
//!
//! 读取对所有登录用户开放，写操作仅 admin。删除为软删除。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Template router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/templates", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
