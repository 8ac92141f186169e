//! Comment API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/evaluations/{id}/comments | GET | 评论列表（新的在前） |
//! | /api/evaluations/{id}/comments | POST | 发表评论 / 回复 |
//! | /api/comments/{id} | PUT | 作者或 admin 修改 |
//! | /api/comments/{id} | DELETE | 作者或 admin 删除 |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/evaluations/{id}/comments",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/comments/{id}",
            put(handler::update).delete(handler::delete),
        )
}
