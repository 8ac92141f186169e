//! Evaluation API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/evaluations | GET | 按角色可见的评估 |
//! | /api/evaluations | POST | 创建评估，调用者为评估人 |
//! | /api/evaluations/{id} | GET | 评估详情 |
//! | /api/evaluations/{id} | PUT | 评估人或 admin 修改 |
//! | /api/evaluations/employee/{employee_id} | GET | 某员工的评估 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Evaluation router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/evaluations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/employee/{employee_id}", get(handler::by_employee))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
}
