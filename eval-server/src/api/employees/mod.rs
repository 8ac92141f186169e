//! Employee API Module
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/employees | GET | 登录用户 (经理限本部门) |
//! | /api/employees | POST | admin |
//! | /api/employees/{id} | GET | admin, 本人, 同部门经理 |
//! | /api/employees/{id} | PUT | admin, 本人 |
//! | /api/employees/department/{department} | GET | admin, 该部门经理 |
//! | /api/employees/department/{department}/stats | GET | admin, 该部门经理 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/department/{department}", get(handler::by_department))
        .route(
            "/department/{department}/stats",
            get(handler::department_stats),
        )
        .route("/{id}", get(handler::get_by_id).put(handler::update))
}
