//! Report API Module
//!
//! 报表全部在服务端计算，只统计已完成的评估。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/employee/{id}", get(handler::employee))
        .route("/department/{department}", get(handler::department))
}
