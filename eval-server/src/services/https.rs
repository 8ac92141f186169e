use std::net::SocketAddr;
use std::time::Duration;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use crate::auth::require_auth;
use crate::core::{Result, ServerState};

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Core APIs
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::employees::router())
        // Evaluation APIs
        .merge(crate::api::templates::router())
        .merge(crate::api::evaluations::router())
        .merge(crate::api::feedback::router())
        .merge(crate::api::comments::router())
        // Aggregation APIs
        .merge(crate::api::reports::router())
        .merge(crate::api::dashboard::router())
}

#[derive(Clone)]
pub struct HttpService {
    router: Router,
}

impl HttpService {
    /// 使用完整初始化的 ServerState 构建路由
    pub fn new(state: ServerState) -> Self {
        let timeout = Duration::from_millis(state.config.request_timeout_ms);

        let router = build_app()
            // JWT 认证中间件 - 在 Router 级别应用，require_auth 内部会跳过公共路由
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
            // Tower HTTP 中间件
            // 超时返回 408
            .layer(TimeoutLayer::new(timeout))
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            // HTTP 请求日志中间件
            .layer(middleware::from_fn(log_request));

        Self { router }
    }

    /// 已绑定状态的路由 (测试中配合 `oneshot` 使用)
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// 监听并服务，直到 shutdown future 完成
    pub async fn serve<F>(self, addr: SocketAddr, shutdown_signal: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("🚀 HTTP server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}
