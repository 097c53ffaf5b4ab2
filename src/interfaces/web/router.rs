use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, header},
    middleware,
    middleware::Next,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::AppState;
use super::handlers::{chat, mind, models, pages};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/llm", get(pages::llm))
        .route("/database", get(pages::databases))
        .route("/database/{database_name}", get(pages::database))
        .route("/mind", post(mind::create_mind_endpoint))
        .route("/send", post(chat::send_endpoint))
        .route("/send_llm", post(chat::send_llm_endpoint))
        .route("/models", post(models::models_endpoint))
        .fallback(pages::not_found)
        .layer(middleware::from_fn(security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn security_headers(req: Request<Body>, next: Next) -> axum::response::Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    response
}
