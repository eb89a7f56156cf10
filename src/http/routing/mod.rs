pub use super::routes::todos;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(router)
        .layer(TraceLayer::new_for_http())
}
