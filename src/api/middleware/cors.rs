//! Cross-origin policy.
//!
//! The API is read-mostly and unauthenticated, so any origin may call it.

use tower_http::cors::{Any, CorsLayer};

pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
