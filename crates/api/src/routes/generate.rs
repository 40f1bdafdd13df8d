use axum::routing::post;
use axum::Router;

use crate::handlers::generate;
use crate::state::AppState;

/// Routes mounted at `/generate`.
///
/// ```text
/// POST /text   -> generate_from_text   (JSON)
/// POST /voice  -> generate_from_voice  (multipart)
/// POST /image  -> generate_from_image  (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/text", post(generate::generate_from_text))
        .route("/voice", post(generate::generate_from_voice))
        .route("/image", post(generate::generate_from_image))
}
