use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`. All require auth.
///
/// ```text
/// GET  /settings  -> get_settings
/// PUT  /settings  -> update_settings
/// PUT  /profile   -> update_profile
/// POST /avatar    -> upload_avatar (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(user::get_settings).put(user::update_settings),
        )
        .route("/profile", put(user::update_profile))
        .route("/avatar", post(user::upload_avatar))
}
