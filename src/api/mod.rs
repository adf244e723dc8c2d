pub mod analyze;
pub mod health;
pub mod voice;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(analyze::router())
        .merge(voice::router())
}
