use axum::Router;
use sqlx::PgPool;

mod health;
mod readings;

// ---

pub fn router(pool: PgPool) -> Router {
    // ---
    Router::new()
        .merge(readings::router())
        .merge(health::router())
        .with_state(pool)
}
