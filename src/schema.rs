//! Database schema management for `micro-temperatura`.
//!
//! Ensures required tables and indexes exist before serving requests.
//! Applied once on startup from `main.rs` (EMBP: single gateway call).

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create the database schema if it does not exist (idempotent).
///
/// Creates the `leituras` table serving all three endpoints, plus an index
/// matching the per-device, newest-first access pattern. Safe to call on
/// every startup; no-op if objects already exist.
///
/// Errors are propagated if any SQL execution fails — the process must not
/// serve traffic without its table.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    // Append-only readings table. `criado_em` defaults to the insertion
    // instant, though the ingest path always binds it explicitly.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leituras (
            id          SERIAL PRIMARY KEY,
            device_id   VARCHAR(50)  NOT NULL,
            temperatura NUMERIC(6,2) NOT NULL,
            criado_em   TIMESTAMPTZ  NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Both /ultima and /historico filter by device_id and sort by criado_em
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_leituras_device_id_criado_em
            ON leituras (device_id, criado_em DESC);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
