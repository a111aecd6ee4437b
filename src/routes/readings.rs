//! Reading ingestion and query endpoints.
//!
//! Owns the full contract for the `leituras` table: ingest via
//! `POST /temperatura`, newest reading via `GET /ultima`, and a bounded
//! newest-first history via `GET /historico`. Each handler issues exactly
//! one statement against the pool; all input validation happens before
//! the store is touched.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::{ApiError, Result};
use crate::{NewReading, Reading};

// ---

/// `limite` bounds for `/historico`.
const LIMITE_DEFAULT: i64 = 100;
const LIMITE_MIN: i64 = 1;
const LIMITE_MAX: i64 = 1000;

pub fn router() -> Router<PgPool> {
    // ---
    Router::new()
        .route("/temperatura", post(ingest))
        .route("/ultima", get(latest))
        .route("/historico", get(history))
}

/// Acknowledgement body for a stored reading. No identifier or payload
/// is echoed back.
#[derive(Serialize)]
struct IngestAck {
    status: &'static str,
}

/// Handle `POST /temperatura`.
///
/// Assigns `criado_em` server-side and appends one row. An empty
/// `device_id` is accepted here; only the query endpoints require the
/// identifier to be present.
async fn ingest(State(pool): State<PgPool>, Json(body): Json<NewReading>) -> Result<Json<IngestAck>> {
    // ---
    debug!("POST /temperatura - device_id={:?}", body.device_id);

    if !body.temperatura_is_valid() {
        return Err(ApiError::InvalidArgument(
            "temperatura deve ser um número finito".to_string(),
        ));
    }

    let criado_em = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO leituras (device_id, temperatura, criado_em)
        VALUES ($1, $2::NUMERIC(6,2), $3)
        "#,
    )
    .bind(&body.device_id)
    .bind(body.temperatura)
    .bind(criado_em)
    .execute(&pool)
    .await?;

    info!("Stored reading for device_id={:?}", body.device_id);
    Ok(Json(IngestAck { status: "ok" }))
}

#[derive(Debug, Deserialize)]
struct LatestQuery {
    device_id: String,
}

/// Handle `GET /ultima?device_id=`.
///
/// Returns the single row with the maximum `criado_em` for the device.
/// Rows with identical timestamps have no secondary sort; the storage
/// engine picks one.
async fn latest(
    State(pool): State<PgPool>,
    Query(params): Query<LatestQuery>,
) -> Result<Json<Reading>> {
    // ---
    debug!("GET /ultima - device_id={:?}", params.device_id);

    let row: Option<Reading> = sqlx::query_as(
        r#"
        SELECT device_id, temperatura::DOUBLE PRECISION AS temperatura, criado_em
        FROM leituras
        WHERE device_id = $1
        ORDER BY criado_em DESC
        LIMIT 1
        "#,
    )
    .bind(&params.device_id)
    .fetch_optional(&pool)
    .await?;

    row.map(Json).ok_or_else(|| {
        ApiError::NotFound("Sem dados para esse device_id".to_string())
    })
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    device_id: String,
    limite: Option<i64>,
}

/// Handle `GET /historico?device_id=&limite=`.
///
/// Returns up to `limite` rows newest-first. A device with no readings
/// yields an empty array, not an error.
async fn history(
    State(pool): State<PgPool>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<Reading>>> {
    // ---
    debug!(
        "GET /historico - device_id={:?} limite={:?}",
        params.device_id, params.limite
    );

    let limite = validate_limite(params.limite.unwrap_or(LIMITE_DEFAULT))?;

    let rows: Vec<Reading> = sqlx::query_as(
        r#"
        SELECT device_id, temperatura::DOUBLE PRECISION AS temperatura, criado_em
        FROM leituras
        WHERE device_id = $1
        ORDER BY criado_em DESC
        LIMIT $2
        "#,
    )
    .bind(&params.device_id)
    .bind(limite)
    .fetch_all(&pool)
    .await?;

    info!(
        "GET /historico - returning {} readings for device_id={:?}",
        rows.len(),
        params.device_id
    );
    Ok(Json(rows))
}

/// Check `limite` against its declared bounds before any store access.
fn validate_limite(limite: i64) -> Result<i64> {
    // ---
    if (LIMITE_MIN..=LIMITE_MAX).contains(&limite) {
        Ok(limite)
    } else {
        Err(ApiError::InvalidArgument(format!(
            "limite deve estar entre {} e {}, recebido {}",
            LIMITE_MIN, LIMITE_MAX, limite
        )))
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_limite_bounds() {
        // ---
        assert!(validate_limite(0).is_err());
        assert!(validate_limite(1001).is_err());
        assert!(validate_limite(-5).is_err());

        assert_eq!(validate_limite(1).unwrap(), 1);
        assert_eq!(validate_limite(1000).unwrap(), 1000);
        assert_eq!(validate_limite(LIMITE_DEFAULT).unwrap(), 100);
    }

    #[test]
    fn test_out_of_range_limite_is_a_client_error() {
        // ---
        let err = validate_limite(1001).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        assert!(err.to_string().contains("1001"));
    }

    #[test]
    fn test_ingest_ack_shape() {
        // ---
        let json = serde_json::to_value(IngestAck { status: "ok" }).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "ok" }));
    }
}
