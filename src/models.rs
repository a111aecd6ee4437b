//! Data models for temperature readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

/// Incoming reading posted by a device.
///
/// `criado_em` is deliberately absent: the timestamp is assigned server-side
/// at insert time and a client-provided value is never trusted.
#[derive(Debug, Deserialize)]
pub struct NewReading {
    // ---
    pub device_id: String,
    pub temperatura: f64,
}

/// Stored reading as served by `/ultima` and `/historico`.
///
/// The surrogate `id` column exists in the table but is storage identity
/// only and is never exposed here.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Reading {
    // ---
    pub device_id: String,
    pub temperatura: f64,
    pub criado_em: DateTime<Utc>,
}

impl NewReading {
    /// Whether the posted temperature is a representable decimal value.
    ///
    /// NaN and infinities cannot be stored in a NUMERIC column; anything
    /// finite is accepted since the schema enforces no physical range.
    pub fn temperatura_is_valid(&self) -> bool {
        // ---
        self.temperatura.is_finite()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    fn reading(temperatura: f64) -> NewReading {
        // ---
        NewReading {
            device_id: "sensor-1".to_string(),
            temperatura,
        }
    }

    #[test]
    fn test_finite_temperature_is_valid() {
        // ---
        assert!(reading(23.5).temperatura_is_valid());
        assert!(reading(-40.0).temperatura_is_valid());
        assert!(reading(0.0).temperatura_is_valid());
    }

    #[test]
    fn test_non_finite_temperature_is_rejected() {
        // ---
        assert!(!reading(f64::NAN).temperatura_is_valid());
        assert!(!reading(f64::INFINITY).temperatura_is_valid());
        assert!(!reading(f64::NEG_INFINITY).temperatura_is_valid());
    }

    #[test]
    fn test_empty_device_id_is_accepted_on_ingest() {
        // ---
        // The ingest path takes any string, including empty. Only the query
        // endpoints require the parameter to be present.
        let r = reading(20.0);
        assert!(r.temperatura_is_valid());
        let empty = NewReading {
            device_id: String::new(),
            temperatura: 20.0,
        };
        assert!(empty.temperatura_is_valid());
    }

    #[test]
    fn test_reading_serializes_wire_fields_only() {
        // ---
        let r = Reading {
            device_id: "sensor-1".to_string(),
            temperatura: 24.1,
            criado_em: Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 0).unwrap(),
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["device_id"], "sensor-1");
        assert_eq!(json["temperatura"], 24.1);
        assert!(json.get("id").is_none());
    }
}
