// ── API-to-domain type conversions ──
//
// Bridges raw `nexecur_api` wire types into `nexecur_core::model` types.

use chrono::{DateTime, Utc};

use nexecur_api::Evenement;

use crate::model::Event;

/// Convert an optional epoch-seconds timestamp to `DateTime<Utc>`.
fn epoch_to_datetime(epoch: Option<i64>) -> Option<DateTime<Utc>> {
    epoch.and_then(|ts| DateTime::from_timestamp(ts, 0))
}

impl From<Evenement> for Event {
    fn from(raw: Evenement) -> Self {
        Self {
            id: raw.id_evenement,
            option_id: raw.option_id,
            device: raw.device,
            message: raw.message,
            picture: raw.picture,
            timestamp: epoch_to_datetime(raw.date),
            status: raw.status,
            badge: raw.badge,
            extra: raw.extra,
        }
    }
}
