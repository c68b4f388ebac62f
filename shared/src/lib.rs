use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TableId = u32;
pub type ReservationId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub seats: u32,
    pub available: bool,
}

/// Public view of a free table, without the availability flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub id: TableId,
    pub seats: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub table_number: TableId,
    pub customer_name: String,
    pub time: DateTime<Utc>,
    pub guests: u32,
}

/// Create-or-update payload as submitted by a client.
///
/// Every field is optional on the wire so that missing values surface as a
/// validation failure with a readable reason rather than a decode error.
/// Numbers are signed for the same reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[serde(default)]
    pub id: Option<ReservationId>,
    #[serde(default)]
    pub table_number: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub guests: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub success: bool,
    pub message: String,
    pub reservation: Reservation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&Table> for TableSummary {
    fn from(table: &Table) -> Self {
        Self {
            id: table.id,
            seats: table.seats,
        }
    }
}

impl UpsertOutcome {
    pub fn message(self) -> &'static str {
        match self {
            UpsertOutcome::Created => "Reservation created",
            UpsertOutcome::Updated => "Reservation updated",
        }
    }
}

impl ReservationResponse {
    pub fn new(outcome: UpsertOutcome, reservation: Reservation) -> Self {
        Self {
            success: true,
            message: outcome.message().to_string(),
            reservation,
        }
    }
}

impl CancelResponse {
    pub fn cancelled() -> Self {
        Self {
            success: true,
            message: "Reservation cancelled".to_string(),
        }
    }
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reservation_serializes_with_camel_case_fields() {
        let reservation = Reservation {
            id: 7,
            table_number: 3,
            customer_name: "Alice".to_string(),
            time: Utc.with_ymd_and_hms(2030, 1, 2, 19, 30, 0).unwrap(),
            guests: 4,
        };

        let value = serde_json::to_value(&reservation).unwrap();
        assert_eq!(value["tableNumber"], 3);
        assert_eq!(value["customerName"], "Alice");
        assert_eq!(value["guests"], 4);
        assert_eq!(value["time"], "2030-01-02T19:30:00Z");
    }

    #[test]
    fn request_tolerates_missing_and_null_fields() {
        let request: ReservationRequest =
            serde_json::from_str(r#"{"id": null, "tableNumber": 2}"#).unwrap();
        assert_eq!(request.id, None);
        assert_eq!(request.table_number, Some(2));
        assert!(request.customer_name.is_none());
        assert!(request.time.is_none());
        assert!(request.guests.is_none());
    }

    #[test]
    fn outcome_messages() {
        let summary = TableSummary::from(&Table { id: 5, seats: 8, available: true });
        assert_eq!(summary, TableSummary { id: 5, seats: 8 });
        assert_eq!(UpsertOutcome::Created.message(), "Reservation created");
        assert_eq!(UpsertOutcome::Updated.message(), "Reservation updated");
        assert_eq!(CancelResponse::cancelled().message, "Reservation cancelled");
    }
}
