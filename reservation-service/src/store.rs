use chrono::{DateTime, NaiveDateTime, Utc};
use shared::*;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// In-memory tables and reservations for a single dining room.
///
/// A table is reserved (`available == false`) exactly while some active
/// reservation points at it, and no two reservations share a table.
/// Every mutation validates first and only then touches state, so a rejected
/// request leaves the store exactly as it was.
#[derive(Debug, Clone)]
pub struct ReservationStore {
    tables: Vec<Table>,
    reservations: Vec<Reservation>,
    next_id: ReservationId,
}

/// A request that passed the field checks.
struct ReservationFields {
    id: Option<ReservationId>,
    table_number: i64,
    customer_name: String,
    time: DateTime<Utc>,
    guests: u32,
}

impl ReservationStore {
    pub fn new(tables: Vec<Table>) -> Self {
        Self {
            tables,
            reservations: Vec::new(),
            next_id: 1,
        }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn list_available_tables(&self) -> Vec<TableSummary> {
        self.tables
            .iter()
            .filter(|table| table.available)
            .map(TableSummary::from)
            .collect()
    }

    /// Free tables, plus the one held by `excluding` so an edit can keep it.
    pub fn list_assignable_tables(&self, excluding: Option<ReservationId>) -> Vec<Table> {
        let held = excluding
            .and_then(|id| self.find_reservation(id))
            .map(|reservation| reservation.table_number);

        self.tables
            .iter()
            .filter(|table| table.available || Some(table.id) == held)
            .cloned()
            .collect()
    }

    pub fn list_reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn upsert_reservation(
        &mut self,
        request: ReservationRequest,
        now: DateTime<Utc>,
    ) -> StoreResult<(Reservation, UpsertOutcome)> {
        let fields = validate_fields(request, now).inspect_err(|e| {
            warn!("Rejected reservation: {}", e);
        })?;

        let existing = match fields.id {
            Some(id) => match self.find_reservation(id) {
                Some(reservation) => Some(reservation.clone()),
                None => {
                    warn!("Rejected update of unknown reservation {}", id);
                    return Err(StoreError::NotFound);
                }
            },
            None => None,
        };

        let table = self
            .find_table(fields.table_number)
            .ok_or_else(|| {
                StoreError::validation(format!("Table {} does not exist", fields.table_number))
            })
            .inspect_err(|e| warn!("Rejected reservation: {}", e))?;
        let table_id = table.id;

        let is_same_table = existing
            .as_ref()
            .is_some_and(|reservation| reservation.table_number == table_id);

        if !table.available && !is_same_table {
            warn!("Table {} is already reserved", table_id);
            return Err(StoreError::validation(format!(
                "Table {} is not available",
                table_id
            )));
        }

        if table.seats < fields.guests {
            warn!(
                "Table {} cannot seat {} guests ({} seats)",
                table_id, fields.guests, table.seats
            );
            return Err(StoreError::validation(format!(
                "Table {} only has {} seats",
                table_id, table.seats
            )));
        }

        // All checks passed; nothing below can fail.
        if let Some(previous) = existing.as_ref().filter(|_| !is_same_table) {
            self.set_availability(previous.table_number, true);
        }
        if !is_same_table {
            self.set_availability(table_id, false);
        }

        let (id, outcome) = match existing {
            Some(previous) => (previous.id, UpsertOutcome::Updated),
            None => (self.allocate_id(), UpsertOutcome::Created),
        };

        let reservation = Reservation {
            id,
            table_number: table_id,
            customer_name: fields.customer_name,
            time: fields.time,
            guests: fields.guests,
        };

        match outcome {
            UpsertOutcome::Updated => {
                if let Some(slot) = self.reservations.iter_mut().find(|r| r.id == id) {
                    *slot = reservation.clone();
                }
            }
            UpsertOutcome::Created => self.reservations.push(reservation.clone()),
        }

        info!(
            "{} reservation {} on table {} for {} guests",
            match outcome {
                UpsertOutcome::Created => "Created",
                UpsertOutcome::Updated => "Updated",
            },
            reservation.id,
            reservation.table_number,
            reservation.guests
        );

        Ok((reservation, outcome))
    }

    pub fn cancel_reservation(&mut self, id: ReservationId) -> StoreResult<Reservation> {
        let index = self
            .reservations
            .iter()
            .position(|reservation| reservation.id == id)
            .ok_or_else(|| {
                warn!("Cancel requested for unknown reservation {}", id);
                StoreError::NotFound
            })?;

        let reservation = self.reservations.remove(index);
        self.set_availability(reservation.table_number, true);

        info!(
            "Cancelled reservation {}, table {} is free",
            reservation.id, reservation.table_number
        );

        Ok(reservation)
    }

    fn find_reservation(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|reservation| reservation.id == id)
    }

    fn find_table(&self, table_number: i64) -> Option<&Table> {
        let id = TableId::try_from(table_number).ok()?;
        self.tables.iter().find(|table| table.id == id)
    }

    fn set_availability(&mut self, table_id: TableId, available: bool) {
        if let Some(table) = self.tables.iter_mut().find(|table| table.id == table_id) {
            debug!("Table {} available={}", table_id, available);
            table.available = available;
        }
    }

    /// Ids are never handed out twice, even after cancellations.
    fn allocate_id(&mut self) -> ReservationId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn validate_fields(request: ReservationRequest, now: DateTime<Utc>) -> StoreResult<ReservationFields> {
    let customer_name = request
        .customer_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let time = request
        .time
        .as_deref()
        .map(str::trim)
        .filter(|time| !time.is_empty());
    let table_number = request.table_number.filter(|&n| n != 0);
    let guests = request.guests.filter(|&n| n != 0);

    let (Some(customer_name), Some(time), Some(table_number), Some(guests)) =
        (customer_name, time, table_number, guests)
    else {
        return Err(StoreError::validation("All fields are required"));
    };

    if table_number < 0 {
        return Err(StoreError::validation("Table number must be a positive number"));
    }
    if guests < 0 {
        return Err(StoreError::validation("Guest count must be a positive number"));
    }

    let time = parse_reservation_time(time)
        .ok_or_else(|| StoreError::validation("Reservation time is not a valid timestamp"))?;

    if time <= now {
        return Err(StoreError::validation("Reservation time must be in the future"));
    }

    Ok(ReservationFields {
        id: request.id.filter(|&id| id != 0),
        table_number,
        customer_name: customer_name.to_string(),
        time,
        // Anything past u32 cannot fit at any table; the seat check rejects it.
        guests: u32::try_from(guests).unwrap_or(u32::MAX),
    })
}

/// Accepts RFC 3339 timestamps, or a bare `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// which is taken to be UTC.
pub fn parse_reservation_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
