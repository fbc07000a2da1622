//! Vehicle persistence operations on the `vehicles` table.
//!
//! Every function is owner-scoped: the owner id is part of the same
//! statement's `WHERE` clause (or the inserted row), so no call can read or
//! change another user's vehicle. Mutations return whether a row matched.

use garage_core::{InspectionStatus, UserId, VehicleDetails, VehicleId};
use sqlx::SqlitePool;

use crate::state::Vehicle;

const COLUMNS: &str =
    "id, registration, make_model, mot_expiry, tax_status, insurance_expiry, next_service";

/// All vehicles owned by `owner`, in insertion order.
pub async fn list(pool: &SqlitePool, owner: UserId) -> Result<Vec<Vehicle>, sqlx::Error> {
    let rows = sqlx::query_as::<_, VehicleRow>(&format!(
        "SELECT {COLUMNS} FROM vehicles WHERE user_id = ? ORDER BY id"
    ))
    .bind(owner.get())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(VehicleRow::into_vehicle).collect())
}

/// Fetch one vehicle if `owner` owns it.
#[cfg(test)]
pub async fn get(
    pool: &SqlitePool,
    owner: UserId,
    id: VehicleId,
) -> Result<Option<Vehicle>, sqlx::Error> {
    let row = sqlx::query_as::<_, VehicleRow>(&format!(
        "SELECT {COLUMNS} FROM vehicles WHERE id = ? AND user_id = ?"
    ))
    .bind(id.get())
    .bind(owner.get())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(VehicleRow::into_vehicle))
}

/// Insert a vehicle for `owner` and return its id.
pub async fn insert(
    pool: &SqlitePool,
    owner: UserId,
    details: &VehicleDetails,
) -> Result<VehicleId, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO vehicles (registration, make_model, mot_expiry, tax_status, insurance_expiry, next_service, user_id)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&details.registration)
    .bind(&details.make_model)
    .bind(&details.mot_expiry)
    .bind(&details.tax_status)
    .bind(&details.insurance_expiry)
    .bind(&details.next_service)
    .bind(owner.get())
    .execute(pool)
    .await?;

    Ok(VehicleId::from_db(result.last_insert_rowid()))
}

/// Overwrite every mutable field of a vehicle owned by `owner`.
pub async fn update(
    pool: &SqlitePool,
    owner: UserId,
    id: VehicleId,
    details: &VehicleDetails,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE vehicles
         SET registration = ?, make_model = ?, mot_expiry = ?, tax_status = ?, insurance_expiry = ?, next_service = ?
         WHERE id = ? AND user_id = ?",
    )
    .bind(&details.registration)
    .bind(&details.make_model)
    .bind(&details.mot_expiry)
    .bind(&details.tax_status)
    .bind(&details.insurance_expiry)
    .bind(&details.next_service)
    .bind(id.get())
    .bind(owner.get())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a vehicle owned by `owner`.
pub async fn delete(pool: &SqlitePool, owner: UserId, id: VehicleId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM vehicles WHERE id = ? AND user_id = ?")
        .bind(id.get())
        .bind(owner.get())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Write registry-derived fields onto a vehicle owned by `owner`.
pub async fn apply_status(
    pool: &SqlitePool,
    owner: UserId,
    id: VehicleId,
    status: &InspectionStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE vehicles SET mot_expiry = ?, make_model = ?, tax_status = ?
         WHERE id = ? AND user_id = ?",
    )
    .bind(&status.mot_expiry)
    .bind(&status.make_model)
    .bind(&status.tax_status)
    .bind(id.get())
    .bind(owner.get())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Internal row type for SQLx mapping. Columns are nullable in the schema.
#[derive(sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    registration: Option<String>,
    make_model: Option<String>,
    mot_expiry: Option<String>,
    tax_status: Option<String>,
    insurance_expiry: Option<String>,
    next_service: Option<String>,
}

impl VehicleRow {
    fn into_vehicle(self) -> Vehicle {
        Vehicle::new(
            VehicleId::from_db(self.id),
            VehicleDetails {
                registration: self.registration.unwrap_or_default(),
                make_model: self.make_model.unwrap_or_default(),
                mot_expiry: self.mot_expiry.unwrap_or_default(),
                tax_status: self.tax_status.unwrap_or_default(),
                insurance_expiry: self.insurance_expiry.unwrap_or_default(),
                next_service: self.next_service.unwrap_or_default(),
            },
        )
    }
}
