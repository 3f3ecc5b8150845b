use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::repair::{NewRepairJob, RepairJob};
use crate::errors::ServerError;

fn row_to_repair(row: &rusqlite::Row<'_>) -> rusqlite::Result<RepairJob> {
    Ok(RepairJob {
        id: row.get(0)?,
        created_at: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        phone: row.get(4)?,
        make: row.get(5)?,
        displacement: row.get(6)?,
        notes: row.get(7)?,
        user_id: row.get(8)?,
        ready_for_pickup: row.get(9)?,
        pickup_notified_at: row.get(10)?,
        private_notes: row.get(11)?,
    })
}

/// All intakes, newest first.
pub fn list_repairs(conn: &Connection) -> Result<Vec<RepairJob>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        select id, created_at, first_name, last_name, phone, make, displacement,
               notes, user_id, ready_for_pickup, pickup_notified_at, private_notes
        from repairs
        order by created_at desc, id desc
        "#,
    )?;

    let rows = stmt.query_map([], row_to_repair)?;

    let mut repairs = Vec::new();
    for row in rows {
        repairs.push(row?);
    }
    Ok(repairs)
}

pub fn get_repair(conn: &Connection, id: i64) -> Result<Option<RepairJob>, ServerError> {
    conn.query_row(
        r#"
        select id, created_at, first_name, last_name, phone, make, displacement,
               notes, user_id, ready_for_pickup, pickup_notified_at, private_notes
        from repairs
        where id = ?1
        "#,
        params![id],
        row_to_repair,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("load repair failed: {e}")))
}

/// Insert a new intake; the store assigns id and creation time.
pub fn insert_repair(
    conn: &Connection,
    input: &NewRepairJob,
    now: NaiveDateTime,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into repairs (
            created_at, first_name, last_name, phone, make, displacement, notes, user_id
        ) values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            now,
            input.first_name,
            input.last_name,
            input.phone,
            input.make,
            input.displacement,
            input.notes,
            input.user_id,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert repair failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Flip the ready-for-pickup flag. The notification timestamp is set in the
/// same statement so the flag is never true without it.
pub fn mark_ready(conn: &Connection, id: i64, now: NaiveDateTime) -> Result<(), ServerError> {
    let changed = conn
        .execute(
            "update repairs set ready_for_pickup = 1, pickup_notified_at = ?1 where id = ?2",
            params![now, id],
        )
        .map_err(|e| ServerError::DbError(format!("mark ready failed: {e}")))?;

    if changed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn set_private_notes(
    conn: &Connection,
    id: i64,
    notes: Option<&str>,
) -> Result<(), ServerError> {
    let changed = conn
        .execute(
            "update repairs set private_notes = ?1 where id = ?2",
            params![notes, id],
        )
        .map_err(|e| ServerError::DbError(format!("save private notes failed: {e}")))?;

    if changed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

/// Delete an intake and its estimate in one transaction, so a failure leaves
/// both rows in place.
pub fn delete_repair(conn: &mut Connection, id: i64) -> Result<(), ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    tx.execute("delete from estimates where repair_id = ?1", params![id])?;
    let changed = tx.execute("delete from repairs where id = ?1", params![id])?;

    if changed == 0 {
        return Err(ServerError::NotFound);
    }

    tx.commit().map_err(|e| ServerError::DbError(e.to_string()))
}
