use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::estimate::{CostEstimate, NewEstimate};
use crate::errors::ServerError;

fn row_to_estimate(row: &rusqlite::Row<'_>) -> rusqlite::Result<CostEstimate> {
    Ok(CostEstimate {
        id: row.get(0)?,
        repair_id: row.get(1)?,
        work_description: row.get(2)?,
        labor_cost: row.get(3)?,
        parts_cost: row.get(4)?,
        total: row.get(5)?,
        sent: row.get(6)?,
        sent_at: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// All estimates, newest first.
pub fn list_estimates(conn: &Connection) -> Result<Vec<CostEstimate>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        select id, repair_id, work_description, labor_cost, parts_cost, total,
               sent, sent_at, created_at
        from estimates
        order by created_at desc, id desc
        "#,
    )?;

    let rows = stmt.query_map([], row_to_estimate)?;

    let mut estimates = Vec::new();
    for row in rows {
        estimates.push(row?);
    }
    Ok(estimates)
}

/// The estimate attached to one repair, if any. The UI only offers the
/// estimate form while this returns `None`.
pub fn find_estimate_for_repair(
    conn: &Connection,
    repair_id: i64,
) -> Result<Option<CostEstimate>, ServerError> {
    conn.query_row(
        r#"
        select id, repair_id, work_description, labor_cost, parts_cost, total,
               sent, sent_at, created_at
        from estimates
        where repair_id = ?1
        order by id
        limit 1
        "#,
        params![repair_id],
        row_to_estimate,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("load estimate failed: {e}")))
}

/// Insert the estimate at send time. The total column is computed here, once;
/// after this the row is immutable history. The sent flag and timestamp are
/// stored in the same insert.
pub fn insert_estimate(
    conn: &Connection,
    input: &NewEstimate,
    now: NaiveDateTime,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into estimates (
            repair_id, work_description, labor_cost, parts_cost, total,
            sent, sent_at, created_at
        ) values (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7)
        "#,
        params![
            input.repair_id,
            input.work_description,
            input.labor_cost,
            input.parts_cost,
            input.total(),
            now,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert estimate failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}
