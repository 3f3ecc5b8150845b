use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_salt: String,
    pub password_hash: Vec<u8>,
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>, ServerError> {
    conn.query_row(
        "select id, email, password_salt, password_hash from users where email = ?1",
        params![email],
        |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password_salt: row.get(2)?,
                password_hash: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

/// Email should already be normalized by the caller (trim/lowercase).
pub fn insert_user(
    conn: &Connection,
    email: &str,
    salt: &str,
    password_hash: &[u8],
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        "insert into users (email, password_salt, password_hash, created_at) values (?1, ?2, ?3, ?4)",
        params![email, salt, password_hash, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert user failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn touch_last_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update users set last_login_at = ?1 where id = ?2",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last login failed: {e}")))?;
    Ok(())
}
