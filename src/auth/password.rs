use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::auth::sessions::create_session;
use crate::auth::token::{hashes_equal, new_salt};
use crate::db::users;
use crate::errors::ServerError;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user_id: i64,
    pub email: String,
    /// Raw session token for the cookie (never stored as-is).
    pub session_token: String,
}

/// Trim + lowercase, minimal sanity check.
pub fn normalize_email(email: &str) -> Result<String, ServerError> {
    let e = email.trim().to_lowercase();
    if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
        return Err(ServerError::BadRequest("Email inválido".into()));
    }
    Ok(e)
}

/// Salted SHA-256 digest stored in the users table.
pub fn hash_password(salt: &str, password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    let out = hasher.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

/// Create an account. Fails with a validation error when the email is taken
/// or the password is too short.
pub fn sign_up(
    conn: &Connection,
    email: &str,
    password: &str,
    now: i64,
) -> Result<i64, ServerError> {
    let email = normalize_email(email)?;
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ServerError::BadRequest(
            "La contraseña debe tener al menos 6 caracteres".into(),
        ));
    }

    if users::find_user_by_email(conn, &email)?.is_some() {
        return Err(ServerError::BadRequest(
            "Ya existe una cuenta con ese email".into(),
        ));
    }

    let salt = new_salt();
    let hash = hash_password(&salt, password);
    users::insert_user(conn, &email, &salt, &hash, now)
}

/// Verify credentials and open a session.
pub fn sign_in(
    conn: &Connection,
    email: &str,
    password: &str,
    now: i64,
) -> Result<SignedIn, ServerError> {
    let email = normalize_email(email)?;

    let Some(user) = users::find_user_by_email(conn, &email)? else {
        return Err(ServerError::Unauthorized("Email o contraseña incorrectos".into()));
    };

    let hash = hash_password(&user.password_salt, password);
    if !hashes_equal(&hash, &user.password_hash) {
        return Err(ServerError::Unauthorized("Email o contraseña incorrectos".into()));
    }

    users::touch_last_login(conn, user.id, now)?;
    let session_token = create_session(conn, user.id, now)?;

    Ok(SignedIn {
        user_id: user.id,
        email: user.email,
        session_token,
    })
}
