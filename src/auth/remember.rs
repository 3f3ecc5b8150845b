//! Remembered-login preference: a named cookie pair the login form reads to
//! pre-fill itself. Written on a successful sign-in with the box checked,
//! cleared on a successful sign-in without it. Nothing else touches it.

use crate::auth::cookies::cookie_value;

pub const SAVED_EMAIL_COOKIE: &str = "saved_email";
pub const REMEMBER_FLAG_COOKIE: &str = "remember_me";

const ONE_YEAR_SECS: i64 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone, Default)]
pub struct RememberedLogin {
    pub email: String,
    pub opted_in: bool,
}

/// Read the preference from a `Cookie` request header. The email only counts
/// when the flag cookie is present and true.
pub fn read(cookie_header: Option<&str>) -> RememberedLogin {
    let Some(header) = cookie_header else {
        return RememberedLogin::default();
    };

    let opted_in = cookie_value(header, REMEMBER_FLAG_COOKIE) == Some("true");
    if !opted_in {
        return RememberedLogin::default();
    }

    RememberedLogin {
        email: cookie_value(header, SAVED_EMAIL_COOKIE)
            .unwrap_or("")
            .to_string(),
        opted_in: true,
    }
}

/// `Set-Cookie` values that persist the preference.
pub fn set_cookies(email: &str) -> Vec<String> {
    vec![
        format!("{SAVED_EMAIL_COOKIE}={email}; Path=/login; SameSite=Lax; Max-Age={ONE_YEAR_SECS}"),
        format!("{REMEMBER_FLAG_COOKIE}=true; Path=/login; SameSite=Lax; Max-Age={ONE_YEAR_SECS}"),
    ]
}

/// `Set-Cookie` values that drop the preference.
pub fn clear_cookies() -> Vec<String> {
    vec![
        format!("{SAVED_EMAIL_COOKIE}=; Path=/login; SameSite=Lax; Max-Age=0"),
        format!("{REMEMBER_FLAG_COOKIE}=; Path=/login; SameSite=Lax; Max-Age=0"),
    ]
}
