pub mod cookies;
pub mod password;
pub mod remember;
pub mod sessions;
pub mod token;
