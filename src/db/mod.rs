pub mod connection;
pub mod estimates;
pub mod repairs;
pub mod users;
