use std::net::SocketAddr;

use astra::Server;

use crate::db::connection::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::handle;

mod auth;
mod db;
mod domain;
mod errors;
mod messaging;
mod reports;
mod responses;
mod router;
mod templates;


fn main() {
    let db = Database::new("motoshop.sqlite3");

    if let Err(e) = init_db(&db, "sql/schema.sql") {
        eprintln!("database initialization failed: {e}");
        std::process::exit(1);
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("listening on http://{addr}");

    let server = Server::bind(addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &db) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("server ended with error: {e}");
    }
}
