use maud::{html, Markup};

use crate::templates::app_layout;

pub fn error_page(status: u16, message: &str) -> Markup {
    app_layout(
        &format!("Error {status}"),
        None,
        html! {
            section class="card" {
                h2 { "Error " (status) }
                p { (message) }
                p { a href="/repairs" { "Volver al inicio" } }
            }
        },
    )
}
