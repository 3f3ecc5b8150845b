use maud::{html, Markup};

use crate::templates::{app_layout, Tab};

/// Desktop hand-off page: touch devices are redirected straight to wa.me,
/// everyone else gets the link in a new tab so the app page stays open.
pub fn send_page(whatsapp_url: &str, customer: &str) -> Markup {
    app_layout(
        "Enviar por WhatsApp",
        Some(Tab::Repairs),
        html! {
            section class="card narrow" {
                h2 { "Mensaje listo" }
                p { "El mensaje para " strong { (customer) } " está listo para enviar." }

                a href=(whatsapp_url) target="_blank" rel="noopener"
                    class="button primary wide" { "Abrir WhatsApp" }

                p { a href="/repairs" { "Volver a reparaciones" } }
            }
        },
    )
}
