use maud::{html, Markup};

use crate::domain::repair::RepairJob;
use crate::templates::{app_layout, Tab};

pub fn notes_page(job: &RepairJob) -> Markup {
    app_layout(
        "Notas Privadas",
        Some(Tab::Repairs),
        html! {
            section class="card" {
                h2 { "Notas Privadas" }
                p class="hint" {
                    "🔒 Estas notas son privadas y solo las ve el taller. No se comparten con el cliente."
                }
                p class="muted" { (job.customer_name()) " — " (job.bike_label()) }

                form action="/repairs/notes" method="post" class="stacked" {
                    input type="hidden" name="id" value=(job.id);

                    label for="private_notes" { "Notas internas" }
                    textarea id="private_notes" name="private_notes" rows="8"
                        placeholder="Escribí tus notas privadas acá..." {
                        (job.private_notes.as_deref().unwrap_or(""))
                    }

                    div class="form-actions" {
                        a href="/repairs" class="button" { "Cancelar" }
                        button type="submit" class="primary" { "Guardar" }
                    }
                }
            }
        },
    )
}
