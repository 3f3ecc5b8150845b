use maud::{html, Markup};

use crate::domain::repair::RepairJob;
use crate::templates::components::error_banner;
use crate::templates::{app_layout, Tab};

/// Estimate form for one repair. Work description and labor cost are
/// mandatory; parts cost defaults to zero. Submitting stores the estimate
/// and hands off to WhatsApp.
pub fn estimate_page(
    job: &RepairJob,
    error: Option<&str>,
    description: &str,
    labor: &str,
    parts: &str,
) -> Markup {
    app_layout(
        "Crear Presupuesto",
        Some(Tab::Repairs),
        html! {
            section class="card" {
                h2 { "Crear Presupuesto" }
                (error_banner(error))

                div class="info-box" {
                    p { strong { "Cliente: " } (job.customer_name()) }
                    p { strong { "Moto: " } (job.bike_label()) }
                    p { strong { "WhatsApp: " } (job.phone) }
                }

                form action="/repairs/estimate" method="post" class="stacked" {
                    input type="hidden" name="id" value=(job.id);

                    label for="work_description" { "Descripción del trabajo *" }
                    textarea id="work_description" name="work_description" rows="4"
                        placeholder="Ej: Cambio de aceite y filtro, regulación de cadena..."
                        required { (description) }

                    label for="labor_cost" { "Costo de mano de obra * ($)" }
                    input type="number" id="labor_cost" name="labor_cost"
                        min="0" step="0.01" value=(labor) placeholder="15000" required;

                    label for="parts_cost" { "Costo de repuestos ($)" }
                    input type="number" id="parts_cost" name="parts_cost"
                        min="0" step="0.01" value=(parts) placeholder="5000";

                    div class="form-actions" {
                        a href="/repairs" class="button" { "Cancelar" }
                        button type="submit" class="primary" { "Enviar por WhatsApp" }
                    }
                }
            }
        },
    )
}
