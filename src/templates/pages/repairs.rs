use std::collections::HashMap;

use maud::{html, Markup};

use crate::domain::estimate::CostEstimate;
use crate::domain::money::format_ars;
use crate::domain::repair::RepairJob;
use crate::templates::{app_layout, Tab};

pub fn repairs_page(
    repairs: &[RepairJob],
    estimates_by_repair: &HashMap<i64, CostEstimate>,
) -> Markup {
    app_layout(
        "Reparaciones",
        Some(Tab::Repairs),
        html! {
            a href="/repairs/new" class="button primary wide" { "+ Nueva Reparación" }

            @if repairs.is_empty() {
                div class="empty-state" {
                    p { "No hay reparaciones registradas" }
                    p class="hint" { "¡Agregá tu primera reparación!" }
                }
            } @else {
                div class="card-list" {
                    @for repair in repairs {
                        (repair_card(repair, estimates_by_repair.get(&repair.id)))
                    }
                }
            }
        },
    )
}

fn repair_card(repair: &RepairJob, estimate: Option<&CostEstimate>) -> Markup {
    html! {
        section class="card" {
            div class="card-header" {
                div {
                    h3 { (repair.customer_name()) }
                    p class="muted" { "📱 " (repair.phone) }
                }
                form action="/repairs/delete" method="post"
                    onsubmit="return confirm('¿Estás seguro de eliminar esta reparación?')" {
                    input type="hidden" name="id" value=(repair.id);
                    button type="submit" class="linklike danger" { "Eliminar" }
                }
            }

            div class="field-grid" {
                div { span class="muted" { "Marca: " } strong { (repair.make) } }
                div { span class="muted" { "Cilindrada: " } strong { (repair.displacement) } }
            }

            @if !repair.notes.is_empty() {
                p class="notes" { strong { "Observaciones: " } (repair.notes) }
            }

            @if let Some(created) = repair.created_at {
                p class="timestamp" { (created.format("%d/%m/%Y %H:%M")) }
            }

            div class="card-actions" {
                @match estimate {
                    Some(est) => {
                        span class="badge" { "Presupuesto enviado: " (format_ars(est.computed_total())) }
                    }
                    None => {
                        a href=(format!("/repairs/estimate?id={}", repair.id)) { "Crear presupuesto" }
                    }
                }

                @if repair.ready_for_pickup {
                    span class="badge ok" { "✅ Lista para retirar" }
                } @else {
                    form action="/repairs/ready" method="post" {
                        input type="hidden" name="id" value=(repair.id);
                        button type="submit" class="linklike" { "Avisar retiro 📲" }
                    }
                }

                a href=(format!("/repairs/notes?id={}", repair.id)) { "Notas privadas" }
            }
        }
    }
}
