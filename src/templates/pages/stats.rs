use maud::{html, Markup};

use crate::domain::money::format_ars;
use crate::domain::stats::{FinancialSummary, OrderedCounts, RepairCounts};
use crate::reports::financial::period_label;
use crate::templates::{app_layout, Tab};

/// Statistics view: intake counters plus the financial summary for the
/// selected period (`None` = all time).
pub fn stats_page(
    counts: &RepairCounts,
    summary: &FinancialSummary,
    periods: &[String],
    selected: Option<&str>,
) -> Markup {
    app_layout(
        "Estadísticas",
        Some(Tab::Stats),
        html! {
            div class="tile-row" {
                div class="tile" { div class="tile-number" { (counts.total) } div { "Total" } }
                div class="tile" { div class="tile-number" { (counts.last_week) } div { "Esta semana" } }
                div class="tile" { div class="tile-number" { (counts.last_month) } div { "Este mes" } }
            }

            (count_card("🏍️ Por Marca", &counts.by_make, counts.total))
            (count_card("⚙️ Por Cilindrada", &counts.by_displacement, counts.total))

            section class="card" {
                h2 { "📈 Insights" }
                @if counts.total > 0 {
                    ul class="insights" {
                        li {
                            "Marca más popular: "
                            strong { (counts.by_make.most_common().unwrap_or("N/A")) }
                        }
                        li {
                            "Cilindrada más común: "
                            strong { (counts.by_displacement.most_common().unwrap_or("N/A")) }
                        }
                        li {
                            "Promedio semanal: "
                            strong { (format!("{:.1}", counts.total as f64 / 4.0)) " reparaciones" }
                        }
                    }
                } @else {
                    p class="muted" { "No hay suficientes datos para mostrar insights." }
                }
            }

            section class="card" {
                h2 { "💰 Finanzas" }

                form action="/stats" method="get" class="inline" {
                    label for="period" { "Período" }
                    select id="period" name="period" onchange="this.form.submit()" {
                        option value="general" selected[selected.is_none()] { "General (todo)" }
                        @for key in periods {
                            option value=(key) selected[selected == Some(key.as_str())] {
                                (period_label(key))
                            }
                        }
                    }
                    button type="submit" { "Ver" }
                }

                div class="summary-rows" {
                    div { span { "Cantidad de presupuestos" } strong { (summary.count) } }
                    div { span { "Ganancias por mano de obra" } strong { (format_ars(summary.labor)) } }
                    div { span { "Costo de repuestos" } strong { (format_ars(summary.parts)) } }
                    div class="grand-total" { span { "TOTAL" } strong { (format_ars(summary.grand_total)) } }
                }

                a href=(format!("/stats/report?period={}", selected.unwrap_or("general")))
                    class="button wide" { "⬇ Descargar informe" }
            }
        },
    )
}

fn count_card(title: &str, counts: &OrderedCounts, total: i64) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            @if counts.is_empty() {
                p class="muted" { "No hay datos disponibles" }
            } @else {
                div class="bar-list" {
                    @for (key, count) in counts.sorted_desc() {
                        div class="bar-row" {
                            div class="bar-label" {
                                span { (key) }
                                strong { (count) }
                            }
                            div class="bar-track" {
                                div class="bar-fill"
                                    style=(format!("width: {}%", percent(count, total))) {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn percent(count: i64, total: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        count * 100 / total
    }
}
