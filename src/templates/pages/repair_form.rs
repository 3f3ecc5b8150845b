use maud::{html, Markup};

use crate::domain::repair::NewRepairJob;
use crate::templates::components::error_banner;
use crate::templates::{app_layout, Tab};

/// Intake form. On a validation error the submitted values come back so
/// nothing retyped is lost.
pub fn new_repair_page(error: Option<&str>, values: &NewRepairJob) -> Markup {
    app_layout(
        "Nueva Reparación",
        Some(Tab::Repairs),
        html! {
            section class="card" {
                h2 { "Nueva Reparación" }
                (error_banner(error))

                form action="/repairs" method="post" class="stacked" {
                    div class="field-grid" {
                        div {
                            label for="first_name" { "Nombre *" }
                            input type="text" id="first_name" name="first_name"
                                value=(values.first_name) placeholder="Juan" required;
                        }
                        div {
                            label for="last_name" { "Apellido *" }
                            input type="text" id="last_name" name="last_name"
                                value=(values.last_name) placeholder="Pérez" required;
                        }
                    }

                    label for="phone" { "Celular *" }
                    input type="tel" id="phone" name="phone"
                        value=(values.phone) placeholder="3512345678" required;

                    div class="field-grid" {
                        div {
                            label for="make" { "Marca *" }
                            input type="text" id="make" name="make"
                                value=(values.make) placeholder="Honda, Yamaha..." required;
                        }
                        div {
                            label for="displacement" { "Cilindrada *" }
                            input type="text" id="displacement" name="displacement"
                                value=(values.displacement) placeholder="250cc" required;
                        }
                    }

                    label for="notes" { "Observaciones" }
                    textarea id="notes" name="notes" rows="4"
                        placeholder="Detalles de la reparación..." { (values.notes) }

                    div class="form-actions" {
                        a href="/repairs" class="button" { "Cancelar" }
                        button type="submit" class="primary" { "Guardar" }
                    }
                }
            }
        },
    )
}
