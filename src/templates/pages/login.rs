use maud::{html, Markup};

use crate::auth::remember::RememberedLogin;
use crate::templates::app_layout;
use crate::templates::components::error_banner;

/// Sign-in plus sign-up, one page. The email field pre-fills from the
/// remembered-login cookies when the user opted in.
pub fn login_page(remembered: &RememberedLogin, error: Option<&str>) -> Markup {
    app_layout(
        "Iniciar sesión",
        None,
        html! {
            section class="card narrow" {
                h2 { "Iniciar sesión" }
                (error_banner(error))

                form action="/login" method="post" class="stacked" {
                    label for="email" { "Email" }
                    input type="email" id="email" name="email"
                        value=(remembered.email) placeholder="tu@email.com" required;

                    label for="password" { "Contraseña" }
                    input type="password" id="password" name="password"
                        minlength="6" required;

                    label class="checkbox" {
                        input type="checkbox" name="remember" value="true"
                            checked[remembered.opted_in];
                        " Recordar credenciales"
                    }

                    button type="submit" class="primary" { "Iniciar sesión" }
                }
            }

            section class="card narrow" {
                h2 { "Crear cuenta" }
                form action="/register" method="post" class="stacked" {
                    label for="reg-email" { "Email" }
                    input type="email" id="reg-email" name="email"
                        placeholder="tu@email.com" required;

                    label for="reg-password" { "Contraseña" }
                    input type="password" id="reg-password" name="password"
                        minlength="6" required;

                    button type="submit" { "Crear cuenta" }
                }
            }
        },
    )
}
