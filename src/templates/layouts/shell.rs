use maud::{html, Markup, DOCTYPE};

/// Which bottom-nav tab is lit. Pages outside the signed-in shell pass no
/// tab and get neither the nav nor the sign-out button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Repairs,
    Stats,
}

pub fn app_layout(title: &str, active: Option<Tab>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="topbar" {
                    h1 { "Roncoroni" }
                    @if active.is_some() {
                        form action="/logout" method="post" {
                            button type="submit" class="linklike" { "Salir" }
                        }
                    }
                }
                main class="content" { (content) }
                @if let Some(tab) = active {
                    nav class="bottom-nav" {
                        a href="/repairs" class=(tab_class(tab == Tab::Repairs)) { "Reparaciones" }
                        a href="/stats" class=(tab_class(tab == Tab::Stats)) { "Estadísticas" }
                    }
                }
            }
        }
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "tab active"
    } else {
        "tab"
    }
}
