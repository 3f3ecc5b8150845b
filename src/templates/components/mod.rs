use maud::{html, Markup};

pub mod error;

pub use error::error_page;

/// Inline validation banner; renders nothing when there is no message.
pub fn error_banner(message: Option<&str>) -> Markup {
    html! {
        @if let Some(msg) = message {
            div class="error-banner" { (msg) }
        }
    }
}
