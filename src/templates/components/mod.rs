use maud::{html, Markup};

pub mod card;
pub mod error;
pub mod pagination;

pub use card::card;
pub use error::error_page;
pub use pagination::pagination;

pub const LOAD_ERROR_TEXT: &str = "Не удалось загрузить данные";

/// The one failure message every view shows.
pub fn load_error() -> Markup {
    html! {
        p class="load-error" role="alert" { (LOAD_ERROR_TEXT) }
    }
}
