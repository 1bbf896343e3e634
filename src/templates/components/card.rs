use maud::{html, Markup};

/// Titled panel used on detail pages.
pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 class="card-title" { (title) }
            (body)
        }
    }
}
