use crate::listing::format::format_count;
use crate::service::Stats;
use crate::templates::{desktop_layout, load_error, NavItem};
use maud::{html, Markup};

pub fn dashboard_page(stats: Option<&Stats>) -> Markup {
    desktop_layout(
        "Статистика",
        NavItem::Dashboard,
        html! {
            main class="container" {
                h1 { "Статистика" }
                @match stats {
                    None => (load_error()),
                    Some(s) => {
                        div class="stat-grid" {
                            (stat_card("Зданий", s.buildings, "#1976d2"))
                            (stat_card("Управляющих компаний", s.companies, "#2e7d32"))
                            (stat_card("С телефонами", s.with_phone, "#ed6c02"))
                            (stat_card("С email", s.with_email, "#9c27b0"))
                            (stat_card("Связей дом-УК", s.linked, "#d32f2f"))
                        }
                    }
                }
            }
        },
    )
}

fn stat_card(title: &str, value: u64, color: &str) -> Markup {
    html! {
        section class="card stat" style=(format!("background-color: {color}; color: white;")) {
            p class="stat-value" { (format_count(value)) }
            p class="stat-title" { (title) }
        }
    }
}
