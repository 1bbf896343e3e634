use crate::listing::format::{format_area, format_count, format_phone, or_placeholder};
use crate::service::CompanyDetail;
use crate::templates::{card, desktop_layout, load_error, NavItem};
use maud::{html, Markup};

/// `None` means the service could not be reached or answered garbage.
pub fn company_page(detail: Option<&CompanyDetail>) -> Markup {
    let title = detail
        .map(|d| d.company.name.as_str())
        .unwrap_or("Управляющая компания");

    desktop_layout(
        title,
        NavItem::Companies,
        html! {
            main class="container" {
                p { a href="/companies" { "← Все компании" } }
                @match detail {
                    None => (load_error()),
                    Some(d) => {
                        h1 { (d.company.name) }
                        (card("Контакты", html! {
                            dl {
                                dt { "ОГРН" } dd { (or_placeholder(d.company.ogrn.as_deref())) }
                                dt { "Директор" } dd { (or_placeholder(d.company.director_name.as_deref())) }
                                dt { "Телефон" } dd { (format_phone(d.company.phone.as_deref())) }
                                dt { "Email" } dd { (or_placeholder(d.company.email.as_deref())) }
                                dt { "Зданий в управлении" } dd { (format_count(d.company.buildings_count)) }
                            }
                        }))

                        h2 { "Здания" }
                        @if d.buildings.is_empty() {
                            p { "Нет связанных зданий" }
                        } @else {
                            table class="listing" {
                                thead {
                                    tr {
                                        th { "ID" }
                                        th { "Адрес" }
                                        th { "Код МКД" }
                                        th { "Площадь" }
                                    }
                                }
                                tbody {
                                    @for b in &d.buildings {
                                        tr {
                                            td { (b.id) }
                                            td { (or_placeholder(b.address.as_deref())) }
                                            td { (or_placeholder(b.building_code.as_deref())) }
                                            td class="num" { (format_area(b.total_area)) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
